// portfolio-api/src/client.rs
use crate::csrf::{CsrfToken, CSRF_HEADER};
use crate::error::{error_messages, ApiError};
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method, RequestBody};
use crate::multipart::{FileUpload, MultipartForm};
use crate::notify::{NoopNotifier, NotificationKind, Notifier};
use crate::types::{is_json_content_type, ResponseBody};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Path every API endpoint is mounted under
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Header marking a request as issued by script rather than page navigation
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Placeholder for calls that carry no body
pub const NO_BODY: Option<&'static ()> = None;

/// Extra headers merged over the defaults, matched case-insensitively
pub type Headers<'a> = &'a [(&'a str, &'a str)];

#[derive(Clone)]
pub struct ApiClient<C: HttpClient> {
    http: C,
    origin: String,
    prefix: String,
    csrf_token: Option<CsrfToken>,
    notifier: Arc<dyn Notifier>,
    error_field: Option<&'static str>,
}

impl<C: HttpClient> ApiClient<C> {
    /// Client for the API mounted at `origin` + `/api`, with no CSRF token
    pub fn new(http: C, origin: &str) -> Self {
        Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
            prefix: DEFAULT_API_PREFIX.to_string(),
            csrf_token: None,
            notifier: Arc::new(NoopNotifier),
            error_field: None,
        }
    }

    /// Client whose CSRF token is read once from a cookie header string.
    /// A missing `csrftoken` cookie leaves the token unset.
    pub fn from_cookies(http: C, origin: &str, cookies: &str) -> Self {
        Self::new(http, origin).with_csrf_token(CsrfToken::from_cookie_header(cookies))
    }

    /// Mount point of the API relative to the origin; empty for site routes
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        self.prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    pub fn with_csrf_token(mut self, token: Option<CsrfToken>) -> Self {
        self.csrf_token = token;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Body field read for the failure banner when the error body has no
    /// `message`, e.g. `error` for views answering `{success, error}`
    pub fn with_error_field(mut self, field: &'static str) -> Self {
        self.error_field = Some(field);
        self
    }

    pub fn csrf_token(&self) -> Option<&CsrfToken> {
        self.csrf_token.as_ref()
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin, self.prefix)
    }

    /// Absolute URL of an endpoint
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}{}", self.origin, self.prefix, endpoint)
        } else {
            format!("{}{}/{}", self.origin, self.prefix, endpoint)
        }
    }

    /// Issue a JSON request.
    ///
    /// The body is only sent for non-GET methods. Non-2xx statuses become
    /// [`ApiError::Http`]; every failure is reported to the notifier before
    /// being returned.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        let request = self.build_request(method, endpoint, body, headers)?;
        self.execute(request, error_messages::REQUEST_FAILED).await
    }

    pub async fn get(&self, endpoint: &str, headers: Headers<'_>) -> Result<ResponseBody, ApiError> {
        self.request(Method::Get, endpoint, NO_BODY, headers).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::Post, endpoint, body, headers).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::Put, endpoint, body, headers).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::Patch, endpoint, body, headers).await
    }

    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::Delete, endpoint, body, headers).await
    }

    /// POST a multipart form made of `fields` plus, when given, `file` under
    /// `file_field_name`.
    ///
    /// No JSON content type is set so the transport can announce the
    /// multipart boundary. The CSRF header is always attached.
    pub async fn upload_file(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
        file_field_name: &str,
        file: Option<FileUpload>,
        headers: Headers<'_>,
    ) -> Result<ResponseBody, ApiError> {
        let mut form = MultipartForm::new();
        for (name, value) in fields {
            form = form.text(*name, *value);
        }
        if let Some(file) = file {
            form = form.file(file_field_name, file);
        }

        let mut all_headers = vec![(AJAX_HEADER.0.to_string(), AJAX_HEADER.1.to_string())];
        merge_headers(&mut all_headers, headers);
        if let Some(token) = &self.csrf_token {
            set_header(&mut all_headers, CSRF_HEADER, token.as_str());
        }

        let request = HttpRequest {
            method: Method::Post,
            url: self.url(endpoint),
            headers: all_headers,
            body: Some(RequestBody::Multipart(form)),
        };
        self.execute(request, error_messages::UPLOAD_FAILED).await
    }

    fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<HttpRequest, ApiError> {
        let mut all_headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (AJAX_HEADER.0.to_string(), AJAX_HEADER.1.to_string()),
        ];
        merge_headers(&mut all_headers, headers);

        if method.is_mutating() {
            if let Some(token) = &self.csrf_token {
                set_header(&mut all_headers, CSRF_HEADER, token.as_str());
            }
        }

        let body = match body {
            Some(b) if method.is_mutating() => Some(RequestBody::Json(serde_json::to_vec(b)?)),
            _ => None,
        };

        Ok(HttpRequest {
            method,
            url: self.url(endpoint),
            headers: all_headers,
            body,
        })
    }

    async fn execute(&self, request: HttpRequest, fallback: &str) -> Result<ResponseBody, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending API request");

        let result = match self.http.send(request).await {
            Ok(resp) => classify(resp),
            Err(e) => Err(ApiError::Network { message: e.message }),
        };

        match &result {
            Ok(_) => debug!(%method, %url, "API request succeeded"),
            Err(err) => {
                error!(%method, %url, status = ?err.status(), error = %err, "API request failed");
                let message = self.failure_message(err).unwrap_or(fallback);
                self.notifier.notify(message, NotificationKind::Error);
            }
        }

        result
    }

    fn failure_message<'e>(&self, err: &'e ApiError) -> Option<&'e str> {
        err.user_message().or_else(|| {
            let field = self.error_field?;
            err.body()?.field_str(field)
        })
    }
}

/// Turn a raw response into a body or an error, by status and content type
pub fn classify(resp: HttpResponse) -> Result<ResponseBody, ApiError> {
    let body = parse_body(&resp)?;

    if !resp.is_success() {
        return Err(ApiError::Http {
            status: resp.status,
            status_text: resp.status_text,
            body,
        });
    }

    Ok(body)
}

fn parse_body(resp: &HttpResponse) -> Result<ResponseBody, ApiError> {
    if !is_json_content_type(resp.content_type.as_deref()) {
        return Ok(ResponseBody::Text(
            String::from_utf8_lossy(&resp.body).into_owned(),
        ));
    }

    // 204-style empty bodies still count as JSON
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::Json(serde_json::Value::Null));
    }

    serde_json::from_slice(&resp.body)
        .map(ResponseBody::Json)
        .map_err(|e| ApiError::Decode {
            status: Some(resp.status),
            message: e.to_string(),
        })
}

fn merge_headers(headers: &mut Vec<(String, String)>, extra: Headers<'_>) {
    for (name, value) in extra {
        set_header(headers, name, value);
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(slot) => slot.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers each with a canned response
    struct FakeHttp {
        requests: Mutex<Vec<HttpRequest>>,
        response: Result<HttpResponse, HttpError>,
    }

    impl FakeHttp {
        fn answering(status: u16, status_text: &str, content_type: Option<&str>, body: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Ok(HttpResponse {
                    status,
                    status_text: status_text.to_string(),
                    content_type: content_type.map(String::from),
                    body: body.as_bytes().to_vec(),
                }),
            }
        }

        fn json(status: u16, status_text: &str, body: serde_json::Value) -> Self {
            Self::answering(status, status_text, Some("application/json"), &body.to_string())
        }

        fn unreachable() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Err(HttpError {
                    status: None,
                    message: "connection refused".into(),
                }),
            }
        }

        fn last(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().expect("no request sent")
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttp {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(request);
            self.response.clone()
        }
    }

    type Seen = Arc<Mutex<Vec<(String, NotificationKind)>>>;

    fn recording_notifier() -> (Arc<dyn Notifier>, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let notifier = move |msg: &str, kind: NotificationKind| {
            sink.lock().unwrap().push((msg.to_string(), kind));
        };
        (Arc::new(notifier), seen)
    }

    fn client(http: FakeHttp) -> ApiClient<Arc<FakeHttp>> {
        ApiClient::from_cookies(Arc::new(http), "https://site.test", "sessionid=s; csrftoken=tok-1")
    }

    fn json_body(req: &HttpRequest) -> serde_json::Value {
        match &req.body {
            Some(RequestBody::Json(bytes)) => serde_json::from_slice(bytes).unwrap(),
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_csrf_header_on_mutating_requests_only() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::from_cookies(http.clone(), "https://site.test", "csrftoken=tok-1");

        api.get("/items/", &[]).await.unwrap();
        assert_eq!(http.last().header(CSRF_HEADER), None);

        for method in [Method::Post, Method::Put, Method::Patch, Method::Delete] {
            api.request(method, "/items/1", NO_BODY, &[]).await.unwrap();
            let req = http.last();
            assert_eq!(req.method, method);
            assert_eq!(req.header(CSRF_HEADER), Some("tok-1"), "{} lacks CSRF header", method);
        }
    }

    #[tokio::test]
    async fn test_no_csrf_header_without_token() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::from_cookies(http.clone(), "https://site.test", "sessionid=s");
        assert!(api.csrf_token().is_none());

        api.post("/items/", Some(&json!({"a": 1})), &[]).await.unwrap();
        assert_eq!(http.last().header(CSRF_HEADER), None);
    }

    #[tokio::test]
    async fn test_default_headers_and_url() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::new(http.clone(), "https://site.test/");

        api.get("/items/", &[]).await.unwrap();
        let req = http.last();
        assert_eq!(req.url, "https://site.test/api/items/");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("X-Requested-With"), Some("XMLHttpRequest"));
    }

    #[tokio::test]
    async fn test_extra_headers_override_defaults() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::new(http.clone(), "https://site.test");

        api.get("/items/", &[("content-type", "text/csv"), ("Accept-Language", "fr")])
            .await
            .unwrap();
        let req = http.last();
        assert_eq!(req.header("Content-Type"), Some("text/csv"));
        assert_eq!(req.header("Accept-Language"), Some("fr"));
        let content_types = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(content_types, 1);
    }

    #[tokio::test]
    async fn test_get_never_sends_body() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!([])));
        let api = ApiClient::new(http.clone(), "https://site.test");

        api.request(Method::Get, "/items/", Some(&json!({"q": 1})), &[])
            .await
            .unwrap();
        assert!(http.last().body.is_none());
    }

    #[tokio::test]
    async fn test_body_matches_json_stringify() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::new(http.clone(), "https://site.test");

        let payload = json!({"name": "x", "tags": ["a", "b"], "nested": {"z": 1, "a": null}});
        api.put("/items/1", Some(&payload), &[]).await.unwrap();

        match http.last().body {
            Some(RequestBody::Json(bytes)) => assert_eq!(
                String::from_utf8(bytes).unwrap(),
                r#"{"name":"x","tags":["a","b"],"nested":{"z":1,"a":null}}"#
            ),
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_created_resolves_to_echoed_body() {
        let http = FakeHttp::json(201, "Created", json!({"id": 1, "name": "x"}));
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier);

        let body = api.post("/items/", Some(&json!({"name": "x"})), &[]).await.unwrap();

        assert_eq!(body, ResponseBody::Json(json!({"id": 1, "name": "x"})));
        assert_eq!(json_body(&api.http().last()), json!({"name": "x"}));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_rejects_with_status_and_body() {
        let http = FakeHttp::json(404, "Not Found", json!({"message": "not found"}));
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier);

        let err = api.get("/items/999", &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&ResponseBody::Json(json!({"message": "not found"}))));
        assert_eq!(err.to_string(), "404 Not Found");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("not found".to_string(), NotificationKind::Error)]
        );
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let http = FakeHttp::json(500, "Internal Server Error", json!({"detail": "boom"}));
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier);

        let err = api.delete("/items/1", NO_BODY, &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(error_messages::REQUEST_FAILED.to_string(), NotificationKind::Error)]
        );
    }

    #[tokio::test]
    async fn test_error_field_feeds_banner_when_message_missing() {
        let http = FakeHttp::json(403, "Forbidden", json!({"success": false, "error": "not yours"}));
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier.clone());

        api.post("/items/1", NO_BODY, &[]).await.unwrap_err();
        assert_eq!(seen.lock().unwrap()[0].0, error_messages::REQUEST_FAILED);

        let http = FakeHttp::json(403, "Forbidden", json!({"success": false, "error": "not yours"}));
        let api = client(http).with_notifier(notifier).with_error_field("error");

        api.post("/items/1", NO_BODY, &[]).await.unwrap_err();
        assert_eq!(seen.lock().unwrap()[1].0, "not yours");
    }

    #[tokio::test]
    async fn test_message_wins_over_error_field() {
        let http = FakeHttp::json(400, "Bad Request", json!({"message": "m", "error": "e"}));
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier).with_error_field("error");

        api.post("/items/", NO_BODY, &[]).await.unwrap_err();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("m".to_string(), NotificationKind::Error)]
        );
    }

    #[tokio::test]
    async fn test_empty_csrf_cookie_sends_no_header() {
        let http = Arc::new(FakeHttp::json(200, "OK", json!({})));
        let api = ApiClient::from_cookies(http.clone(), "https://site.test", "sessionid=s; csrftoken=");
        assert!(api.csrf_token().is_none());

        api.post("/items/", NO_BODY, &[]).await.unwrap();
        assert_eq!(http.last().header(CSRF_HEADER), None);
    }

    #[tokio::test]
    async fn test_text_body_is_never_parsed() {
        let http = FakeHttp::answering(200, "OK", Some("text/plain"), "{not json");
        let api = client(http);

        let body = api.get("/export", &[]).await.unwrap();
        assert_eq!(body, ResponseBody::Text("{not json".into()));
    }

    #[tokio::test]
    async fn test_text_error_body_is_kept_raw() {
        let http = FakeHttp::answering(502, "Bad Gateway", Some("text/html"), "<h1>502</h1>");
        let api = client(http);

        let err = api.patch("/items/1", Some(&json!({})), &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.body(), Some(&ResponseBody::Text("<h1>502</h1>".into())));
    }

    #[tokio::test]
    async fn test_network_failure_has_no_status_and_notifies() {
        let (notifier, seen) = recording_notifier();
        let api = client(FakeHttp::unreachable()).with_notifier(notifier);

        let err = api.get("/items/", &[]).await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.status(), None);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let http = FakeHttp::answering(200, "OK", Some("application/json"), "{oops");
        let api = client(http);

        let err = api.get("/items/", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_empty_json_body_is_null() {
        let http = FakeHttp::answering(204, "No Content", Some("application/json"), "");
        let api = client(http);

        let body = api.delete("/items/1", NO_BODY, &[]).await.unwrap();
        assert_eq!(body, ResponseBody::Json(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_upload_with_file_has_exactly_one_file_part() {
        let http = FakeHttp::json(201, "Created", json!({"ok": true}));
        let api = client(http);

        let file = FileUpload::new("cat.png", vec![0x89, 0x50]).with_content_type("image/png");
        api.upload_file("/photos/", &[("title", "cat")], "image", Some(file), &[])
            .await
            .unwrap();

        let req = api.http().last();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header(CSRF_HEADER), Some("tok-1"));
        assert_eq!(req.header("Content-Type"), None);
        match req.body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.fields(), &[("title".to_string(), "cat".to_string())]);
                let part = form.file_part().expect("file part");
                assert_eq!(part.field_name, "image");
                assert_eq!(part.file.file_name, "cat.png");
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_without_file_sends_fields_only() {
        let http = FakeHttp::json(200, "OK", json!({}));
        let api = client(http);

        api.upload_file("/photos/", &[("title", "cat"), ("alt", "a cat")], "image", None, &[])
            .await
            .unwrap();

        match api.http().last().body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.fields().len(), 2);
                assert!(form.file_part().is_none());
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_uses_upload_fallback() {
        let http = FakeHttp::answering(413, "Payload Too Large", None, "");
        let (notifier, seen) = recording_notifier();
        let api = client(http).with_notifier(notifier);

        let err = api
            .upload_file("/photos/", &[], "image", None, &[])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(413));
        assert_eq!(seen.lock().unwrap()[0].0, error_messages::UPLOAD_FAILED);
    }

    #[test]
    fn test_prefix_and_endpoint_joining() {
        let api = ApiClient::new(FakeHttp::json(200, "OK", json!({})), "http://localhost:8000");
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(api.url("items/"), "http://localhost:8000/api/items/");

        let site = api.with_prefix("");
        assert_eq!(site.url("/comment/3/like/"), "http://localhost:8000/comment/3/like/");

        let v2 = site.with_prefix("/api/v2/");
        assert_eq!(v2.base_url(), "http://localhost:8000/api/v2");
    }
}
