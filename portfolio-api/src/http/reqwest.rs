// portfolio-api/src/http/reqwest.rs
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, Method, RequestBody};
use crate::multipart::MultipartForm;
use async_trait::async_trait;

#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    cookie_header: Option<String>,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            cookie_header: None,
        }
    }

    /// Send this cookie header with every request, the way a browser
    /// includes same-origin credentials
    pub fn with_cookies(mut self, cookie_header: String) -> Self {
        if !cookie_header.trim().is_empty() {
            self.cookie_header = Some(cookie_header);
        }
        self
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "reqwest")]
fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(feature = "reqwest")]
fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, HttpError> {
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields() {
        out = out.text(name.clone(), value.clone());
    }

    if let Some(part) = form.file_part() {
        let mut file = reqwest::multipart::Part::bytes(part.file.data.clone())
            .file_name(part.file.file_name.clone());
        if let Some(mime) = &part.file.content_type {
            file = file.mime_str(mime).map_err(|e| HttpError {
                status: None,
                message: format!("invalid content type '{}': {}", mime, e),
            })?;
        }
        out = out.part(part.field_name.clone(), file);
    }

    Ok(out)
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req = self
            .inner
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(cookies) = &self.cookie_header {
            req = req.header(reqwest::header::COOKIE, cookies.as_str());
        }

        req = match request.body {
            Some(RequestBody::Json(bytes)) => req.body(bytes),
            Some(RequestBody::Multipart(form)) => req.multipart(to_reqwest_form(form)?),
            None => req,
        };

        let resp = req.send().await.map_err(|e| HttpError {
            status: None,
            message: e.to_string(),
        })?;

        let status = resp.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status_code),
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            status: status_code,
            status_text,
            content_type,
            body: bytes,
        })
    }
}
