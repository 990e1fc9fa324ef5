// portfolio-api/src/types.rs
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Body of a response: parsed JSON when the server said so, raw text otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            ResponseBody::Json(_) => None,
        }
    }

    /// The `message` string of a JSON object body, if any
    pub fn message(&self) -> Option<&str> {
        self.field_str("message")
    }

    /// A string field of a JSON object body
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.as_json()?.get(key)?.as_str()
    }

    /// Deserialize a JSON body into `T`. Text bodies are offered to `T` as a
    /// JSON string.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        match self {
            ResponseBody::Json(v) => serde_json::from_value(v),
            ResponseBody::Text(s) => serde_json::from_value(serde_json::Value::String(s)),
        }
    }

    /// Like [`ResponseBody::deserialize`], reporting failure as [`ApiError::Decode`]
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        self.deserialize().map_err(|e| ApiError::Decode {
            status: None,
            message: e.to_string(),
        })
    }

    pub fn into_text(self) -> String {
        match self {
            ResponseBody::Text(s) => s,
            ResponseBody::Json(v) => v.to_string(),
        }
    }
}

impl From<serde_json::Value> for ResponseBody {
    fn from(value: serde_json::Value) -> Self {
        ResponseBody::Json(value)
    }
}

impl From<String> for ResponseBody {
    fn from(value: String) -> Self {
        ResponseBody::Text(value)
    }
}

/// Content types that mark a body as JSON
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_message_only_from_json_objects() {
        let body = ResponseBody::Json(json!({"message": "not found"}));
        assert_eq!(body.message(), Some("not found"));

        let text = ResponseBody::Text(r#"{"message": "not found"}"#.into());
        assert_eq!(text.message(), None);

        let non_string = ResponseBody::Json(json!({"message": 42}));
        assert_eq!(non_string.message(), None);
    }

    #[test]
    fn test_deserialize_json_body() {
        #[derive(Deserialize)]
        struct Item {
            id: u64,
            name: String,
        }

        let item: Item = ResponseBody::Json(json!({"id": 1, "name": "x"}))
            .deserialize()
            .unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.name, "x");
    }

    #[test]
    fn test_text_deserializes_as_string() {
        let html: String = ResponseBody::Text("<p>hi</p>".into()).deserialize().unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_decode_failure_is_api_error() {
        let err = ResponseBody::Text("nope".into()).decode::<Vec<u8>>().unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: None, .. }));
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("application/json; charset=utf-8")));
        assert!(is_json_content_type(Some("Application/JSON")));
        assert!(!is_json_content_type(Some("text/plain")));
        assert!(!is_json_content_type(Some("text/html; charset=utf-8")));
        assert!(!is_json_content_type(None));
    }
}
