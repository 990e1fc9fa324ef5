// portfolio-api/src/lib.rs
//! HTTP client for the portfolio site's JSON API.
//!
//! [`ApiClient`] builds requests (JSON or multipart), attaches the session's
//! CSRF token to mutating calls, classifies responses by status and content
//! type, and reports failures to an injected [`Notifier`]. The network side
//! sits behind the [`HttpClient`] trait; [`ReqwestClient`] is the default.

pub mod client;
pub mod csrf;
pub mod error;
pub mod http;
pub mod multipart;
pub mod notify;
pub mod types;

pub use client::{classify, ApiClient, Headers, AJAX_HEADER, DEFAULT_API_PREFIX, NO_BODY};
pub use csrf::{cookie_value, CsrfToken, CSRF_COOKIE_NAME, CSRF_HEADER};
pub use error::ApiError;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, Method, RequestBody};
pub use multipart::{FilePart, FileUpload, MultipartForm};
pub use notify::{NoopNotifier, NotificationKind, Notifier};
pub use types::{is_json_content_type, ResponseBody};

// Re-export error copy separately
pub use error::error_messages;

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
