// portfolio-cli/src/output.rs
use portfolio_api::{ApiError, NotificationKind, Notifier};
use serde::Serialize;

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
}

impl ErrorResponse {
    pub fn safety_rejected(message: String) -> Self {
        Self {
            type_: "safety_rejected",
            message,
            status: None,
            body: None,
            retryable: Some(false),
        }
    }

    /// Describe any command failure, keeping HTTP details when there are some
    pub fn from_error(err: &anyhow::Error) -> Self {
        let Some(api_err) = err.downcast_ref::<ApiError>() else {
            return Self {
                type_: "failed",
                message: err.to_string(),
                status: None,
                body: None,
                retryable: Some(false),
            };
        };

        let type_ = match api_err {
            ApiError::Network { .. } => "network_error",
            ApiError::Http { status: 404, .. } => "not_found",
            ApiError::Http { status: 401 | 403, .. } => "forbidden",
            ApiError::Http { .. } => "http_error",
            ApiError::Decode { .. } => "invalid_response",
            ApiError::Serialization(_) => "invalid_request",
        };

        Self {
            type_,
            message: api_err.to_string(),
            status: api_err.status(),
            body: api_err.body().and_then(|b| serde_json::to_value(b).ok()),
            retryable: Some(ExitCode::for_error(err) == ExitCode::TransientError),
        }
    }
}

/// Exit codes for agent decision making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    TransientError = 1,
    PermanentError = 2,
    SafetyRejected = 3,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Network failures and 5xx may succeed later; everything else will not
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Network { .. }) => Self::TransientError,
            Some(ApiError::Http { status, .. }) if *status >= 500 => Self::TransientError,
            _ => Self::PermanentError,
        }
    }
}

// Print response to stdout
pub fn print_response<T: Serialize>(resp: &Response<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_line(&format!("{} {}", console::style("✓").green(), message));
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_line(&format!("{} {}", console::style("Error:").red(), message));
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_line(&format!("{} {}", console::style("Warning:").yellow(), message));
}

/// Print a styled info message
pub fn print_info(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_line(&format!("{} {}", console::style("Info:").cyan(), message));
}

/// Shows notifications as one-line banners on stderr, keeping stdout for JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerNotifier;

impl Notifier for BannerNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => print_success(message),
            NotificationKind::Error => print_error(message),
            NotificationKind::Warning => print_warning(message),
            NotificationKind::Info => print_info(message),
        }
    }
}
