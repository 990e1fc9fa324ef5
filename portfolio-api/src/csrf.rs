// portfolio-api/src/csrf.rs
use percent_encoding::percent_decode_str;
use std::fmt;

/// Cookie the server stores its CSRF secret in
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the server expects the CSRF secret back in
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Per-session CSRF secret. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read the token from a `name=value; name=value` cookie header.
    /// Returns `None` when the cookie is absent or empty.
    pub fn from_cookie_header(cookies: &str) -> Option<Self> {
        cookie_value(cookies, CSRF_COOKIE_NAME)
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(<redacted>)")
    }
}

/// Look up one cookie in a cookie header string and percent-decode its value.
/// The first matching cookie wins.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
