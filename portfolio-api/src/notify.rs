// portfolio-api/src/notify.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Surface that shows transient messages to the user.
///
/// Calls are fire-and-forget: implementations must not panic and have no way
/// to influence the operation that triggered them.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str, _kind: NotificationKind) {}
}

impl<F> Notifier for F
where
    F: Fn(&str, NotificationKind) + Send + Sync,
{
    fn notify(&self, message: &str, kind: NotificationKind) {
        self(message, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_is_a_notifier() {
        let seen = Mutex::new(Vec::new());
        let notifier = |msg: &str, kind: NotificationKind| {
            seen.lock().unwrap().push((msg.to_string(), kind));
        };
        notifier.notify("saved", NotificationKind::Success);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![("saved".to_string(), NotificationKind::Success)]
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(NotificationKind::Error.to_string(), "error");
    }
}
