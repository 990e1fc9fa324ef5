// portfolio-client/src/models.rs
use serde::{Deserialize, Serialize};

/// `{success, message?, error?, errors?}` answer of the site's AJAX views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Form validation errors, either a field map or a plain string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditedComment {
    pub new_text: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Replies {
    pub replies_html: String,
    #[serde(default)]
    pub replies_count: u64,
}

/// A freshly posted comment or reply, with its rendered markup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostedComment {
    #[serde(alias = "comment_id", alias = "reply_id")]
    pub id: u64,
    #[serde(alias = "comment_html", alias = "reply_html")]
    pub html: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub unread_count: u64,
}
