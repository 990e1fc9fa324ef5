pub mod client;
pub mod config;
pub mod like;
pub mod models;
pub mod search;

pub use client::{messages, PortfolioClient};
pub use config::{Config, SessionConfig, SiteConfig};
pub use like::{LikeState, LikeStatus};
pub use models::{ActionResult, EditedComment, PostedComment, Replies, UnreadCount};
pub use search::ProjectSearch;

// Re-export transport types for convenience
pub use portfolio_api::{ApiError, FileUpload, Method, NotificationKind, Notifier, ResponseBody};
