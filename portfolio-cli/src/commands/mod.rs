// portfolio-cli/src/commands/mod.rs
pub mod api;
pub mod comments;
pub mod likes;
pub mod notifications;
pub mod search;
pub mod setup;

pub use api::{handle_api, handle_upload, ApiArgs, UploadArgs};
pub use comments::{handle_comments, CommentCommands};
pub use likes::{handle_likes, LikeCommands};
pub use notifications::{handle_notifications, NotificationCommands};
pub use search::{handle_search, SearchArgs};
pub use setup::run_setup;

use anyhow::{anyhow, Result};
use portfolio_api::FileUpload;
use std::path::Path;

/// Read a file from disk for attaching to a form, guessing its media type
pub async fn read_upload(path: &Path) -> Result<FileUpload> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file path: {}", path.display()))?;

    let mut upload = FileUpload::new(file_name, data);
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        upload = upload.with_content_type(mime);
    }
    Ok(upload)
}

/// Parse `name=value` / `Name: value` pairs given on the command line
pub fn parse_pair(raw: &str, separator: char) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(separator)
        .ok_or_else(|| anyhow!("Expected '<name>{}<value>', got '{}'", separator, raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Empty name in '{}'", raw));
    }
    Ok((name.to_string(), value.trim_start().to_string()))
}
