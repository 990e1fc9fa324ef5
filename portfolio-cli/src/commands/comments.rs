// portfolio-cli/src/commands/comments.rs
use super::read_upload;
use crate::output::{print_response, ErrorResponse, ExitCode, Response};
use anyhow::Result;
use portfolio_client::PortfolioClient;
use std::path::PathBuf;

#[derive(clap::Subcommand, Clone, Debug)]
pub enum CommentCommands {
    /// Comment on a project
    Add {
        /// Project ID
        project_id: u64,
        /// Comment text
        text: String,
        /// Image to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Reply to a comment
    Reply {
        /// Comment ID
        comment_id: u64,
        /// Reply text
        text: String,
        /// Image to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Replace the text of one of your comments
    Edit {
        /// Comment ID
        id: u64,
        /// New text
        text: String,
        /// Replacement image
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a comment
    Delete {
        /// Comment ID
        id: u64,
        /// Confirm destructive operation
        #[arg(long)]
        force: bool,
    },
    /// Report a comment as inappropriate
    Report {
        /// Comment ID
        id: u64,
    },
    /// Show the replies to a comment
    Replies {
        /// Comment ID
        id: u64,
    },
}

pub async fn handle_comments(client: &PortfolioClient, cmd: CommentCommands) -> Result<()> {
    match cmd {
        CommentCommands::Add {
            project_id,
            text,
            image,
        } => {
            let image = match image {
                Some(path) => Some(read_upload(&path).await?),
                None => None,
            };
            let posted = client.add_comment(project_id, &text, image).await?;
            print_response(&Response::ok(posted))
        }
        CommentCommands::Reply {
            comment_id,
            text,
            image,
        } => {
            let image = match image {
                Some(path) => Some(read_upload(&path).await?),
                None => None,
            };
            let posted = client.add_reply(comment_id, &text, image).await?;
            print_response(&Response::ok(posted))
        }
        CommentCommands::Edit { id, text, image } => {
            let image = match image {
                Some(path) => Some(read_upload(&path).await?),
                None => None,
            };
            let edited = client.edit_comment(id, &text, image).await?;
            print_response(&Response::ok(edited))
        }
        CommentCommands::Delete { id, force } => {
            if !force {
                let resp = Response::<()>::error(ErrorResponse::safety_rejected(format!(
                    "Deleting comment {} cannot be undone; pass --force to confirm",
                    id
                )));
                print_response(&resp)?;
                std::process::exit(ExitCode::SafetyRejected.code());
            }
            let result = client.delete_comment(id).await?;
            print_response(&Response::ok(result))
        }
        CommentCommands::Report { id } => {
            let result = client.report_comment(id).await?;
            print_response(&Response::ok(result))
        }
        CommentCommands::Replies { id } => {
            let replies = client.comment_replies(id).await?;
            print_response(&Response::ok(replies))
        }
    }
}
