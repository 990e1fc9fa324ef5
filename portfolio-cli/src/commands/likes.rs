// portfolio-cli/src/commands/likes.rs
use crate::output::{print_response, Response};
use anyhow::Result;
use portfolio_client::{LikeState, PortfolioClient};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum LikeCommands {
    /// Like or unlike a project
    Project {
        /// Project ID
        id: u64,
    },
    /// Like or unlike a comment, starting from the state currently shown
    Comment {
        /// Comment ID
        id: u64,
        /// The comment is currently liked
        #[arg(long)]
        liked: bool,
        /// Like count currently shown
        #[arg(long, default_value = "0")]
        count: u64,
    },
}

pub async fn handle_likes(client: &PortfolioClient, cmd: LikeCommands) -> Result<()> {
    match cmd {
        LikeCommands::Project { id } => {
            let status = client.toggle_project_like(id).await?;
            print_response(&Response::ok(status))
        }
        LikeCommands::Comment { id, liked, count } => {
            let mut state = LikeState::new(liked, count);
            client.toggle_comment_like(id, &mut state).await?;
            print_response(&Response::ok(state))
        }
    }
}
