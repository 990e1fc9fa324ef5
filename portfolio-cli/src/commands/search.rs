// portfolio-cli/src/commands/search.rs
use crate::output::{print_response, Response};
use anyhow::Result;
use portfolio_client::{PortfolioClient, ProjectSearch};

#[derive(clap::Args, Clone, Debug)]
pub struct SearchArgs {
    /// Text matched against title, description and technologies
    query: Option<String>,
    /// Category ID
    #[arg(long)]
    category: Option<u64>,
    /// Tag ID
    #[arg(long)]
    tag: Option<u64>,
    /// Project status
    #[arg(long)]
    status: Option<String>,
    /// Result page
    #[arg(long)]
    page: Option<u32>,
}

pub async fn handle_search(client: &PortfolioClient, args: SearchArgs) -> Result<()> {
    let search = ProjectSearch {
        search: args.query,
        category: args.category,
        tag: args.tag,
        status: args.status,
        page: args.page,
    };
    let html = client.search_projects(&search).await?;
    print_response(&Response::ok(serde_json::json!({ "html": html })))
}
