mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    ApiArgs, CommentCommands, LikeCommands, NotificationCommands, SearchArgs, UploadArgs,
};
use output::{print_response, BannerNotifier, ErrorResponse, ExitCode, Response};
use portfolio_client::{Config, PortfolioClient};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "A command-line client for the portfolio site", long_about = None)]
struct Cli {
    /// Override the site URL from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project and comment likes
    #[command(subcommand)]
    Like(LikeCommands),
    /// Comments and replies
    #[command(subcommand)]
    Comment(CommentCommands),
    /// Notification inbox
    #[command(subcommand)]
    Notifications(NotificationCommands),
    /// Search projects
    Search(SearchArgs),
    /// Raw JSON API request
    Api(ApiArgs),
    /// Multipart upload to the JSON API
    Upload(UploadArgs),
    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Interactive setup
    Setup,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the active configuration (cookies masked)
    Show,
    /// Print the config file location
    Path,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PORTFOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            let resp = Response::<()>::error(ErrorResponse::from_error(&e));
            if let Err(print_err) = print_response(&resp) {
                eprintln!("Error: {}", print_err);
            }
            ExitCode::for_error(&e).code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.site.base_url = base_url;
    }
    debug!(base_url = %config.site.base_url, "loaded configuration");

    let client = PortfolioClient::new(&config, Arc::new(BannerNotifier));

    match cli.command {
        Commands::Like(cmd) => commands::handle_likes(&client, cmd).await?,
        Commands::Comment(cmd) => commands::handle_comments(&client, cmd).await?,
        Commands::Notifications(cmd) => commands::handle_notifications(&client, cmd).await?,
        Commands::Search(args) => commands::handle_search(&client, args).await?,
        Commands::Api(args) => commands::handle_api(&client, args).await?,
        Commands::Upload(args) => commands::handle_upload(&client, args).await?,
        Commands::Config(cmd) => handle_config(&config, cmd)?,
        Commands::Setup => return commands::run_setup().await,
    }

    Ok(ExitCode::Success.code())
}

fn handle_config(config: &Config, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let cookies = config.session.cookies.as_deref().map(mask_cookies);
            let resp = Response::ok(serde_json::json!({
                "base_url": config.site.base_url,
                "api_prefix": config.site.api_prefix,
                "cookies": cookies,
            }));
            print_response(&resp)
        }
        ConfigCommands::Path => {
            let resp = Response::ok(serde_json::json!({
                "path": Config::path()?.display().to_string()
            }));
            print_response(&resp)
        }
    }
}

/// Keep cookie names, hide their values
fn mask_cookies(cookies: &str) -> String {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, _)| format!("{}=***", name))
        .collect::<Vec<_>>()
        .join("; ")
}
