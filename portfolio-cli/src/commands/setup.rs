// portfolio-cli/src/commands/setup.rs
use crate::output::ExitCode;
use anyhow::Result;
use dialoguer::{Input, Password};
use portfolio_api::NoopNotifier;
use portfolio_client::{Config, PortfolioClient, SessionConfig, SiteConfig};
use std::sync::Arc;

/// Run the interactive setup command
pub async fn run_setup() -> Result<i32> {
    println!("Portfolio CLI Setup");
    println!();

    let current = Config::load()?;

    let base_url: String = Input::new()
        .with_prompt("Site URL")
        .default(current.site.base_url.clone())
        .interact_text()?;

    // Prompt for the browser session
    let cookies = Password::new()
        .with_prompt("Paste your session cookies (sessionid=...; csrftoken=...)")
        .interact()?;

    if cookies.is_empty() {
        eprintln!("Error: session cookies cannot be empty");
        return Ok(ExitCode::PermanentError.code());
    }

    let config = Config {
        site: SiteConfig {
            base_url,
            api_prefix: current.site.api_prefix,
        },
        session: SessionConfig {
            cookies: Some(cookies),
        },
    };

    println!();
    println!("Validating session...");

    // Unread count needs a logged-in session
    let client = PortfolioClient::new(&config, Arc::new(NoopNotifier));
    match client.unread_notification_count().await {
        Ok(count) => {
            if let Err(e) = config.save() {
                eprintln!("Error: Couldn't write config file: {}", e);
                return Ok(ExitCode::PermanentError.code());
            }

            println!("Session saved! {} unread notification(s).", count);
            println!();
            println!("Try: portfolio notifications count");

            Ok(ExitCode::Success.code())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Log in to the site in your browser and copy the cookies");
            eprintln!("of an authenticated request.");
            Ok(ExitCode::PermanentError.code())
        }
    }
}
