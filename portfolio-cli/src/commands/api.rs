// portfolio-cli/src/commands/api.rs
use super::{parse_pair, read_upload};
use crate::output::{print_response, Response};
use anyhow::Result;
use portfolio_api::{Method, NO_BODY};
use portfolio_client::PortfolioClient;
use std::path::PathBuf;

/// Raw call against the JSON API
#[derive(clap::Args, Clone, Debug)]
pub struct ApiArgs {
    /// GET, POST, PUT, PATCH or DELETE
    method: Method,
    /// Endpoint below the API prefix, e.g. /items/
    endpoint: String,
    /// JSON body (ignored for GET)
    #[arg(short, long)]
    data: Option<String>,
    /// Extra header, 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
}

/// Multipart upload against the JSON API
#[derive(clap::Args, Clone, Debug)]
pub struct UploadArgs {
    /// Endpoint below the API prefix
    endpoint: String,
    /// Form field, 'name=value' (repeatable)
    #[arg(short, long = "field")]
    fields: Vec<String>,
    /// Name of the file field
    #[arg(long, default_value = "file")]
    file_field: String,
    /// File to attach
    #[arg(long)]
    file: Option<PathBuf>,
    /// Extra header, 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
}

fn parse_all(raw: &[String], separator: char) -> Result<Vec<(String, String)>> {
    raw.iter().map(|r| parse_pair(r, separator)).collect()
}

fn borrowed(pairs: &[(String, String)]) -> Vec<(&str, &str)> {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

pub async fn handle_api(client: &PortfolioClient, args: ApiArgs) -> Result<()> {
    let headers = parse_all(&args.headers, ':')?;
    let body: Option<serde_json::Value> = match &args.data {
        Some(raw) => Some(serde_json::from_str(raw)?),
        None => None,
    };

    let result = match &body {
        Some(value) => {
            client
                .api()
                .request(args.method, &args.endpoint, Some(value), &borrowed(&headers))
                .await?
        }
        None => {
            client
                .api()
                .request(args.method, &args.endpoint, NO_BODY, &borrowed(&headers))
                .await?
        }
    };

    print_response(&Response::ok(result))
}

pub async fn handle_upload(client: &PortfolioClient, args: UploadArgs) -> Result<()> {
    let headers = parse_all(&args.headers, ':')?;
    let fields = parse_all(&args.fields, '=')?;
    let file = match &args.file {
        Some(path) => Some(read_upload(path).await?),
        None => None,
    };

    let result = client
        .api()
        .upload_file(
            &args.endpoint,
            &borrowed(&fields),
            &args.file_field,
            file,
            &borrowed(&headers),
        )
        .await?;

    print_response(&Response::ok(result))
}
