use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{Config, TOKEN_ENV};
use crate::upload::{UploadRequest, Uploader};

pub const DEFAULT_REPORT_PATH: &str = "report.txt";

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Report file to upload
    #[arg(default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// API endpoint receiving the form POST
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Channel to post to (repeatable)
    #[arg(short, long = "channel")]
    pub channels: Vec<String>,

    /// Auth token (falls back to $WARNSUM_TOKEN, then the config file)
    #[arg(long)]
    pub token: Option<String>,
}

pub fn run(args: UploadArgs, config: &Config) -> Result<()> {
    let token = args
        .token
        .or_else(|| std::env::var(TOKEN_ENV).ok())
        .or_else(|| config.upload.token.clone())
        .unwrap_or_default();
    if token.is_empty() {
        tracing::warn!("no upload token configured; sending an empty token");
    }

    let channels = if args.channels.is_empty() {
        config.upload.channels.clone()
    } else {
        args.channels
    };
    let endpoint = args.endpoint.unwrap_or_else(|| config.upload.endpoint.clone());

    let request = UploadRequest::from_file(&args.report, token, channels)
        .with_context(|| format!("failed to read report: {}", args.report.display()))?;

    let uploader = Uploader::new(endpoint).context("failed to create HTTP client")?;
    let outcome = uploader
        .send(&request)
        .with_context(|| format!("upload to {} failed", uploader.endpoint()))?;

    if !outcome.is_delivered() {
        tracing::warn!("upload rejected by {}", uploader.endpoint());
    }
    println!("{}", outcome.render());

    Ok(())
}
