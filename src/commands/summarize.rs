use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::error::Error;
use crate::output;
use crate::parsers::{self, LogOptions};

pub const DEFAULT_LOG_PATH: &str = "build.log";

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Build log to read
    #[arg(default_value = DEFAULT_LOG_PATH)]
    pub log: PathBuf,

    /// Output format [json|text]
    #[arg(short, long, default_value = "json", value_parser = ["json", "text"])]
    pub format: String,

    /// Output file (default stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefix of lines naming the current file
    #[arg(long)]
    pub file_marker: Option<String>,

    /// Prefix of warning entry lines
    #[arg(long)]
    pub line_marker: Option<String>,

    /// Drop warnings for files matching this glob (repeatable)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,
}

pub fn run(args: SummarizeArgs, config: &Config) -> Result<()> {
    let mut markers = config.summarize.markers.clone();
    if let Some(m) = args.file_marker {
        markers.file_marker = m;
    }
    if let Some(m) = args.line_marker {
        markers.line_marker = m;
    }

    let mut exclude = config.summarize.exclude.clone();
    exclude.extend(args.exclude);

    let options = LogOptions::new(markers, &exclude)?;

    tracing::info!("summarizing {}", args.log.display());
    let summary = match parsers::summarize_file(&args.log, &options) {
        Ok(s) => s,
        Err(Error::LogNotFound(p)) => anyhow::bail!("{} not found", p.display()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read log: {}", args.log.display()))
        }
    };
    tracing::info!(
        "{} warnings across {} files",
        summary.total_warnings,
        summary.file_count()
    );

    let s = if args.format == "json" {
        output::format_json_summary(&summary)?
    } else {
        output::format_text_summary(&summary)
    };

    if let Some(p) = args.output {
        std::fs::write(&p, s).with_context(|| format!("failed to write output: {}", p.display()))?;
    } else {
        println!("{}", s);
    }

    Ok(())
}
