mod commands;
mod config;
mod error;
mod models;
mod output;
mod parsers;
mod upload;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./warnsum.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Group build log warnings by file and error token, emitting JSON
    Summarize(commands::summarize::SummarizeArgs),

    /// Upload a text report to a messaging API
    Upload(commands::upload::UploadArgs),

    /// Write a default warnsum.toml
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Init { path, force } => {
            let p = match path {
                Some(p) => p,
                None => std::env::current_dir()?,
            };
            commands::init::run_init(&p, force)
        }
        Commands::Summarize(a) => {
            let config = Config::load(args.config.as_deref())?;
            commands::summarize::run(a, &config)
        }
        Commands::Upload(a) => {
            let config = Config::load(args.config.as_deref())?;
            commands::upload::run(a, &config)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
