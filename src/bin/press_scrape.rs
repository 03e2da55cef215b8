//! Command line front end.
//!
//! Prints JSON on stdout; logs go to stderr (`RUST_LOG`, default `press_scrape=info`).

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use press_scrape::{
    scrape_html, validate_embed_urls, Ingestor, Options, PageFetcher, Suggester, UrlValidator, ValidationResult,
    WirePayload,
};

#[derive(Parser, Debug)]
#[command(name = "press-scrape", version, about = "Capture a web page as a post suggestion")]
struct Cli {
    /// Page fetch timeout in seconds
    #[arg(long, global = true, env = "PRESS_SCRAPE_TIMEOUT", default_value_t = 15)]
    timeout: u64,

    /// Turn off remote page fetching
    #[arg(long, global = true, default_value_t = false)]
    no_fetch: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page and print its title, description, canonical link, images and embeds
    Fetch {
        url: String,
    },
    /// Build a suggestion from local HTML
    Parse {
        /// URL the HTML was loaded from
        #[arg(long)]
        url: String,

        /// Selected text to quote
        #[arg(long)]
        selection: Option<String>,

        /// HTML file, or `-` for stdin
        #[arg(default_value = "-")]
        file: String,
    },
    /// Normalize embed URLs and print the accepted ones
    Embeds {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Check a URL against the safety validator
    Check {
        url: String,
    },
}

fn read_input(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        let bytes = fs::read(file)?;
        Ok(press_scrape::encoding::transcode(&bytes, None))
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("press_scrape=info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = Options::default();
    options.fetch.timeout = Duration::from_secs(cli.timeout);
    options.fetch.enabled = !cli.no_fetch;

    match cli.command {
        Command::Fetch { url } => {
            let fetcher = PageFetcher::new(options)?;
            match fetcher.fetch_and_extract(&url).await {
                Ok(metadata) => print_json(&metadata)?,
                Err(err) => {
                    warn!(url = %url, error = %err, "fetch failed");
                    print_json(&json!({
                        "error": err.code(),
                        "message": err.user_message(),
                        "status": err.status_code(),
                    }))?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Parse { url, selection, file } => {
            let html = read_input(&file)?;
            let raw = scrape_html(&html, &url, selection.as_deref(), &options.limits);
            let data = Ingestor::new(&options).ingest_one(&WirePayload::from(&raw));
            print_json(&Suggester::new(&options).build(&data))?;
        }
        Command::Embeds { urls } => {
            print_json(&validate_embed_urls(&urls))?;
        }
        Command::Check { url } => {
            let validator = UrlValidator::default();
            let result = validator.validate(&url).await;
            let reason = match &result {
                ValidationResult::Allowed => None,
                ValidationResult::Blocked(reason) => Some(reason.code()),
            };
            print_json(&json!({
                "url": url,
                "allowed": result.is_allowed(),
                "reason": reason,
            }))?;
            if !result.is_allowed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
