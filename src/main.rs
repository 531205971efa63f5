//! favicon-scan main entry point
//!
//! This is the command-line interface for the favicon-scan icon finder.

use anyhow::{bail, Context};
use clap::Parser;
use favicon_scan::config::load_config;
use favicon_scan::{sort_icons, Config, DetectedIcon, FaviconClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// favicon-scan: find the icons a website advertises
///
/// Checks /favicon.ico, the page's <link> and <meta> tags, its Web App
/// Manifest and its browserconfig.xml, then lists the icons found from most
/// to least preferred.
#[derive(Parser, Debug)]
#[command(name = "favicon-scan")]
#[command(version)]
#[command(about = "Find the icons a website advertises", long_about = None)]
struct Cli {
    /// Site to scan
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preferred icon width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Preferred icon height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Only report the preferred icon
    #[arg(short, long)]
    preferred: bool,

    /// Download the icons and report their decoded dimensions
    #[arg(short, long)]
    download: bool,

    /// Print icons as JSON
    #[arg(long, conflicts_with = "download")]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let client = FaviconClient::new(config).context("failed to build HTTP client")?;
    let icons = client.scan(cli.url.as_str()).await?;

    let mut ordered: Vec<DetectedIcon> = sort_icons(&icons, cli.width, cli.height)
        .into_iter()
        .cloned()
        .collect();
    if cli.preferred {
        ordered.truncate(1);
    }

    if ordered.is_empty() {
        bail!("no icons detected for {}", cli.url);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
    } else if cli.download {
        handle_download(&client, &ordered).await;
    } else {
        for icon in &ordered {
            println!("{}", icon);
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("favicon_scan=warn,warn"),
            1 => EnvFilter::new("favicon_scan=info,warn"),
            2 => EnvFilter::new("favicon_scan=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Downloads the icons and prints each outcome
async fn handle_download(client: &FaviconClient, icons: &[DetectedIcon]) {
    let results = client.download(icons).await;

    for (icon, result) in icons.iter().zip(results) {
        match result {
            Ok(downloaded) => println!(
                "{} -> {}x{}",
                icon,
                downloaded.image.width(),
                downloaded.image.height()
            ),
            Err(e) => println!("{} -> error: {}", icon, e),
        }
    }
}
