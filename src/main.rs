// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and the component registry (once, at startup)
// 3. Run the analysis: resolve URL -> fetch manifest -> render
// 4. Exit with proper code (0 = site loaded, 1 = analysis failed, 2 = error)
// =============================================================================

mod cli;
mod error;
mod logging;
mod render;
mod site;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use render::{ComponentRegistry, Props, Report, SEARCH_TAG};
use site::{FetchState, ManifestClient, SiteFetcher};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error (not a failed analysis): exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = manifest loaded
//   Ok(1) = invalid URL, request failed, or manifest unreadable
//   Err   = something unexpected
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let registry = ComponentRegistry::with_defaults()?;

    match cli.command {
        Commands::Analyze {
            site_url,
            json,
            timeout,
        } => handle_analyze(&registry, &site_url, json, timeout).await,
    }
}

// Handles the 'analyze' subcommand
async fn handle_analyze(
    registry: &ComponentRegistry,
    site_url: &str,
    json: bool,
    timeout_secs: u64,
) -> Result<i32> {
    let client = ManifestClient::new(&cli::fetch_settings(timeout_secs))
        .context("could not build HTTP client")?;

    let mut fetcher = SiteFetcher::new();
    fetcher.analyze(site_url, &client).await;

    print_page(registry, &fetcher, json)?;

    match fetcher.state() {
        FetchState::Loaded { .. } => Ok(0),
        _ => Ok(1),
    }
}

// Prints the result either as the text page or as a JSON report
fn print_page(registry: &ComponentRegistry, fetcher: &SiteFetcher, json: bool) -> Result<()> {
    if json {
        let report = Report::from_fetcher(fetcher);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut page = String::new();
        registry.render(SEARCH_TAG, Props::Search(fetcher), &mut page)?;
        print!("{}", page);
    }
    Ok(())
}
