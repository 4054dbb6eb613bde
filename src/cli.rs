// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one subcommand today:
//   site-analyzer analyze <site_url> [--json] [--timeout <secs>] [--verbose]
//
// Rust concepts:
// - Derive macros: clap writes the argument parser from these structs
// =============================================================================

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::site::FetchSettings;

#[derive(Parser, Debug)]
#[command(
    name = "site-analyzer",
    version,
    about = "Analyze a site's site.json manifest and list its content",
    long_about = "site-analyzer resolves a site address to its site.json manifest, fetches it, \
                  and shows the site summary plus one card per content item."
)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a site's manifest and show its summary and content cards
    ///
    /// Example: site-analyzer analyze example.com/docs
    Analyze {
        /// Site address; "https://" and "/site.json" are added when missing
        site_url: String,

        /// Output a JSON report instead of the text page
        #[arg(long)]
        json: bool,

        /// Give up on the manifest request after this many seconds
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
}

// Builds request settings from the --timeout flag
pub fn fetch_settings(timeout_secs: u64) -> FetchSettings {
    FetchSettings {
        request_timeout: Duration::from_secs(timeout_secs),
        ..FetchSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["site-analyzer", "analyze", "example.com"]).unwrap();

        assert!(!cli.verbose);
        match cli.command {
            Commands::Analyze {
                site_url,
                json,
                timeout,
            } => {
                assert_eq!(site_url, "example.com");
                assert!(!json);
                assert_eq!(timeout, 10);
            }
        }
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "site-analyzer",
            "analyze",
            "example.com",
            "--json",
            "--timeout",
            "3",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Analyze { json, timeout, .. } = cli.command;
        assert!(json);
        assert_eq!(fetch_settings(timeout).request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["site-analyzer", "analyze", "x.com", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
