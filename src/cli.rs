//! Command-line interface definitions for Guardian News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Sort order and section fall back to the preference file when not given.

use clap::Parser;
use guardian_news::request::{DEFAULT_SEARCH_TERM, GUARDIAN_SEARCH_ENDPOINT};
use std::num::NonZeroUsize;

/// Command-line arguments for the Guardian News application.
///
/// # Examples
///
/// ```sh
/// # Use stored preferences
/// guardian_news
///
/// # Oldest first in the science section, and remember that choice
/// guardian_news --order-by oldest --section science --save-preferences
///
/// # Open the third article in the browser
/// guardian_news --open 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Free-text search term
    #[arg(short, long, default_value = DEFAULT_SEARCH_TERM)]
    pub query: String,

    /// Sort order: newest, oldest or relevance (passed to the API unchecked)
    #[arg(short, long)]
    pub order_by: Option<String>,

    /// Section id to filter on, e.g. world or science
    #[arg(short, long)]
    pub section: Option<String>,

    /// Guardian content API key
    #[arg(long, env = "GUARDIAN_API_KEY", default_value = "test", hide_env_values = true)]
    pub api_key: String,

    /// Search endpoint to query
    #[arg(long, default_value = GUARDIAN_SEARCH_ENDPOINT)]
    pub base_url: String,

    /// Seconds allowed for establishing the connection
    #[arg(long, default_value_t = 15)]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for each read from the connection
    #[arg(long, default_value_t = 10)]
    pub read_timeout_secs: u64,

    /// Drop malformed articles instead of discarding the whole response
    #[arg(long)]
    pub skip_malformed: bool,

    /// Path to the YAML preference file
    #[arg(short, long, env = "GUARDIAN_NEWS_PREFS", default_value = "preferences.yaml")]
    pub preferences: String,

    /// Store the effective sort order and section in the preference file
    #[arg(long)]
    pub save_preferences: bool,

    /// Output directory for a JSON snapshot of the loaded articles
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Open the N-th listed article (1-based) in the browser
    #[arg(long, value_name = "N")]
    pub open: Option<NonZeroUsize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["guardian_news"]);

        assert_eq!(cli.query, "alaska");
        assert_eq!(cli.order_by, None);
        assert_eq!(cli.section, None);
        assert_eq!(cli.base_url, GUARDIAN_SEARCH_ENDPOINT);
        assert_eq!(cli.connect_timeout_secs, 15);
        assert_eq!(cli.read_timeout_secs, 10);
        assert!(!cli.skip_malformed);
        assert!(!cli.save_preferences);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "guardian_news",
            "-o",
            "oldest",
            "-s",
            "science",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.order_by.as_deref(), Some("oldest"));
        assert_eq!(cli.section.as_deref(), Some("science"));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_open_is_one_based() {
        let cli = Cli::parse_from(["guardian_news", "--open", "2"]);
        assert_eq!(cli.open.map(NonZeroUsize::get), Some(2));
        assert!(Cli::try_parse_from(["guardian_news", "--open", "0"]).is_err());
    }
}
