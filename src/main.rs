//! # Guardian News
//!
//! Queries The Guardian content API for articles matching a fixed search
//! term, parses the JSON response into article records, and lists them in
//! the terminal.
//!
//! ## Usage
//!
//! ```sh
//! GUARDIAN_API_KEY=... guardian_news --order-by newest --section world
//! ```
//!
//! ## Architecture
//!
//! The application is a straight call chain:
//! 1. **Preferences**: Resolve sort order and section from the CLI or the preference file
//! 2. **Request**: Build the search URL
//! 3. **Load**: Fetch and parse on a background task (one request, no retries)
//! 4. **Presentation**: Combine the result with a connectivity probe and render it
//! 5. **Output**: Optionally write a JSON snapshot and open an article

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;
use guardian_news::api::{FetchConfig, HttpFetcher, probe_connectivity};
use guardian_news::loader::{NewsLoader, Presentation, present, wait_completed};
use guardian_news::models::{Article, FeedSnapshot};
use guardian_news::outputs::{json, markdown};
use guardian_news::parser::MalformedPolicy;
use guardian_news::pipeline::NewsPipeline;
use guardian_news::preferences::{ORDER_BY_KEY, Preferences, SECTIONS_KEY};
use guardian_news::request::{SearchQuery, build_search_url};
use guardian_news::utils::{ensure_writable_dir, open_in_browser};

const CONNECTIVITY_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr; stdout carries the rendered list.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("guardian_news starting up");

    let args = Cli::parse();
    debug!(?args.order_by, ?args.section, preferences = %args.preferences, "Parsed CLI arguments");

    // ---- Preferences ----
    let mut prefs = Preferences::load(&args.preferences).await?;
    let order_by = args.order_by.clone().unwrap_or_else(|| prefs.order_by());
    let section = args.section.clone().unwrap_or_else(|| prefs.section());
    info!(%order_by, %section, "Resolved query options");

    if args.save_preferences {
        prefs.set_string(ORDER_BY_KEY, order_by.as_str());
        prefs.set_string(SECTIONS_KEY, section.as_str());
        prefs.save().await?;
    }

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    // ---- Request ----
    let query = SearchQuery {
        term: &args.query,
        order_by: &order_by,
        section: &section,
        api_key: &args.api_key,
    };
    let request_url = build_search_url(&args.base_url, &query)?;

    // ---- Load ----
    let fetcher = HttpFetcher::new(FetchConfig {
        connect_timeout: Duration::from_secs(args.connect_timeout_secs),
        read_timeout: Duration::from_secs(args.read_timeout_secs),
    })?;
    let policy = if args.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Abort
    };
    let loader = NewsLoader::new(NewsPipeline::new(fetcher, policy));
    let mut state = loader.subscribe();

    let Some(handle) = loader.load(request_url.to_string()) else {
        return Err("a load is already in flight".into());
    };
    let outcome = wait_completed(&mut state).await.unwrap_or(Ok(Vec::new()));
    handle.await?;
    if let Err(kind) = &outcome {
        warn!(?kind, "Load produced no articles");
    }

    // ---- Presentation ----
    let connectivity = probe_connectivity(&request_url, CONNECTIVITY_PROBE_TIMEOUT).await;
    let presentation = present(&outcome, connectivity);
    print!(
        "{}",
        markdown::presentation_to_markdown(&presentation, &args.query, &section)
    );

    // ---- Output ----
    let articles = match presentation {
        Presentation::Articles(articles) => articles,
        Presentation::NoInternet | Presentation::NoNews => Vec::new(),
    };

    if let Some(dir) = &args.json_output_dir {
        let now = Local::now();
        let snapshot = FeedSnapshot {
            local_date: now.date_naive().to_string(),
            local_time: now.time().format("%H:%M:%S").to_string(),
            order_by,
            section,
            articles,
        };
        if let Err(e) = json::write_snapshot(&snapshot, dir).await {
            error!(error = %e, "Failed to write JSON snapshot");
        }
        open_selected(args.open.map(|n| n.get()), &snapshot.articles);
    } else {
        open_selected(args.open.map(|n| n.get()), &articles);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Open the `number`-th (1-based) article, logging instead of failing.
fn open_selected(number: Option<usize>, articles: &[Article]) {
    let Some(number) = number else {
        return;
    };
    match articles.get(number - 1) {
        Some(article) => {
            if let Err(e) = open_in_browser(article.url()) {
                error!(number, url = %article.url(), error = %e, "Failed to open article");
            }
        }
        None => warn!(number, available = articles.len(), "No article with that number"),
    }
}
