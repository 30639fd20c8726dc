//! The fetch-parse pipeline: request URL in, articles out.
//!
//! [`NewsPipeline::fetch`] reports failures as a typed [`FetchError`];
//! [`NewsPipeline::fetch_or_empty`] logs them and returns an empty list, so
//! the caller sees "no data" whatever went wrong.

use crate::api::FetchAsync;
use crate::error::FetchError;
use crate::models::Article;
use crate::parser::{MalformedPolicy, parse_articles};
use crate::utils::truncate_for_log;
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Stateless fetch-then-parse over some [`FetchAsync`] transport.
#[derive(Debug, Clone)]
pub struct NewsPipeline<F> {
    fetcher: F,
    policy: MalformedPolicy,
}

impl<F> NewsPipeline<F>
where
    F: FetchAsync,
{
    pub fn new(fetcher: F, policy: MalformedPolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Fetch `request_url` and parse the body into articles.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] before any network access if the URL doesn't parse
    /// - transport errors from the fetcher (connect, timeout, non-200, body)
    /// - [`FetchError::Parse`] if the body doesn't hold the expected articles
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, request_url: &str) -> Result<Vec<Article>, FetchError> {
        let t0 = Instant::now();
        let url = Url::parse(request_url)?;
        let body = self.fetcher.get_text(&url).await?;

        let articles = parse_articles(&body, self.policy).inspect_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Problem parsing the news JSON results"
            );
        })?;

        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Loaded articles"
        );
        Ok(articles)
    }

    /// Like [`fetch`](Self::fetch), but any failure becomes an empty list.
    ///
    /// This is the fail-soft entry point for library callers that don't need
    /// to know why a load produced nothing. [`crate::loader::NewsLoader`]
    /// uses [`fetch`](Self::fetch) instead so it can report the failure kind.
    pub async fn fetch_or_empty(&self, request_url: &str) -> Vec<Article> {
        match self.fetch(request_url).await {
            Ok(articles) => articles,
            Err(e) => {
                error!(kind = ?e.kind(), error = %e, "News fetch failed; returning no articles");
                Vec::new()
            }
        }
    }
}
