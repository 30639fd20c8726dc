//! Search URL construction.
//!
//! Builds the query URL for the content API's `/search` endpoint from the
//! user's sort and section preferences. Values are passed through untouched:
//! an order or section the API doesn't know fails remotely, not here.

use url::Url;

/// The content API's search endpoint.
pub const GUARDIAN_SEARCH_ENDPOINT: &str = "https://content.guardianapis.com/search?";

/// Free-text search term sent as `q`.
pub const DEFAULT_SEARCH_TERM: &str = "alaska";

/// Inputs for a single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    /// Free-text query (`q`)
    pub term: &'a str,
    /// Sort order (`order-by`), usually one of `newest`, `oldest`, `relevance`
    pub order_by: &'a str,
    /// Section filter (`sectionId`)
    pub section: &'a str,
    /// API credential (`api-key`)
    pub api_key: &'a str,
}

/// Compose the search URL for `query` against `base`.
///
/// The result always carries exactly five parameters, in order: `q`,
/// `order-by`, `sectionId`, `show-tags=contributor`, `api-key`. Any query
/// string already present on `base` is replaced.
///
/// # Errors
///
/// Returns an error only if `base` itself isn't a valid absolute URL.
pub fn build_search_url(base: &str, query: &SearchQuery<'_>) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.set_query(None);
    url.query_pairs_mut()
        .append_pair("q", query.term)
        .append_pair("order-by", query.order_by)
        .append_pair("sectionId", query.section)
        .append_pair("show-tags", "contributor")
        .append_pair("api-key", query.api_key);
    Ok(url)
}
