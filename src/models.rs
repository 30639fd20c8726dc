//! Data models for Guardian search results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One parsed news item, immutable once constructed
//! - [`SortOrder`]: The sort orders the content API understands
//! - [`FeedSnapshot`]: A single load's articles plus the options that produced them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author shown when the API returns no contributor tag for an article.
pub const NO_AUTHOR: &str = "No Author";

/// A single news article as returned by the search endpoint.
///
/// Fields are private so a constructed record can't be modified; use the
/// accessors to read them. Every field is stored exactly as the API sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    section: String,
    title: String,
    published_date: String,
    author: String,
    url: String,
}

impl Article {
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
        published_date: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            title: title.into(),
            published_date: published_date.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    /// The section (taxonomy label) the article was filed under.
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// ISO-8601 publication timestamp, unparsed.
    pub fn published_date(&self) -> &str {
        &self.published_date
    }

    /// Contributor name, or [`NO_AUTHOR`].
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Link to the article on the web. Not validated until it's opened.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Result ordering accepted by the `order-by` query parameter.
///
/// The request builder takes the order as a plain string so that whatever the
/// preference store holds reaches the API untouched; this type only names the
/// known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "relevance" => Ok(SortOrder::Relevance),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// The articles from one load, with the options that were used to query them.
///
/// Serialized to disk by [`crate::outputs::json::write_snapshot`].
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// The date of the load in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the load in `HH:MM:SS` format.
    pub local_time: String,
    /// The `order-by` value sent to the API.
    pub order_by: String,
    /// The `sectionId` value sent to the API.
    pub section: String,
    /// Articles in the order the API returned them.
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "World news",
            "Alaska Update",
            "2023-01-01T00:00:00Z",
            "Jane Doe",
            "https://example.com/a",
        )
    }

    #[test]
    fn test_article_accessors() {
        let article = sample();
        assert_eq!(article.section(), "World news");
        assert_eq!(article.title(), "Alaska Update");
        assert_eq!(article.published_date(), "2023-01-01T00:00:00Z");
        assert_eq!(article.author(), "Jane Doe");
        assert_eq!(article.url(), "https://example.com/a");
    }

    #[test]
    fn test_sort_order_round_trips_through_str() {
        for order in [SortOrder::Newest, SortOrder::Oldest, SortOrder::Relevance] {
            assert_eq!(order.as_str().parse::<SortOrder>(), Ok(order));
        }
        assert_eq!(SortOrder::default().to_string(), "newest");
    }

    #[test]
    fn test_sort_order_rejects_unknown() {
        assert!("popular".parse::<SortOrder>().is_err());
        assert!("Newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = FeedSnapshot {
            local_date: "2025-05-06".to_string(),
            local_time: "20:30:00".to_string(),
            order_by: "newest".to_string(),
            section: "world".to_string(),
            articles: vec![sample()],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("2025-05-06"));
        assert!(json.contains("Alaska Update"));

        let back: FeedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.articles, vec![sample()]);
    }
}
