//! Extraction of [`Article`] records from a search response body.
//!
//! The API wraps results as `{ "response": { "results": [ ... ] } }`. Each
//! result carries `sectionName`, `webTitle`, `webPublicationDate`, `webUrl`
//! and, because the request asks for `show-tags=contributor`, a `tags` array
//! whose entries have their own `webTitle`.

use crate::error::ParseError;
use crate::models::{Article, NO_AUTHOR};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// What to do when a single result can't be turned into an [`Article`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Discard the whole batch.
    #[default]
    Abort,
    /// Drop only the offending result and keep the rest.
    Skip,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    // Kept as raw values so a bad entry can be handled per `MalformedPolicy`.
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    section_name: String,
    web_title: String,
    web_publication_date: String,
    web_url: String,
    #[serde(default)]
    tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    web_title: String,
}

impl RawArticle {
    fn into_article(self) -> Article {
        // Last tag wins.
        let author = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .last()
            .map(|tag| tag.web_title)
            .unwrap_or_else(|| NO_AUTHOR.to_string());

        Article::new(
            self.section_name,
            self.web_title,
            self.web_publication_date,
            author,
            self.web_url,
        )
    }
}

/// Parse a search response body into articles, preserving API order.
///
/// # Errors
///
/// - [`ParseError::Json`] if the body isn't JSON or `response.results` is
///   missing or not an array. This aborts regardless of `policy`.
/// - [`ParseError::Article`] for the first result missing a required string
///   field, when `policy` is [`MalformedPolicy::Abort`].
#[instrument(level = "debug", skip_all, fields(bytes = body.len(), ?policy))]
pub fn parse_articles(body: &str, policy: MalformedPolicy) -> Result<Vec<Article>, ParseError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let results = envelope.response.results;
    let total = results.len();

    let mut articles = Vec::with_capacity(total);
    for (index, value) in results.into_iter().enumerate() {
        match RawArticle::deserialize(value) {
            Ok(raw) => articles.push(raw.into_article()),
            Err(source) => match policy {
                MalformedPolicy::Abort => return Err(ParseError::Article { index, source }),
                MalformedPolicy::Skip => {
                    warn!(index, error = %source, "Skipping malformed article");
                }
            },
        }
    }

    debug!(total, parsed = articles.len(), "Parsed articles");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_json(title: &str, tags: &str) -> String {
        format!(
            r#"{{
                "sectionName": "World news",
                "webTitle": "{title}",
                "webPublicationDate": "2023-01-01T00:00:00Z",
                "webUrl": "https://example.com/{title}",
                "tags": {tags}
            }}"#
        )
    }

    fn envelope(results: &[String]) -> String {
        format!(r#"{{"response": {{"status": "ok", "results": [{}]}}}}"#, results.join(","))
    }

    #[test]
    fn test_parse_well_formed_fixture() {
        let body = r#"{
            "response": {
                "results": [{
                    "sectionName": "World news",
                    "webTitle": "Alaska Update",
                    "webPublicationDate": "2023-01-01T00:00:00Z",
                    "webUrl": "https://example.com/a",
                    "tags": [{"webTitle": "Jane Doe"}]
                }]
            }
        }"#;

        let articles = parse_articles(body, MalformedPolicy::Abort).unwrap();
        assert_eq!(
            articles,
            vec![Article::new(
                "World news",
                "Alaska Update",
                "2023-01-01T00:00:00Z",
                "Jane Doe",
                "https://example.com/a",
            )]
        );
    }

    #[test]
    fn test_last_tag_wins() {
        let body = envelope(&[result_json("a", r#"[{"webTitle": "A"}, {"webTitle": "B"}]"#)]);
        let articles = parse_articles(&body, MalformedPolicy::Abort).unwrap();
        assert_eq!(articles[0].author(), "B");
    }

    #[test]
    fn test_empty_absent_or_null_tags_use_sentinel() {
        let absent = r#"{"response": {"results": [{
            "sectionName": "s", "webTitle": "t",
            "webPublicationDate": "d", "webUrl": "u"
        }]}}"#;

        for body in [
            envelope(&[result_json("a", "[]")]),
            envelope(&[result_json("a", "null")]),
            absent.to_string(),
        ] {
            let articles = parse_articles(&body, MalformedPolicy::Abort).unwrap();
            assert_eq!(articles.len(), 1);
            assert_eq!(articles[0].author(), NO_AUTHOR);
        }
    }

    #[test]
    fn test_fields_are_kept_verbatim() {
        let body = r#"{"response": {"results": [{
            "sectionName": "  Opinion ",
            "webTitle": "Title\twith tab ",
            "webPublicationDate": "not-a-date",
            "webUrl": "not a url",
            "tags": [{"webTitle": " Spaced Author "}]
        }]}}"#;

        let article = &parse_articles(body, MalformedPolicy::Abort).unwrap()[0];
        assert_eq!(article.section(), "  Opinion ");
        assert_eq!(article.title(), "Title\twith tab ");
        assert_eq!(article.published_date(), "not-a-date");
        assert_eq!(article.url(), "not a url");
        assert_eq!(article.author(), " Spaced Author ");
    }

    #[test]
    fn test_source_order_is_preserved() {
        let body = envelope(&[
            result_json("first", "[]"),
            result_json("second", "[]"),
            result_json("third", "[]"),
        ]);
        let titles: Vec<String> = parse_articles(&body, MalformedPolicy::Abort)
            .unwrap()
            .iter()
            .map(|a| a.title().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_one_bad_article_aborts_batch() {
        let missing_url = r#"{
            "sectionName": "World news",
            "webTitle": "broken",
            "webPublicationDate": "2023-01-01T00:00:00Z",
            "tags": []
        }"#;
        let body = envelope(&[
            result_json("first", "[]"),
            missing_url.to_string(),
            result_json("third", "[]"),
        ]);

        let err = parse_articles(&body, MalformedPolicy::Abort).unwrap_err();
        assert!(matches!(err, ParseError::Article { index: 1, .. }));
    }

    #[test]
    fn test_skip_policy_keeps_good_articles() {
        let wrong_type = r#"{
            "sectionName": 7,
            "webTitle": "broken",
            "webPublicationDate": "2023-01-01T00:00:00Z",
            "webUrl": "https://example.com/broken"
        }"#;
        let body = envelope(&[
            result_json("first", "[]"),
            wrong_type.to_string(),
            result_json("third", "[]"),
        ]);

        let articles = parse_articles(&body, MalformedPolicy::Skip).unwrap();
        let titles: Vec<&str> = articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn test_tag_without_title_is_malformed() {
        let body = envelope(&[result_json("a", r#"[{"id": "profile/x"}]"#)]);
        assert!(parse_articles(&body, MalformedPolicy::Abort).is_err());
        assert!(parse_articles(&body, MalformedPolicy::Skip).unwrap().is_empty());
    }

    #[test]
    fn test_structural_errors_abort_in_both_modes() {
        for body in [
            "",
            "not json",
            r#"{"results": []}"#,
            r#"{"response": {}}"#,
            r#"{"response": {"results": {}}}"#,
        ] {
            for policy in [MalformedPolicy::Abort, MalformedPolicy::Skip] {
                let err = parse_articles(body, policy).unwrap_err();
                assert!(matches!(err, ParseError::Json(_)), "body {body:?}");
            }
        }
    }

    #[test]
    fn test_empty_results_is_ok() {
        let body = envelope(&[]);
        assert!(parse_articles(&body, MalformedPolicy::Abort).unwrap().is_empty());
    }
}
