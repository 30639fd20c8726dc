//! Markdown rendering of a load's result.
//!
//! A populated load renders as a numbered list, one entry per article, in
//! the order the API returned them. The numbers are what `--open` accepts.

use crate::loader::Presentation;
use crate::models::Article;

/// Shown when the connectivity probe fails.
pub const NO_INTERNET_TEXT: &str = "No internet connection.";
/// Shown when the load failed or returned nothing.
pub const NO_NEWS_TEXT: &str = "No news found.";

/// Render `presentation` under a heading naming the query.
pub fn presentation_to_markdown(presentation: &Presentation, term: &str, section: &str) -> String {
    let mut md = format!("# News about \"{term}\" in {section}\n\n");
    match presentation {
        Presentation::NoInternet => md.push_str(&format!("_{NO_INTERNET_TEXT}_\n")),
        Presentation::NoNews => md.push_str(&format!("_{NO_NEWS_TEXT}_\n")),
        Presentation::Articles(articles) => {
            for (i, article) in articles.iter().enumerate() {
                md.push_str(&article_to_markdown(i + 1, article));
            }
        }
    }
    md
}

fn article_to_markdown(number: usize, article: &Article) -> String {
    format!(
        "{number}. **{title}**\n   {section} · {date} · {author}\n   <{url}>\n\n",
        title = article.title(),
        section = article.section(),
        date = article.published_date(),
        author = article.author(),
        url = article.url(),
    )
}
