//! Article summarization
//!
//! A pure mapping from (article, style) to a short text. No I/O, fully
//! deterministic.

use serde::{Deserialize, Serialize};

use crate::models::news::Article;

/// Summarization template selector
///
/// A closed set; unknown style strings deserialize to [`SummaryStyle::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    Brief,
    Humorous,
    Eli5,
    #[default]
    #[serde(other)]
    Default,
}

impl SummaryStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Brief => "brief",
            SummaryStyle::Humorous => "humorous",
            SummaryStyle::Eli5 => "eli5",
            SummaryStyle::Default => "default",
        }
    }
}

/// Render the summary text for one article in the given style
pub fn summarize(article: &Article, style: SummaryStyle) -> String {
    match style {
        SummaryStyle::Brief => {
            format!("Title: {}\nSource: {}\n", article.title, article.source)
        }
        SummaryStyle::Humorous => format!(
            "Title: {} - Brought to you by the always trustworthy {}!\n",
            article.title, article.source
        ),
        SummaryStyle::Eli5 => format!(
            "This article titled '{}' from {} is basically saying: {}.\n",
            article.title, article.source, article.description
        ),
        SummaryStyle::Default => format!(
            "Title: {}\nSource: {}\nDescription: {}\nURL: {}\n",
            article.title, article.source, article.description, article.url
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Article {
        Article {
            title: "Rust 2.0 Released".to_string(),
            source: "The Daily Crab".to_string(),
            description: "The language got faster".to_string(),
            url: "https://news.example/rust-2".to_string(),
            published_at: None,
            url_to_image: None,
            summary: String::new(),
            is_read: false,
            reading_time: 0,
        }
    }

    #[test]
    fn test_brief_template() {
        assert_eq!(
            summarize(&fixture(), SummaryStyle::Brief),
            "Title: Rust 2.0 Released\nSource: The Daily Crab\n"
        );
    }

    #[test]
    fn test_humorous_template() {
        assert_eq!(
            summarize(&fixture(), SummaryStyle::Humorous),
            "Title: Rust 2.0 Released - Brought to you by the always trustworthy The Daily Crab!\n"
        );
    }

    #[test]
    fn test_eli5_template() {
        assert_eq!(
            summarize(&fixture(), SummaryStyle::Eli5),
            "This article titled 'Rust 2.0 Released' from The Daily Crab is basically saying: The language got faster.\n"
        );
    }

    #[test]
    fn test_default_template() {
        assert_eq!(
            summarize(&fixture(), SummaryStyle::Default),
            "Title: Rust 2.0 Released\nSource: The Daily Crab\nDescription: The language got faster\nURL: https://news.example/rust-2\n"
        );
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        let style: SummaryStyle = serde_json::from_str("\"poetic\"").expect("should deserialize");
        assert_eq!(style, SummaryStyle::Default);
        assert_eq!(summarize(&fixture(), style), summarize(&fixture(), SummaryStyle::Default));
    }

    #[test]
    fn test_known_styles_deserialize() {
        for (raw, expected) in [
            ("\"brief\"", SummaryStyle::Brief),
            ("\"humorous\"", SummaryStyle::Humorous),
            ("\"eli5\"", SummaryStyle::Eli5),
            ("\"default\"", SummaryStyle::Default),
        ] {
            let style: SummaryStyle = serde_json::from_str(raw).expect("should deserialize");
            assert_eq!(style, expected);
        }
    }
}
