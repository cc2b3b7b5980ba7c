//! Cached news entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::news::RawArticle;
use crate::summary::{SummaryStyle, summarize};

use super::user::Preferences;

/// A single summarized article in a user's cached set
///
/// The url acts as the article's identity key within that set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    pub summary: String,
    #[serde(rename = "isRead", default)]
    pub is_read: bool,
    /// Seconds spent reading, recorded by the mark-as-read operation
    #[serde(rename = "readingTime", default)]
    pub reading_time: i64,
}

impl Article {
    /// Build a summarized article from a raw provider record
    pub fn from_raw(raw: RawArticle, style: SummaryStyle) -> Self {
        let mut article = Self {
            title: raw.title,
            source: raw.source.name,
            description: raw.description.unwrap_or_default(),
            url: raw.url,
            published_at: raw.published_at,
            url_to_image: raw.url_to_image,
            summary: String::new(),
            is_read: false,
            reading_time: 0,
        };
        article.summary = summarize(&article, style);
        article
    }
}

/// The most recent fetch result for one user
///
/// Invariant: `articles` were fetched using exactly the `preferences`
/// snapshot stored here. A live preference change makes the entry stale
/// regardless of age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCacheEntry {
    pub username: String,
    pub fetched_at: DateTime<Utc>,
    pub preferences: Preferences,
    pub articles: Vec<Article>,
}

/// Flip the matching article to read and record its reading time.
///
/// A url with no match in the set leaves every article untouched; callers
/// still report success in that case.
pub fn mark_article_read(articles: &mut [Article], url: &str, reading_time: i64) -> bool {
    for article in articles.iter_mut() {
        if article.url == url {
            article.is_read = true;
            article.reading_time = reading_time;
            return true;
        }
    }
    false
}

/// Aggregate read/unread counts and summed reading time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingStats {
    pub read_count: usize,
    pub unread_count: usize,
    pub total_reading_time: i64,
}

/// Compute reading statistics over a user's cached article set
pub fn reading_stats(articles: &[Article]) -> ReadingStats {
    let read_count = articles.iter().filter(|a| a.is_read).count();

    ReadingStats {
        read_count,
        unread_count: articles.len() - read_count,
        total_reading_time: articles.iter().map(|a| a.reading_time).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str) -> Article {
        Article {
            title: "Title".to_string(),
            source: "Source".to_string(),
            description: "Description".to_string(),
            url: url.to_string(),
            published_at: None,
            url_to_image: None,
            summary: String::new(),
            is_read: false,
            reading_time: 0,
        }
    }

    #[test]
    fn test_mark_article_read_matching_url() {
        let mut articles = vec![article("https://a.example/1"), article("https://a.example/2")];

        assert!(mark_article_read(&mut articles, "https://a.example/2", 90));
        assert!(!articles[0].is_read);
        assert!(articles[1].is_read);
        assert_eq!(articles[1].reading_time, 90);
    }

    #[test]
    fn test_mark_article_read_unknown_url_is_noop() {
        let mut articles = vec![article("https://a.example/1")];

        assert!(!mark_article_read(&mut articles, "https://a.example/missing", 90));
        assert!(!articles[0].is_read);
        assert_eq!(articles[0].reading_time, 0);
    }

    #[test]
    fn test_reading_stats_aggregation() {
        let mut articles = vec![
            article("https://a.example/1"),
            article("https://a.example/2"),
            article("https://a.example/3"),
        ];
        mark_article_read(&mut articles, "https://a.example/1", 120);
        mark_article_read(&mut articles, "https://a.example/3", 45);

        let stats = reading_stats(&articles);
        assert_eq!(stats.read_count, 2);
        assert_eq!(stats.unread_count, 1);
        assert_eq!(stats.total_reading_time, 165);
    }

    #[test]
    fn test_reading_stats_empty_set() {
        let stats = reading_stats(&[]);
        assert_eq!(stats.read_count, 0);
        assert_eq!(stats.unread_count, 0);
        assert_eq!(stats.total_reading_time, 0);
    }
}
