//! News provider client

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::models::user::Preferences;

const NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Raw article record as returned by the news provider
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: RawSource,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// Client for the news-listing API
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Fetch top headlines matching the user's preferences.
    ///
    /// Any failure (transport error, non-success status, undecodable body)
    /// degrades to an empty list; the read path never errors on the news
    /// provider.
    pub async fn fetch_headlines(&self, preferences: &Preferences) -> Vec<RawArticle> {
        let response = self
            .client
            .get(NEWS_API_URL)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("country", preferences.country.as_str()),
                ("category", preferences.category.as_str()),
                ("language", preferences.language.as_str()),
                ("pageSize", "10"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("News provider returned status {}", response.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("News provider request failed: {}", e);
                return Vec::new();
            }
        };

        match response.json::<HeadlinesResponse>().await {
            Ok(body) => body.articles,
            Err(e) => {
                warn!("News provider response could not be decoded: {}", e);
                Vec::new()
            }
        }
    }
}
