//! Service configuration from environment variables

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// News provider API key
    pub news_api_key: String,
    /// Email provider API key; login digests are disabled when absent
    pub email_api_key: Option<String>,
    /// Verified sender address for digest emails
    pub email_sender: Option<String>,
    /// Language-model API key; podcast scripts are disabled when absent
    pub llm_api_key: Option<String>,
    /// Allowed cross-origin client address
    pub client_origin: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            news_api_key: env::var("NEWS_API_KEY").unwrap_or_default(),
            email_api_key: env::var("EMAIL_API_KEY").ok(),
            email_sender: env::var("EMAIL_SENDER").ok(),
            llm_api_key: env::var("LLM_API_KEY").ok(),
            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}
