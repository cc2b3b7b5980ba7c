//! Email provider client for digest delivery

use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::models::news::Article;
use crate::summary::SummaryStyle;

const EMAIL_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Client for the transactional email API
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    api_key: String,
    /// Verified sender address
    sender: String,
}

impl EmailClient {
    pub fn new(api_key: String, sender: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            sender,
        }
    }

    /// Compose and send a digest of the user's current article set.
    ///
    /// Failure is logged and reported as a boolean; it never fails the
    /// calling flow.
    pub async fn send_digest(
        &self,
        recipient: &str,
        username: &str,
        articles: &[Article],
        style: SummaryStyle,
    ) -> bool {
        let mut body = format!(
            "Hi {username}, here is your {} news digest:\n\n",
            style.as_str()
        );
        for article in articles {
            body.push_str(&article.summary);
            body.push('\n');
        }

        let payload = json!({
            "personalizations": [{ "to": [{ "email": recipient }] }],
            "from": { "email": self.sender },
            "subject": format!("Your news digest, {username}"),
            "content": [{ "type": "text/plain", "value": body }],
        });

        let result = self
            .client
            .post(EMAIL_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Digest email sent to {}", recipient);
                true
            }
            Ok(response) => {
                error!("Email provider returned status {}", response.status());
                false
            }
            Err(e) => {
                error!("Email provider request failed: {}", e);
                false
            }
        }
    }
}
