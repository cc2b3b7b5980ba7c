//! Language-model client for podcast script generation

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::news::Article;

use super::UpstreamError;

const LLM_API_URL: &str = "https://api.anthropic.com/v1/messages";
const LLM_MODEL: &str = "claude-3-5-haiku-20241022";

#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    system: Option<String>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Client for the language-model API
#[derive(Clone)]
pub struct ScriptClient {
    client: Client,
    api_key: String,
}

impl ScriptClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Turn a user's summarized articles into a spoken-word script.
    ///
    /// Distinguishes an unreachable service from a malformed response so the
    /// caller can report them as separate error kinds.
    pub async fn generate(
        &self,
        username: &str,
        articles: &[Article],
    ) -> Result<String, UpstreamError> {
        let system_prompt = "You are a podcast host. Turn the provided news summaries \
            into a short, engaging spoken-word script with smooth transitions between stories.";

        let mut prompt = format!("Write a podcast script for {username} covering these stories:\n\n");
        for article in articles {
            prompt.push_str(&article.summary);
            prompt.push('\n');
        }

        let request = MessageRequest {
            model: LLM_MODEL.to_string(),
            max_tokens: 1024,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            system: Some(system_prompt.to_string()),
        };

        let response = self
            .client
            .post(LLM_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Unreachable(format!(
                "generation failed with status {}",
                response.status()
            )));
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        let script = body
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        if script.is_empty() {
            return Err(UpstreamError::Malformed(
                "response contained no text".to_string(),
            ));
        }

        Ok(script)
    }
}
