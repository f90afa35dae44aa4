use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::provider::LLMProvider;
use crate::models::{Role, Turn};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, model: impl Into<String>, max_tokens: u32) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert("x-api-key", header::HeaderValue::from_str(api_key)?);
        headers.insert("anthropic-version", header::HeaderValue::from_static(API_VERSION));
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            max_tokens,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request<'a>(&'a self, system: &str, turns: &'a [Turn]) -> MessagesRequest<'a> {
        // The Messages API takes the system prompt out of band, so any
        // system-role turns are folded into it.
        let mut system_parts = vec![system.to_string()];
        let mut messages = Vec::with_capacity(turns.len());
        for turn in turns {
            match turn.role {
                Role::System => system_parts.push(turn.text.clone()),
                role => messages.push(Message {
                    role: role.as_str(),
                    content: &turn.text,
                }),
            }
        }

        let system = system_parts
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: if system.is_empty() { None } else { Some(system) },
            messages,
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn chat(&self, system: &str, turns: &[Turn]) -> Result<String> {
        let request_body = self.build_request(system, turns);
        tracing::debug!(
            "Sending {} message(s) to Anthropic model {}",
            request_body.messages.len(),
            self.model
        );

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!(
                "Anthropic API error ({}): {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let result: MessagesResponse = serde_json::from_str(&body)?;

        if let Some(error) = result.error {
            return Err(Error::LLMApi(error.message));
        }

        let text = result
            .content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(Error::LLMApi("Empty response from Anthropic".to_string()));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "Anthropic"
    }
}
