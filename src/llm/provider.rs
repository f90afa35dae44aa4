use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::llm::anthropic::AnthropicProvider;
use crate::llm::openai::OpenAIProvider;
use crate::models::Turn;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Sends the ordered turns with `system` as the system prompt and returns
    /// the reply text.
    async fn chat(&self, system: &str, turns: &[Turn]) -> Result<String>;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAI,
    /// Recognised but not implemented.
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAI,
        ProviderKind::Gemini,
    ];

    pub fn supported() -> Vec<ProviderKind> {
        vec![ProviderKind::Anthropic, ProviderKind::OpenAI]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-sonnet-4-20250514",
            ProviderKind::OpenAI => "gpt-4o",
            ProviderKind::Gemini => "gemini-pro",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                Error::Config(format!(
                    "Unknown provider '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Creates the adapter for `kind`. `base_url` overrides the vendor endpoint
/// root (scheme and host, without the `/v1/...` path).
pub fn create_client(
    kind: ProviderKind,
    api_key: &str,
    model: &str,
    max_tokens: u32,
    base_url: Option<&str>,
) -> Result<Arc<dyn LLMProvider>> {
    if api_key.trim().is_empty() {
        return Err(Error::Config("API key must not be empty".to_string()));
    }

    let client: Arc<dyn LLMProvider> = match kind {
        ProviderKind::Anthropic => {
            let mut provider = AnthropicProvider::new(api_key, model, max_tokens)?;
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
        ProviderKind::OpenAI => {
            let mut provider = OpenAIProvider::new(api_key, model, max_tokens)?;
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
        unsupported => {
            let supported: Vec<_> = ProviderKind::supported()
                .iter()
                .map(|k| k.as_str())
                .collect();
            return Err(Error::UnsupportedProvider {
                provider: unsupported.as_str().to_string(),
                supported: supported.join(", "),
            });
        }
    };

    tracing::debug!("Created {} client for model {}", client.name(), model);
    Ok(client)
}
