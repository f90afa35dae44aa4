use crate::error::{Error, Result};
use crate::llm::ProviderKind;
use std::env;

pub const DEFAULT_MAX_TOKENS: u32 = 8192;
pub const DEFAULT_MAX_DEPTH: usize = 20;
pub const DEFAULT_MAX_FILES: usize = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub base_url: Option<String>,
    pub loader: LoaderConfig,
    /// Whether `LLM_MODEL` named the model, as opposed to a provider default.
    model_pinned: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source. `from_env` passes
    /// the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("LLM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("LLM_API_KEY environment variable not set".to_string()))?;

        let provider = match lookup("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None => ProviderKind::Anthropic,
        };

        let pinned_model = lookup("LLM_MODEL").filter(|m| !m.trim().is_empty());
        let model_pinned = pinned_model.is_some();
        let model = pinned_model.unwrap_or_else(|| provider.default_model().to_string());

        let max_tokens = match lookup("LLM_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|tokens| *tokens > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "LLM_MAX_TOKENS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let base_url = lookup("LLM_BASE_URL").filter(|u| !u.trim().is_empty());

        Ok(Self {
            provider,
            model,
            api_key,
            max_tokens,
            base_url,
            loader: LoaderConfig::default(),
            model_pinned,
        })
    }

    /// Applies command-line overrides. A provider override without a model
    /// override switches to that provider's default model unless `LLM_MODEL`
    /// pinned one explicitly.
    pub fn with_overrides(mut self, provider: Option<ProviderKind>, model: Option<String>) -> Self {
        if let Some(provider) = provider {
            if provider != self.provider && !self.model_pinned {
                self.model = provider.default_model().to_string();
            }
            self.provider = provider;
        }
        if let Some(model) = model {
            self.model = model;
            self.model_pinned = true;
        }
        self
    }

    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Deepest directory nesting that is still read; files in the root are depth 0.
    pub max_depth: usize,
    pub max_files: usize,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Formatted prompt context above this many characters is refused.
    pub max_total_context: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            max_file_size: 50_000,
            max_total_context: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = Config::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("LLM_API_KEY"));

        let err = Config::from_vars(vars(&[("LLM_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("LLM_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.provider, ProviderKind::Anthropic);
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.max_tokens, 8192);
        assert!(config.base_url.is_none());
        assert_eq!(config.loader.max_depth, 20);
        assert_eq!(config.loader.max_files, 500);
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_vars(vars(&[
            ("LLM_API_KEY", "sk-test"),
            ("LLM_PROVIDER", "OpenAI"),
            ("LLM_MAX_TOKENS", "1024"),
            ("LLM_BASE_URL", "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_invalid_max_tokens() {
        let err = Config::from_vars(vars(&[("LLM_API_KEY", "k"), ("LLM_MAX_TOKENS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_TOKENS"));
    }

    #[test]
    fn test_unknown_provider() {
        let err = Config::from_vars(vars(&[("LLM_API_KEY", "k"), ("LLM_PROVIDER", "cohere")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::from_vars(vars(&[("LLM_API_KEY", "k")]))
            .unwrap()
            .with_overrides(Some(ProviderKind::OpenAI), None);
        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert_eq!(config.model, "gpt-4o");

        let config = Config::from_vars(vars(&[("LLM_API_KEY", "k"), ("LLM_MODEL", "my-model")]))
            .unwrap()
            .with_overrides(Some(ProviderKind::OpenAI), None);
        assert_eq!(config.model, "my-model");

        let config = Config::from_vars(vars(&[("LLM_API_KEY", "k")]))
            .unwrap()
            .with_overrides(None, Some("claude-opus-4".to_string()));
        assert_eq!(config.provider, ProviderKind::Anthropic);
        assert_eq!(config.model, "claude-opus-4");
    }
}
