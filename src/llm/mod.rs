pub mod provider;
pub mod anthropic;
pub mod openai;
pub mod prompts;

pub use provider::{create_client, LLMProvider, ProviderKind};
pub use anthropic::AnthropicProvider;
pub use openai::OpenAIProvider;
pub use prompts::{build_review_prompt, SYSTEM_PROMPT};
