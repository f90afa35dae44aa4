pub mod config;
pub mod error;
pub mod models;
pub mod llm;
pub mod loader;
pub mod taxonomy;
pub mod review;

pub use config::{Config, LoaderConfig};
pub use error::{Error, Result};
pub use llm::{create_client, AnthropicProvider, LLMProvider, OpenAIProvider, ProviderKind};
pub use loader::{FileLoader, LoadedFiles};
pub use review::{CodeReviewer, Session};
