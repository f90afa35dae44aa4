use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::llm::{build_review_prompt, LLMProvider, SYSTEM_PROMPT};
use crate::loader::{FileLoader, LoadedFiles};
use crate::models::{Conversation, Turn};

pub const NO_FILES_MESSAGE: &str =
    "No source files found matching your criteria. Try a different filter or check the path.";

/// Holds the conversation and the most recently loaded file set for one
/// codebase.
pub struct CodeReviewer {
    loader: FileLoader,
    client: Arc<dyn LLMProvider>,
    history: Conversation,
    loaded: LoadedFiles,
}

impl CodeReviewer {
    pub fn new(loader: FileLoader, client: Arc<dyn LLMProvider>) -> Self {
        Self {
            loader,
            client,
            history: Conversation::new(),
            loaded: LoadedFiles::new(),
        }
    }

    /// Reloads the codebase (optionally filtered) and asks for a review of it.
    ///
    /// The loaded file set is replaced even when nothing matches. Empty or
    /// oversized contexts are answered locally without calling the provider.
    pub async fn review(&mut self, query: &str, filter: Option<&str>) -> Result<String> {
        self.loaded = self.loader.load(filter)?;

        if self.loaded.is_empty() {
            return Ok(NO_FILES_MESSAGE.to_string());
        }

        let code_context = self.loaded.format_for_prompt();
        let context_chars = code_context.chars().count();
        let limit = self.loader.config().max_total_context;
        if context_chars > limit {
            tracing::warn!(
                "Review context of {} chars exceeds the {} char limit",
                context_chars,
                limit
            );
            return Ok(format!(
                "Warning: The selected files ({} files, {} characters) exceed the recommended \
                 context size. Please use a filter to narrow down the files.\n\n\
                 Example: 'review --filter auth' or 'review --filter src/utils/'",
                self.loaded.len(),
                format_number(context_chars)
            ));
        }

        tracing::info!("Reviewing {} file(s) with {}", self.loaded.len(), self.client.name());
        let prompt = build_review_prompt(&code_context, query);
        self.exchange(Turn::user(prompt)).await
    }

    /// Sends a follow-up question using the existing history. The loaded
    /// file set is left untouched.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        self.exchange(Turn::user(question)).await
    }

    /// Turns are recorded only once the provider has answered, so a failed
    /// call leaves the history as it was.
    async fn exchange(&mut self, user: Turn) -> Result<String> {
        let request = self.history.with_pending(&user);
        let reply = self.client.chat(SYSTEM_PROMPT, &request).await?;
        self.history.commit_exchange(user, reply.clone());
        Ok(reply)
    }

    pub fn root(&self) -> &Path {
        self.loader.root()
    }

    pub fn summary(&self) -> Result<String> {
        let mut summary = self.loader.summary()?;
        summary.push_str(&format!("\n\nLoaded for review: {} files", self.loaded.len()));
        for path in self.loaded.paths() {
            summary.push_str(&format!("\n  - {}", path));
        }
        Ok(summary)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    pub fn loaded_files(&self) -> &LoadedFiles {
        &self.loaded
    }
}

/// Formats a count with comma thousands separators.
fn format_number(n: usize) -> String {
    let digits: Vec<char> = n.to_string().chars().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}
