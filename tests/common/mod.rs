#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use codereview::models::Turn;
use codereview::{CodeReviewer, Error, FileLoader, LLMProvider, LoaderConfig, Result};

/// Provider double that records every request and answers with a fixed reply.
pub struct RecordingProvider {
    reply: String,
    fail: bool,
    calls: Mutex<Vec<Vec<Turn>>>,
}

impl RecordingProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Text of the newest turn in the most recent request.
    pub fn last_prompt(&self) -> String {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|turns| turns.last())
            .map(|turn| turn.text.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    async fn chat(&self, _system: &str, turns: &[Turn]) -> Result<String> {
        self.calls.lock().unwrap().push(turns.to_vec());
        if self.fail {
            return Err(Error::LLMApi("Anthropic API error (503): overloaded".to_string()));
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "Recording"
    }
}

pub fn codebase(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
    dir
}

pub fn reviewer(root: &Path, provider: Arc<RecordingProvider>) -> CodeReviewer {
    reviewer_with(root, provider, LoaderConfig::default())
}

pub fn reviewer_with(
    root: &Path,
    provider: Arc<RecordingProvider>,
    config: LoaderConfig,
) -> CodeReviewer {
    CodeReviewer::new(FileLoader::new(root, config), provider)
}
