use std::collections::BTreeMap;

/// Relative path to file text, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedFiles {
    files: BTreeMap<String, String>,
}

impl LoadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn format_for_prompt(&self) -> String {
        if self.files.is_empty() {
            return "(No files found)".to_string();
        }

        self.files
            .iter()
            .map(|(path, content)| format!("=== {} ===\n{}", path, content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
