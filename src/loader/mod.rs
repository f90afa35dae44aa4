pub mod files;
pub mod walker;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::taxonomy::language_for_extension;

pub use files::LoadedFiles;
pub use walker::source_files;

/// Checks that `path` is an existing directory and returns its canonical form.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    let path = path.canonicalize()?;
    if !path.is_dir() {
        return Err(Error::NotADirectory(path));
    }
    Ok(path)
}

pub struct FileLoader {
    root: PathBuf,
    config: LoaderConfig,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn check_root(&self) -> Result<()> {
        resolve_root(&self.root).map(|_| ())
    }

    /// Loads source files whose relative path contains `filter`
    /// (case-insensitive), stopping after `max_files` files.
    pub fn load(&self, filter: Option<&str>) -> Result<LoadedFiles> {
        self.check_root()?;

        let filter = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());
        let mut files = LoadedFiles::new();

        for path in source_files(&self.root, self.config.max_depth) {
            if files.len() >= self.config.max_files {
                tracing::info!("Reached the {} file limit, stopping", self.config.max_files);
                break;
            }

            let relative = self.relative_path(&path);
            if let Some(pattern) = &filter {
                if !relative.to_lowercase().contains(pattern.as_str()) {
                    continue;
                }
            }

            if let Some(content) = self.read_file(&path) {
                files.insert(relative, content);
            }
        }

        tracing::debug!("Loaded {} file(s) from {}", files.len(), self.root.display());
        Ok(files)
    }

    /// File counts per extension for every supported file in the tree.
    pub fn summary(&self) -> Result<String> {
        self.check_root()?;

        let mut by_extension: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0;
        for path in source_files(&self.root, self.config.max_depth) {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            *by_extension.entry(ext).or_default() += 1;
            total += 1;
        }

        let mut lines = vec![format!("Found {} source files:", total)];
        for (ext, count) in &by_extension {
            let language = language_for_extension(ext).unwrap_or("unknown");
            lines.push(format!("  {}: {} files ({})", ext, count, language));
        }
        Ok(lines.join("\n"))
    }

    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::debug!("Cannot stat {}: {}", path.display(), err);
                return None;
            }
        };
        if metadata.len() > self.config.max_file_size {
            tracing::debug!(
                "Skipping {} ({} bytes exceeds limit)",
                path.display(),
                metadata.len()
            );
            return None;
        }

        match fs::read(path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => {
                tracing::debug!("Cannot read {}: {}", path.display(), err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn codebase() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("main.py"), "print('hello')").unwrap();
        fs::write(root.join("utils.py"), "def helper(): pass").unwrap();
        fs::create_dir(root.join("auth")).unwrap();
        fs::write(root.join("auth/login.py"), "def login(): pass").unwrap();
        fs::write(root.join("auth/logout.py"), "def logout(): pass").unwrap();
        fs::write(root.join("script.js"), "console.log('test');").unwrap();
        fs::write(root.join("notes.txt"), "some notes").unwrap();
        dir
    }

    fn loader(dir: &TempDir) -> FileLoader {
        FileLoader::new(dir.path(), LoaderConfig::default())
    }

    #[test]
    fn test_loads_all_source_files() {
        let dir = codebase();
        let files = loader(&dir).load(None).unwrap();

        assert_eq!(files.len(), 5);
        assert!(files.contains("main.py"));
        assert!(files.contains("utils.py"));
        assert!(files.contains("script.js"));
        assert!(!files.contains("notes.txt"));
        assert_eq!(files.get("main.py"), Some("print('hello')"));
    }

    #[test]
    fn test_filter_matches_directory_and_filename() {
        let dir = codebase();
        let loader = loader(&dir);

        let files = loader.load(Some("auth")).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.paths().all(|p| p.contains("auth")));

        let files = loader.load(Some("login")).unwrap();
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["auth/login.py"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let dir = codebase();
        assert_eq!(loader(&dir).load(Some("AUTH")).unwrap().len(), 2);
    }

    #[test]
    fn test_no_matching_filter() {
        let dir = codebase();
        assert!(loader(&dir).load(Some("nonexistent")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(loader(&dir).load(None).unwrap().is_empty());
    }

    #[test]
    fn test_file_count_never_exceeds_limit() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..12 {
            fs::write(dir.path().join(format!("m{:02}.rs", i)), "fn f() {}").unwrap();
        }
        let config = LoaderConfig {
            max_files: 5,
            ..LoaderConfig::default()
        };
        let files = FileLoader::new(dir.path(), config).load(None).unwrap();
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_skips_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("small.go"), "package main").unwrap();
        fs::write(dir.path().join("big.go"), "x".repeat(2_000)).unwrap();
        let config = LoaderConfig {
            max_file_size: 1_000,
            ..LoaderConfig::default()
        };
        let files = FileLoader::new(dir.path(), config).load(None).unwrap();
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["small.go"]);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin.c"), [b'i', b'n', b't', 0xff, b';']).unwrap();
        let files = loader(&dir).load(None).unwrap();
        let content = files.get("bin.c").unwrap();
        assert!(content.starts_with("int"));
        assert!(content.ends_with(';'));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.py"), "a = 1").unwrap();
        fs::write(root.join("b.py"), "b = 2").unwrap();
        std::os::unix::fs::symlink(root.join("a.py"), root.join("c.py")).unwrap();

        let files = loader(&dir).load(None).unwrap();
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["a.py", "b.py"]);
    }

    #[test]
    fn test_missing_root_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = FileLoader::new(&missing, LoaderConfig::default())
            .load(None)
            .unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));

        let file = dir.path().join("file.py");
        fs::write(&file, "").unwrap();
        let err = FileLoader::new(&file, LoaderConfig::default())
            .load(None)
            .unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_resolve_root_accepts_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("project")).unwrap();

        let resolved = resolve_root(&dir.path().join("project/../project")).unwrap();
        assert_eq!(resolved, dir.path().join("project").canonicalize().unwrap());
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_root_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = resolve_root(&missing).unwrap_err();
        assert!(matches!(&err, Error::PathNotFound(p) if *p == missing));
        assert!(err.to_string().starts_with("Path does not exist:"));
    }

    #[test]
    fn test_resolve_root_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.py");
        fs::write(&file, "print('hello')").unwrap();

        let err = resolve_root(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
        assert!(err.to_string().starts_with("Path is not a directory:"));
    }

    #[test]
    fn test_summary_counts_by_extension() {
        let dir = codebase();
        let summary = loader(&dir).summary().unwrap();

        assert!(summary.contains("Found 5 source files"));
        assert!(summary.contains(".py: 4 files (Python)"));
        assert!(summary.contains(".js: 1 files (JavaScript)"));
    }

    #[test]
    fn test_summary_of_empty_codebase() {
        let dir = tempfile::tempdir().unwrap();
        let summary = loader(&dir).summary().unwrap();
        assert_eq!(summary, "Found 0 source files:");
    }
}
