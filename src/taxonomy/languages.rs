use std::path::Path;

/// Extensions the loader treats as reviewable source, with their language.
const SOURCE_EXTENSIONS: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("jsx", "JavaScript"),
    ("tsx", "TypeScript"),
    ("java", "Java"),
    ("go", "Go"),
    ("rb", "Ruby"),
    ("rs", "Rust"),
    ("c", "C"),
    ("cpp", "C++"),
    ("h", "C"),
];

/// Directory names that are never descended into.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    "__pycache__",
    "node_modules",
    ".git",
    ".idea",
    ".vscode",
    "venv",
    ".venv",
    "env",
    ".env",
    "dist",
    "build",
    ".next",
    "target",
    ".pytest_cache",
    ".mypy_cache",
];

/// Extension without the leading dot, or `None` for extensionless files.
fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

pub fn is_source_file(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SOURCE_EXTENSIONS.iter().any(|(known, _)| *known == ext))
        .unwrap_or(false)
}

pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRECTORIES.contains(&name)
}

/// Accepts the extension with or without its leading dot.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    SOURCE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, lang)| *lang)
}
