pub mod languages;

pub use languages::{is_ignored_dir, is_source_file, language_for_extension, IGNORED_DIRECTORIES};
