use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::taxonomy::{is_ignored_dir, is_source_file};

/// Yields every supported source file under `root`, in file-name order.
///
/// Symlinks are never yielded nor followed, so link cycles cannot occur.
/// Files directly inside `root` sit at directory depth 0; directories nested
/// deeper than `max_depth` are pruned without being read. Entries that
/// cannot be read are logged and skipped.
pub fn source_files(root: &Path, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth.saturating_add(1))
        .sort_by_file_name()
        .into_iter()
        .filter_entry(keep_entry)
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
        .map(DirEntry::into_path)
}

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if entry.path_is_symlink() {
        tracing::trace!("Skipping symlink {}", entry.path().display());
        return false;
    }
    if entry.file_type().is_dir() {
        return entry
            .file_name()
            .to_str()
            .map(|name| !is_ignored_dir(name))
            .unwrap_or(true);
    }
    true
}
