//! Filter policy applied to raw tree listings.

use crate::tree::{EntryKind, TreeEntry};

/// Recognised source and config extensions, lowercase, without the dot.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    // scripting / web
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "py", "php", "rb",
    // compiled
    "go", "rs", "java", "c", "h", "cpp", "cc", "cxx", "hpp", "hh", "cs", "swift", "kt", "kts",
    "dart",
    // data, config and markup
    "json", "yaml", "yml", "toml", "xml", "html", "htm", "css", "scss",
];

/// Directory names whose contents are dependencies or build output.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "vendor", "dist", "build"];

/// Returns true when `entry` should be kept for prompting.
#[must_use]
pub fn is_relevant(entry: &TreeEntry) -> bool {
    entry.kind == EntryKind::Blob
        && !entry.path.starts_with('.')
        && has_source_extension(&entry.path)
        && !in_excluded_dir(&entry.path)
}

/// Keeps relevant entries, preserving order.
#[must_use]
pub fn filter_entries(entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    entries.into_iter().filter(is_relevant).collect()
}

/// Case-insensitive match against [`SOURCE_EXTENSIONS`].
fn has_source_extension(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            SOURCE_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

fn in_excluded_dir(path: &str) -> bool {
    let mut segments: Vec<&str> = path.split('/').collect();
    segments.pop();
    segments.iter().any(|segment| EXCLUDED_DIRS.contains(segment))
}
