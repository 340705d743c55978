//! Tree entries as reported by the forge and the filtered file list.

use serde::{Deserialize, Serialize};

/// Kind of object a tree entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
    /// A submodule commit.
    Commit,
    /// Anything else the forge reports.
    #[serde(other)]
    Other,
}

/// One file or directory in a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Object kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl TreeEntry {
    /// Shorthand for a file entry.
    #[must_use]
    pub fn blob(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: EntryKind::Blob }
    }

    /// Shorthand for a directory entry.
    #[must_use]
    pub fn dir(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: EntryKind::Tree }
    }
}

/// Raw recursive tree body returned for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeListing {
    /// Entries in API response order.
    pub tree: Vec<TreeEntry>,
    /// Set when the forge could not enumerate the whole tree.
    #[serde(default)]
    pub truncated: bool,
}

/// Source and config files kept after filtering, in API response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredFileList {
    /// The candidate branch that produced this list.
    pub branch: String,
    /// Kept entries; every entry is a blob.
    pub entries: Vec<TreeEntry>,
}

impl FilteredFileList {
    /// Number of kept files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when filtering removed everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over kept paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}
