//! Caller-side views of a resolved file list.
//!
//! A [`FileDigest`] is the compact copy kept around after the full list has
//! been used, e.g. to answer follow-up questions about a generated diagram.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::reference::RepositoryReference;
use crate::tree::FilteredFileList;

/// Default number of paths retained in a digest.
pub const DEFAULT_DIGEST_LIMIT: usize = 50;

/// A truncated, summarised copy of a [`FilteredFileList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    /// Branch the list came from.
    pub branch: String,
    /// Total number of kept files before truncation.
    pub total: usize,
    /// First `limit` paths in response order.
    pub sample: Vec<String>,
    /// File count per lowercase extension.
    pub by_extension: BTreeMap<String, usize>,
}

impl FileDigest {
    /// Builds a digest keeping at most `limit` paths.
    #[must_use]
    pub fn from_list(list: &FilteredFileList, limit: usize) -> Self {
        let mut by_extension = BTreeMap::new();
        for path in list.paths() {
            let ext = path
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            *by_extension.entry(ext).or_insert(0) += 1;
        }

        Self {
            branch: list.branch.clone(),
            total: list.len(),
            sample: list.paths().take(limit).map(str::to_string).collect(),
            by_extension,
        }
    }

    /// Number of paths dropped from the sample.
    #[must_use]
    pub fn omitted(&self) -> usize {
        self.total.saturating_sub(self.sample.len())
    }

    /// Plain-text rendering used by the `summary` command.
    #[must_use]
    pub fn render(&self, reference: &RepositoryReference) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{reference} @ {} ({} files)", self.branch, self.total);

        let mut counts: Vec<(&String, &usize)> = self.by_extension.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let joined =
            counts.iter().map(|(ext, n)| format!(".{ext}: {n}")).collect::<Vec<_>>().join(", ");
        let _ = writeln!(out, "{joined}");

        out.push('\n');
        for path in &self.sample {
            let _ = writeln!(out, "  {path}");
        }
        if self.omitted() > 0 {
            let _ = writeln!(out, "  ... and {} more", self.omitted());
        }
        out
    }
}

/// Rejects an empty list; emptiness is the caller's concern, not the resolver's.
///
/// # Errors
///
/// Returns a user-facing message when `list` has no entries.
pub fn require_files<'a>(
    reference: &RepositoryReference,
    list: &'a FilteredFileList,
) -> Result<&'a FilteredFileList, String> {
    if list.is_empty() {
        return Err(format!(
            "No recognised source files found in {reference} (branch {}). \
             The repository may only contain documentation or unsupported file types.",
            list.branch
        ));
    }
    Ok(list)
}
