//! `repoviz summary` command.

use crate::digest::{require_files, FileDigest};
use crate::reference::RepositoryReference;
use crate::tree::FilteredFileList;

/// Execute the `summary` command on an already-resolved list.
///
/// # Errors
///
/// Returns an error string if the list is empty.
pub fn run(
    reference: &RepositoryReference,
    list: &FilteredFileList,
    limit: usize,
) -> Result<(), String> {
    let list = require_files(reference, list)?;
    print!("{}", FileDigest::from_list(list, limit).render(reference));
    Ok(())
}
