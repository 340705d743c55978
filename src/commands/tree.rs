//! `repoviz tree` command.

use serde::Serialize;

use crate::digest::require_files;
use crate::reference::RepositoryReference;
use crate::tree::FilteredFileList;

#[derive(Serialize)]
struct TreeOutput<'a> {
    repository: String,
    branch: &'a str,
    files: Vec<&'a str>,
}

/// Execute the `tree` command on an already-resolved list.
///
/// # Errors
///
/// Returns an error string if the list is empty or JSON encoding fails.
pub fn run(
    reference: &RepositoryReference,
    list: &FilteredFileList,
    json: bool,
) -> Result<(), String> {
    println!("{}", render(reference, list, json)?);
    Ok(())
}

/// Renders the list as newline-separated paths or a JSON document.
fn render(
    reference: &RepositoryReference,
    list: &FilteredFileList,
    json: bool,
) -> Result<String, String> {
    let list = require_files(reference, list)?;

    if json {
        let output = TreeOutput {
            repository: reference.to_string(),
            branch: &list.branch,
            files: list.paths().collect(),
        };
        serde_json::to_string_pretty(&output).map_err(|e| format!("Failed to encode JSON: {e}"))
    } else {
        Ok(list.paths().collect::<Vec<_>>().join("\n"))
    }
}
