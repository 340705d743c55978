//! Core library entry for the `repoviz` CLI.
//!
//! Resolves a GitHub repository's default-branch tree and filters it down to
//! source and config files suitable for building a diagram prompt.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod digest;
pub mod error;
pub mod filter;
pub mod ports;
pub mod reference;
pub mod resolver;
pub mod telemetry;
pub mod tree;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::{ReferenceError, ResolveError};
pub use reference::RepositoryReference;
pub use resolver::TreeResolver;
pub use tree::{FilteredFileList, TreeEntry};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    telemetry::init_tracing(telemetry::level_for(cli.verbose));
    commands::dispatch(&cli.command)
}
