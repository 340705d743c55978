//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::digest::DEFAULT_DIGEST_LIMIT;

/// Top-level CLI parser for `repoviz`.
#[derive(Debug, Parser)]
#[command(name = "repoviz", version, about = "Resolve a GitHub repository's source file tree")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that resolves a repository.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Repository as `owner/repo` or a GitHub URL.
    pub source: String,

    /// YAML file with forge settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Serve forge responses from a recorded cassette instead of the network.
    #[arg(long, value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the filtered source and config files, one per line.
    Tree {
        /// Shared source options.
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON (`{branch, files}`) instead of plain paths.
        #[arg(long)]
        json: bool,
    },
    /// Print a per-extension summary and the first few files.
    Summary {
        /// Shared source options.
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum number of paths to list.
        #[arg(long, default_value_t = DEFAULT_DIGEST_LIMIT)]
        limit: usize,
    },
}

impl Command {
    /// Source options for the selected command.
    #[must_use]
    pub fn source(&self) -> &SourceArgs {
        match self {
            Self::Tree { source, .. } | Self::Summary { source, .. } => source,
        }
    }
}
