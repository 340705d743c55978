//! Error taxonomy for repository references and tree resolution.

use std::fmt;

use thiserror::Error;

use crate::reference::RepositoryReference;

/// Problems with a user-supplied repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The input was empty or whitespace.
    #[error("repository reference is empty; expected owner/repo or a GitHub URL")]
    Blank,

    /// No owner segment was present.
    #[error("repository owner is missing; expected owner/repo")]
    EmptyOwner,

    /// No repository segment was present.
    #[error("repository name is missing; expected owner/repo")]
    EmptyRepo,

    /// A URL pointed at a host other than GitHub.
    #[error("unsupported host {0:?}; only github.com repositories are supported")]
    UnsupportedHost(String),

    /// An owner or repository name that cannot be a single URL path segment.
    #[error("invalid repository path segment {0:?}; names may not contain '/', '?', '#' or whitespace")]
    InvalidSegment(String),
}

/// Why a single branch candidate did not produce a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The forge reported the branch (or repository) as missing.
    NotFound,
    /// Network, timeout, or malformed-response failure.
    Failed(String),
}

/// Diagnostic for one attempted branch candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    /// The branch name that was requested.
    pub branch: String,
    /// What went wrong.
    pub failure: AttemptFailure,
}

impl fmt::Display for AttemptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            AttemptFailure::NotFound => write!(f, "{}: not found", self.branch),
            AttemptFailure::Failed(reason) => write!(f, "{}: {reason}", self.branch),
        }
    }
}

/// Errors surfaced by [`crate::resolver::TreeResolver`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The forge throttled the request. Not retried.
    #[error(
        "GitHub API rate limit exceeded (HTTP {status}) while fetching branch '{branch}'. \
         Please wait a few minutes and try again, or configure GITHUB_TOKEN for a higher limit."
    )]
    RateLimited {
        /// Branch being fetched when the limit was hit.
        branch: String,
        /// The HTTP status reported by the forge.
        status: u16,
    },

    /// No candidate branch produced a tree.
    #[error(
        "Repository {reference} not found or has no readable tree (tried branches: {}). \
         Check that the repository is public and that the name and branch are correct.",
        attempted_branches(.attempts)
    )]
    NotFound {
        /// The repository that was looked up.
        reference: RepositoryReference,
        /// One diagnostic per attempted candidate, in order.
        attempts: Vec<AttemptReport>,
    },

    /// The owner/repo pair was invalid.
    #[error(transparent)]
    InvalidReference(#[from] ReferenceError),

    /// The caller cancelled the resolution before it completed.
    #[error("tree resolution was cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Branch names attempted before a `NotFound`, in order.
    #[must_use]
    pub fn attempted(&self) -> Vec<&str> {
        match self {
            Self::NotFound { attempts, .. } => attempts.iter().map(|a| a.branch.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn attempted_branches(attempts: &[AttemptReport]) -> String {
    attempts.iter().map(|a| a.branch.as_str()).collect::<Vec<_>>().join(", ")
}
