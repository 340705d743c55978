//! Default-branch probing and tree filtering.
//!
//! The resolver walks the configured candidate branches strictly in order.
//! Each attempt yields a [`BranchOutcome`] and the loop decides from that tag
//! alone:
//!
//! | outcome        | action                                  |
//! |----------------|-----------------------------------------|
//! | `Found`        | filter and return (even if empty)       |
//! | `RateLimited`  | stop, return [`ResolveError::RateLimited`] |
//! | `NotFound`     | record, try next candidate              |
//! | `Failed`       | log, record, try next candidate         |
//!
//! Exhausting the list returns [`ResolveError::NotFound`] carrying one
//! diagnostic per candidate.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ForgeConfig;
use crate::error::{AttemptFailure, AttemptReport, ResolveError};
use crate::filter;
use crate::ports::forge::{fetch_within, BranchOutcome, ForgeClient, TreeRequest};
use crate::reference::RepositoryReference;
use crate::tree::FilteredFileList;

/// Resolves a repository's default-branch tree into a filtered file list.
pub struct TreeResolver<'a> {
    forge: &'a dyn ForgeClient,
    candidates: Vec<String>,
    attempt_timeout: Duration,
}

impl<'a> TreeResolver<'a> {
    /// Creates a resolver using the candidates and timeout from `config`.
    #[must_use]
    pub fn new(forge: &'a dyn ForgeClient, config: &ForgeConfig) -> Self {
        Self {
            forge,
            candidates: config.candidate_branches.clone(),
            attempt_timeout: config.request_timeout(),
        }
    }

    /// Branch names tried, in order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Resolves `owner/repo`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidReference`] if either part is empty.
    /// - [`ResolveError::RateLimited`] as soon as the forge throttles.
    /// - [`ResolveError::NotFound`] when no candidate yields a tree.
    pub async fn resolve(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<FilteredFileList, ResolveError> {
        let reference = RepositoryReference::new(owner, repo)?;
        self.resolve_reference(&reference).await
    }

    /// Resolves an already-validated reference.
    ///
    /// # Errors
    ///
    /// See [`TreeResolver::resolve`].
    pub async fn resolve_reference(
        &self,
        reference: &RepositoryReference,
    ) -> Result<FilteredFileList, ResolveError> {
        self.resolve_cancellable(reference, &CancellationToken::new()).await
    }

    /// Resolves `reference`, abandoning the in-flight request if `cancel` fires.
    ///
    /// A cancelled call never yields a file list, so nothing fetched after
    /// cancellation reaches the caller.
    ///
    /// # Errors
    ///
    /// See [`TreeResolver::resolve`]; additionally [`ResolveError::Cancelled`].
    pub async fn resolve_cancellable(
        &self,
        reference: &RepositoryReference,
        cancel: &CancellationToken,
    ) -> Result<FilteredFileList, ResolveError> {
        let mut attempts = Vec::with_capacity(self.candidates.len());

        for branch in &self.candidates {
            if cancel.is_cancelled() {
                return Err(ResolveError::Cancelled);
            }

            let request = TreeRequest {
                owner: reference.owner().to_string(),
                repo: reference.repo().to_string(),
                branch: branch.clone(),
            };
            debug!(%reference, %branch, "requesting tree");

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ResolveError::Cancelled),
                outcome = fetch_within(self.forge, &request, self.attempt_timeout) => outcome,
            };

            match outcome {
                BranchOutcome::Found(listing) => {
                    if listing.truncated {
                        warn!(
                            %reference,
                            %branch,
                            "tree listing was truncated by the forge; file list may be incomplete"
                        );
                    }
                    let raw = listing.tree.len();
                    let entries = filter::filter_entries(listing.tree);
                    info!(%reference, %branch, raw, kept = entries.len(), "resolved tree");
                    return Ok(FilteredFileList { branch: branch.clone(), entries });
                }
                BranchOutcome::RateLimited { status } => {
                    warn!(%reference, %branch, status, "forge rate limit hit; aborting");
                    return Err(ResolveError::RateLimited { branch: branch.clone(), status });
                }
                BranchOutcome::NotFound => {
                    debug!(%reference, %branch, "branch not found");
                    attempts.push(AttemptReport {
                        branch: branch.clone(),
                        failure: AttemptFailure::NotFound,
                    });
                }
                BranchOutcome::Failed { reason } => {
                    warn!(%reference, %branch, %reason, "tree request failed; trying next branch");
                    attempts.push(AttemptReport {
                        branch: branch.clone(),
                        failure: AttemptFailure::Failed(reason),
                    });
                }
            }
        }

        Err(ResolveError::NotFound { reference: reference.clone(), attempts })
    }
}
