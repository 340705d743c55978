//! Forge port for fetching recursive repository trees.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tree::TreeListing;

/// Boxed future type alias used by [`ForgeClient`] to keep the trait dyn-compatible.
pub type TreeFuture<'a> = Pin<Box<dyn Future<Output = BranchOutcome> + Send + 'a>>;

/// A request for the recursive tree of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch to list.
    pub branch: String,
}

/// Outcome of a single branch attempt.
///
/// The resolver decides whether to stop or continue purely from this tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BranchOutcome {
    /// The branch exists and its tree was parsed.
    Found(TreeListing),
    /// The forge reported the branch or repository as missing.
    NotFound,
    /// The forge throttled the request.
    RateLimited {
        /// HTTP status that signalled throttling.
        status: u16,
    },
    /// Any other failure: transport, timeout, unexpected status, bad body.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

/// Fetches recursive trees from a hosted Git forge.
pub trait ForgeClient: Send + Sync {
    /// Fetches the recursive tree for `request.branch`.
    ///
    /// Never fails outright; every failure is classified into a
    /// [`BranchOutcome`] variant.
    fn fetch_tree(&self, request: &TreeRequest) -> TreeFuture<'_>;
}

/// Fetches `request` from `forge`, turning an overrun of `limit` into
/// [`BranchOutcome::Failed`].
pub async fn fetch_within(
    forge: &dyn ForgeClient,
    request: &TreeRequest,
    limit: Duration,
) -> BranchOutcome {
    match tokio::time::timeout(limit, forge.fetch_tree(request)).await {
        Ok(outcome) => outcome,
        Err(_) => BranchOutcome::Failed { reason: format!("timed out after {}s", limit.as_secs()) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_serializes_with_tag() {
        let value = serde_json::to_value(BranchOutcome::RateLimited { status: 429 }).unwrap();
        assert_eq!(value, json!({"outcome": "rate_limited", "status": 429}));

        let value = serde_json::to_value(BranchOutcome::NotFound).unwrap();
        assert_eq!(value, json!({"outcome": "not_found"}));
    }

    #[test]
    fn found_outcome_inlines_listing() {
        let parsed: BranchOutcome = serde_json::from_value(json!({
            "outcome": "found",
            "tree": [{"path": "a.rs", "type": "blob"}],
            "truncated": false
        }))
        .unwrap();
        match parsed {
            BranchOutcome::Found(listing) => assert_eq!(listing.tree.len(), 1),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
