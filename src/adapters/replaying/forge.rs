//! Replaying adapter for the `ForgeClient` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::forge::{BranchOutcome, ForgeClient, TreeFuture, TreeRequest};

/// Serves recorded tree responses from a cassette.
pub struct ReplayingForgeClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingForgeClient {
    /// Create a replaying forge client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ForgeClient for ReplayingForgeClient {
    fn fetch_tree(&self, request: &TreeRequest) -> TreeFuture<'_> {
        let outcome: BranchOutcome = next_output(&self.replayer, "forge", "fetch_tree", request);
        Box::pin(async move { outcome })
    }
}
