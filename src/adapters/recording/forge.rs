//! Recording adapter for the `ForgeClient` port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::forge::{fetch_within, BranchOutcome, ForgeClient, TreeFuture, TreeRequest};

/// Reason recorded for a call whose future was dropped before it finished.
pub const ABANDONED_REASON: &str = "request abandoned before completion";

/// Records forge interactions while delegating to an inner implementation.
///
/// Every request that is started ends up in the cassette, including ones the
/// caller gives up on, so a replay sees the same sequence of requests.
pub struct RecordingForgeClient {
    inner: Box<dyn ForgeClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
    timeout: Option<Duration>,
}

impl RecordingForgeClient {
    /// Creates a recording forge client wrapping the given implementation.
    pub fn new(inner: Box<dyn ForgeClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder, timeout: None }
    }

    /// Bounds each inner call by `timeout`, recording an overrun as a
    /// timed-out failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Records [`ABANDONED_REASON`] if dropped before [`PendingRecord::complete`].
struct PendingRecord<'a> {
    recorder: &'a Arc<Mutex<CassetteRecorder>>,
    request: &'a TreeRequest,
    done: bool,
}

impl PendingRecord<'_> {
    fn complete(mut self, outcome: &BranchOutcome) {
        self.done = true;
        record_interaction(self.recorder, "forge", "fetch_tree", self.request, outcome);
    }
}

impl Drop for PendingRecord<'_> {
    fn drop(&mut self) {
        if !self.done {
            let outcome = BranchOutcome::Failed { reason: ABANDONED_REASON.to_string() };
            record_interaction(self.recorder, "forge", "fetch_tree", self.request, &outcome);
        }
    }
}

impl ForgeClient for RecordingForgeClient {
    fn fetch_tree(&self, request: &TreeRequest) -> TreeFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let pending = PendingRecord { recorder: &self.recorder, request: &request, done: false };
            let outcome = match self.timeout {
                Some(limit) => fetch_within(self.inner.as_ref(), &request, limit).await,
                None => self.inner.fetch_tree(&request).await,
            };
            pending.complete(&outcome);
            outcome
        })
    }
}
