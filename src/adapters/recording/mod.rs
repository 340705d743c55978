//! Recording adapters that capture interactions to cassettes.

pub mod forge;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use forge::RecordingForgeClient;

/// Record one interaction with its input and output.
///
/// Mirror of `replaying::next_output`. Values that fail to serialize are
/// recorded as `null`, and a poisoned recorder skips the write, so recording
/// never changes the outcome of the call being recorded.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or_default();
    let output_json = serde_json::to_value(output).unwrap_or_default();

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(_) => tracing::warn!(port, method, "recorder lock poisoned; interaction dropped"),
    }
}
