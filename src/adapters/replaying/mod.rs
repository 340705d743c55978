//! Replaying adapters that replay recorded interactions.

pub mod forge;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cassette::replayer::CassetteReplayer;

pub use forge::ReplayingForgeClient;

/// Take the next recorded output for `port::method` and deserialize it,
/// checking that it was recorded for the same `input`.
///
/// Mirror of `recording::record_interaction`.
///
/// # Panics
///
/// Panics if the cassette is exhausted, the recorded input differs from
/// `input`, or the recorded output does not match the expected type; each
/// means the cassette is out of date.
pub(crate) fn next_output<I: Serialize, T: DeserializeOwned>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
    input: &I,
) -> T {
    let interaction = {
        let mut guard = replayer.lock().expect("replayer lock poisoned");
        guard.next_interaction(port, method)
    };
    let seq = interaction.seq;
    let actual = serde_json::to_value(input).unwrap_or_default();
    if interaction.input != actual {
        panic!(
            "{port}::{method}: request at seq={seq} does not match the cassette. \
             Recorded input: {}; replayed input: {actual}",
            interaction.input
        );
    }
    serde_json::from_value(interaction.output).unwrap_or_else(|e| {
        panic!("{port}::{method}: recorded output at seq={seq} is invalid: {e}")
    })
}
