//! Cassettes: recorded forge interactions that can be replayed offline.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
