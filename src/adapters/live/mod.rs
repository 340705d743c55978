//! Live adapters for real external interactions.

pub mod forge;

pub use forge::LiveForgeClient;
