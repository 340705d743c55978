//! Port traits defining external boundaries.
//!
//! The forge is the only external system the resolver talks to.
//! Implementations live in `src/adapters/`.

pub mod forge;

pub use forge::{BranchOutcome, ForgeClient, TreeFuture, TreeRequest};
