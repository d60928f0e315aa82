//! Deep clone engine for regraft value graphs.
//!
//! The engine produces a fully independent copy of an arbitrary, possibly
//! cyclic, heterogeneous value graph. Four pieces cooperate:
//!
//! - [`classify`] decides the clone strategy for a value;
//! - [`IdentityTracker`] maps source identities to already-built clones, so
//!   cycles terminate and shared subgraphs stay shared;
//! - the work-queue driver in [`deep_clone`] walks the graph iteratively,
//!   keeping call-stack depth constant regardless of graph depth;
//! - the container builder allocates shape-matched empty clones and fills
//!   their slots as children resolve.
//!
//! One `deep_clone` call runs synchronously to completion. The caller must
//! not mutate the source graph for the duration of the call; the tracker is
//! private per-call state and needs no synchronization.

mod builder;
mod classify;
mod clone;
mod errors;
mod identity;
mod options;

pub use classify::{Strategy, classify};
pub use clone::{deep_clone, shallow_clone};
pub use errors::CloneError;
pub use identity::IdentityTracker;
pub use options::{CloneOptions, OpaqueHandler, OpaquePolicy};
