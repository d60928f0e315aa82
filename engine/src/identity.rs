//! Source-identity to clone-handle tracking.

use std::collections::HashMap;

use regraft_types::{ObjectId, Value};

/// Maps source-node identity to the clone already produced for it.
///
/// Keyed by allocation identity, never by content: two structurally equal
/// but distinct source nodes get two independent clones. A node is
/// registered before its children are traversed, which is what lets a child
/// that points back at an ancestor find the ancestor's (still incomplete)
/// clone instead of descending forever.
///
/// One tracker lives for exactly one top-level clone call.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    seen: HashMap<ObjectId, Value>,
}

impl IdentityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: ObjectId, clone: Value) {
        self.seen.insert(source, clone);
    }

    /// Handle copy of the clone registered for `source`, if any.
    #[must_use]
    pub fn lookup(&self, source: ObjectId) -> Option<Value> {
        self.seen.get(&source).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
