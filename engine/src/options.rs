//! Per-call clone configuration.

use std::fmt;
use std::rc::Rc;

use regraft_types::{OpaqueValue, Value};

use crate::errors::CloneError;

/// Pluggable strategy for values with no built-in clone rule.
pub type OpaqueHandler = dyn Fn(&Rc<dyn OpaqueValue>) -> Result<Value, CloneError>;

/// What to do with a value classified Opaque.
#[derive(Default)]
pub enum OpaquePolicy {
    /// Copy the reference as-is. The clone and the source share the value;
    /// this is reference-sharing, not cloning.
    #[default]
    Share,
    /// Fail the whole call with [`CloneError::Unsupported`].
    Strict,
    /// Ask a caller-supplied handler to produce a substitute.
    Handler(Rc<OpaqueHandler>),
}

impl fmt::Debug for OpaquePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Share => f.write_str("Share"),
            Self::Strict => f.write_str("Strict"),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Options for a single clone call.
#[derive(Debug, Default)]
pub struct CloneOptions {
    pub opaque: OpaquePolicy,
}

impl CloneOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on opaque values instead of sharing them.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            opaque: OpaquePolicy::Strict,
        }
    }

    /// Route opaque values through `handler`.
    #[must_use]
    pub fn with_opaque_handler(
        handler: impl Fn(&Rc<dyn OpaqueValue>) -> Result<Value, CloneError> + 'static,
    ) -> Self {
        Self {
            opaque: OpaquePolicy::Handler(Rc::new(handler)),
        }
    }
}
