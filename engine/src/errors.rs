use regraft_types::PatternError;
use thiserror::Error;

/// Failures a clone call can surface.
///
/// Either a complete, fully wired clone is returned, or the call fails with
/// one of these and no partial clone escapes: the tracker and any
/// half-built nodes are owned by the call frame and dropped on the error
/// path.
#[derive(Debug, Error)]
pub enum CloneError {
    /// Strict mode met a value with no defined clone strategy. The default
    /// (non-strict) policy shares such values by reference instead.
    #[error("no clone strategy for {type_name} value (strict mode)")]
    Unsupported { type_name: String },

    /// A pattern failed to recompile during reconstruction. This indicates
    /// a malformed source pattern, which is a caller contract violation;
    /// it propagates and is not retried.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
