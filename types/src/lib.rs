//! Core value-graph types for regraft.
//!
//! This crate contains pure domain types with no IO and no async: the
//! [`Value`] tagged union the clone engine operates over, its keys and
//! identities, and the JSON interop surface used by the CLI. Everything here
//! can be used from any layer of the application.

mod ids;
mod json;
mod key;
mod mapping;
mod pattern;
mod value;

pub use ids::ObjectId;
pub use json::{JsonError, value_from_json, value_to_json};
pub use key::{MapKey, SymbolKey};
pub use mapping::Mapping;
pub use pattern::{PatternError, PatternFlags, PatternValue};
pub use value::{OpaqueValue, Value};
