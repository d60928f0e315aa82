//! Value classification.

use regraft_types::Value;

/// Clone strategy for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain data; copy by value.
    Primitive,
    /// Instant in time; copy by reconstruction at the same instant.
    Temporal,
    /// Match-pattern; recompile with identical source, flags and offset.
    Pattern,
    /// Ordinally-indexed container; recurse.
    Sequence,
    /// Key-indexed container; recurse.
    Mapping,
    /// No defined strategy; shared by reference under the default policy.
    Opaque,
}

/// Decide how a value is cloned.
///
/// The primitive check comes first: anything that is not a reference-holding
/// kind is plain data and ends recursion on that branch. Temporal and
/// Pattern are recognized by their variant, never by structural shape, so a
/// mapping that merely looks like a temporal value still classifies as
/// `Mapping`.
#[must_use]
pub fn classify(value: &Value) -> Strategy {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_) => {
            Strategy::Primitive
        }
        Value::Temporal(_) => Strategy::Temporal,
        Value::Pattern(_) => Strategy::Pattern,
        Value::Sequence(_) => Strategy::Sequence,
        Value::Mapping(_) => Strategy::Mapping,
        Value::Opaque(_) => Strategy::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use regraft_types::{Mapping, Value};

    use super::{Strategy, classify};

    #[test]
    fn plain_data_is_primitive() {
        for value in [
            Value::Null,
            Value::Bool(true),
            Value::Int(7),
            Value::Float(1.5),
            Value::text("s"),
        ] {
            assert_eq!(classify(&value), Strategy::Primitive);
        }
    }

    #[test]
    fn containers_classify_by_shape() {
        assert_eq!(classify(&Value::sequence(vec![])), Strategy::Sequence);
        assert_eq!(classify(&Value::mapping(Mapping::new())), Strategy::Mapping);
    }

    #[test]
    fn temporal_lookalike_mapping_stays_mapping() {
        // A mapping carrying the same field names a temporal value might
        // expose must classify by its variant, not its shape.
        let mut entries = Mapping::new();
        entries.insert("seconds", Value::Int(1_628_726_400));
        entries.insert("nanos", Value::Int(0));
        assert_eq!(classify(&Value::mapping(entries)), Strategy::Mapping);
    }
}
