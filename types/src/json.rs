//! JSON interop for value graphs.
//!
//! This is a lossy exchange surface for the CLI, not a clone path: temporal
//! values downgrade to RFC 3339 strings, patterns to their source text, and
//! symbol-keyed entries are dropped (JSON has no alternate keys). The engine
//! itself never round-trips values through JSON, precisely because of these
//! losses.

use serde_json::{Map, Number, Value as Json};
use thiserror::Error;

use crate::ids::ObjectId;
use crate::mapping::Mapping;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum JsonError {
    /// The graph contains a reference cycle; JSON trees cannot express one.
    #[error("value graph is cyclic and cannot be rendered as JSON")]
    CyclicGraph,
    /// The value has no JSON rendering at all.
    #[error("{kind} value cannot be rendered as JSON")]
    Unrepresentable { kind: &'static str },
}

/// Build a value graph from a parsed JSON document.
///
/// JSON documents are trees, so the result never contains cycles or shared
/// references.
#[must_use]
pub fn value_from_json(doc: Json) -> Value {
    match doc {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(v),
        Json::Number(n) => n
            .as_i64()
            .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Int),
        Json::String(s) => Value::Text(s),
        Json::Array(items) => {
            Value::sequence(items.into_iter().map(value_from_json).collect())
        }
        Json::Object(fields) => {
            let mut entries = Mapping::with_capacity(fields.len());
            for (key, field) in fields {
                entries.insert(key, value_from_json(field));
            }
            Value::mapping(entries)
        }
    }
}

/// Render a value graph as a JSON document.
///
/// Fails with [`JsonError::CyclicGraph`] if the graph contains a cycle and
/// with [`JsonError::Unrepresentable`] on opaque values. Shared (acyclic)
/// subgraphs are duplicated in the output; JSON has no way to express
/// aliasing.
///
/// Rendering recurses, like serde_json's own serializer: this surface is
/// for interop documents, not for the arbitrarily deep graphs the clone
/// engine handles iteratively.
pub fn value_to_json(value: &Value) -> Result<Json, JsonError> {
    let mut path = Vec::new();
    render(value, &mut path)
}

fn render(value: &Value, path: &mut Vec<ObjectId>) -> Result<Json, JsonError> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(v) => Ok(Json::Bool(*v)),
        Value::Int(v) => Ok(Json::from(*v)),
        Value::Float(v) => Ok(Number::from_f64(*v).map_or(Json::Null, Json::Number)),
        Value::Text(v) => Ok(Json::String(v.clone())),
        Value::Temporal(v) => Ok(Json::String(v.to_rfc3339())),
        Value::Pattern(v) => Ok(Json::String(v.source().to_string())),
        Value::Opaque(_) => Err(JsonError::Unrepresentable { kind: "opaque" }),
        Value::Sequence(rc) => {
            let id = enter(value, path)?;
            let items = rc.borrow();
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(render(item, path)?);
            }
            leave(id, path);
            Ok(Json::Array(out))
        }
        Value::Mapping(rc) => {
            let id = enter(value, path)?;
            let entries = rc.borrow();
            let mut out = Map::with_capacity(entries.len());
            for (key, entry) in entries.named() {
                out.insert(key.to_string(), render(entry, path)?);
            }
            leave(id, path);
            Ok(Json::Object(out))
        }
    }
}

fn enter(value: &Value, path: &mut Vec<ObjectId>) -> Result<ObjectId, JsonError> {
    let id = value.identity().ok_or(JsonError::Unrepresentable {
        kind: "unidentified container",
    })?;
    if path.contains(&id) {
        return Err(JsonError::CyclicGraph);
    }
    path.push(id);
    Ok(id)
}

fn leave(id: ObjectId, path: &mut Vec<ObjectId>) {
    debug_assert_eq!(path.last(), Some(&id));
    path.pop();
}
