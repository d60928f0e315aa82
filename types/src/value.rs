//! The universal value union the clone engine operates over.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::ids::ObjectId;
use crate::mapping::Mapping;
use crate::pattern::PatternValue;

/// A value with no defined deep-clone strategy.
///
/// Implementors are things like callbacks or live connections: values the
/// engine cannot reconstruct and, by default policy, shares by reference
/// instead of cloning.
pub trait OpaqueValue: fmt::Debug {
    /// Human-readable kind, used in diagnostics and strict-mode errors.
    fn type_name(&self) -> &str;
}

/// The universal tagged union.
///
/// `Clone` on a `Value` is a shallow handle copy: containers, patterns and
/// opaque values share their allocation with the original. Producing an
/// independent copy is the engine's job, not `Clone`'s.
#[derive(Clone)]
pub enum Value {
    /// Null/absent marker.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// An instant in time.
    Temporal(DateTime<Utc>),
    /// A compiled match-pattern with flags and scan offset.
    Pattern(Rc<PatternValue>),
    /// Ordered, ordinally-indexed container.
    Sequence(Rc<RefCell<Vec<Value>>>),
    /// Ordered, key-indexed container.
    Mapping(Rc<RefCell<Mapping>>),
    /// No clone strategy; shared by reference.
    Opaque(Rc<dyn OpaqueValue>),
}

impl Value {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn sequence(items: Vec<Self>) -> Self {
        Self::Sequence(Rc::new(RefCell::new(items)))
    }

    #[must_use]
    pub fn mapping(entries: Mapping) -> Self {
        Self::Mapping(Rc::new(RefCell::new(entries)))
    }

    #[must_use]
    pub fn pattern(pattern: PatternValue) -> Self {
        Self::Pattern(Rc::new(pattern))
    }

    #[must_use]
    pub fn opaque(value: Rc<dyn OpaqueValue>) -> Self {
        Self::Opaque(value)
    }

    /// Kind name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Temporal(_) => "temporal",
            Self::Pattern(_) => "pattern",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Allocation identity, for values that have one.
    ///
    /// Only reference-holding kinds carry an identity; plain data returns
    /// `None`. The returned id is valid only while the value is alive.
    #[must_use]
    pub fn identity(&self) -> Option<ObjectId> {
        match self {
            Self::Sequence(rc) => Some(ObjectId::new(Rc::as_ptr(rc) as usize)),
            Self::Mapping(rc) => Some(ObjectId::new(Rc::as_ptr(rc) as usize)),
            Self::Pattern(rc) => Some(ObjectId::new(Rc::as_ptr(rc) as usize)),
            Self::Opaque(rc) => Some(ObjectId::new(Rc::as_ptr(rc).cast::<()>() as usize)),
            _ => None,
        }
    }

    /// Whether `self` and `other` are handles to the same allocation.
    ///
    /// Always false for plain data, which has no identity to share.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&Rc<RefCell<Vec<Self>>>> {
        match self {
            Self::Sequence(rc) => Some(rc),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Rc<RefCell<Mapping>>> {
        match self {
            Self::Mapping(rc) => Some(rc),
            _ => None,
        }
    }
}

/// Dropping a deeply nested graph through the default drop glue would
/// recurse once per level and overflow the call stack, defeating the point
/// of an iterative clone engine. Instead, when the last handle to a
/// container goes away its children are drained onto an explicit worklist
/// and released one at a time.
///
/// Reference cycles keep their interior strong counts above one and are
/// leaked, as with any `Rc` graph; callers that build cycles and care about
/// reclamation must break them by hand before dropping the last handle.
impl Drop for Value {
    fn drop(&mut self) {
        let mut worklist: Vec<Self> = Vec::new();
        detach_children(self, &mut worklist);
        while let Some(mut value) = worklist.pop() {
            detach_children(&mut value, &mut worklist);
        }
    }
}

/// Move the children out of `value` if it is the sole owner of a container.
fn detach_children(value: &mut Value, worklist: &mut Vec<Value>) {
    match value {
        Value::Sequence(rc) if Rc::strong_count(rc) == 1 => {
            worklist.append(&mut *rc.borrow_mut());
        }
        Value::Mapping(rc) if Rc::strong_count(rc) == 1 => {
            worklist.extend(rc.borrow_mut().take_entries().into_iter().map(|(_, v)| v));
        }
        _ => {}
    }
}

/// Shallow, cycle-safe rendering: containers print their shape and length,
/// never their children. A cyclic graph would otherwise recurse forever here.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Text(v) => write!(f, "Text({v:?})"),
            Self::Temporal(v) => write!(f, "Temporal({})", v.to_rfc3339()),
            Self::Pattern(v) => write!(f, "{v:?}"),
            Self::Sequence(rc) => write!(f, "Sequence(len={})", rc.borrow().len()),
            Self::Mapping(rc) => write!(f, "Mapping(len={})", rc.borrow().len()),
            Self::Opaque(v) => write!(f, "Opaque({})", v.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Temporal(v)
    }
}
