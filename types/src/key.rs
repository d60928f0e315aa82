use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// An alternate key for mapping entries.
///
/// Symbol keys are identified by a process-unique id, not by their
/// description: two symbols created with the same description are distinct
/// keys. Entries stored under a symbol key are excluded from ordinary
/// (named) enumeration and must be traversed through a dedicated pass.
///
/// Equality and hashing use the id alone; the description is a label.
#[derive(Debug, Clone)]
pub struct SymbolKey {
    id: u64,
    description: String,
}

impl PartialEq for SymbolKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SymbolKey {}

impl Hash for SymbolKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl SymbolKey {
    /// Create a fresh symbol. Each call yields a distinct key.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// Key of a mapping entry: an ordinary name or an alternate symbol key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Name(String),
    Symbol(SymbolKey),
}

impl MapKey {
    #[must_use]
    pub fn name(key: impl Into<String>) -> Self {
        Self::Name(key.into())
    }

    /// Whether this key participates in ordinary enumeration.
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        Self::Name(key.to_string())
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        Self::Name(key)
    }
}

impl From<SymbolKey> for MapKey {
    fn from(key: SymbolKey) -> Self {
        Self::Symbol(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{MapKey, SymbolKey};

    #[test]
    fn symbols_with_same_description_are_distinct() {
        let a = SymbolKey::new("foo");
        let b = SymbolKey::new("foo");
        assert_ne!(a, b);
        assert_eq!(a.description(), b.description());
    }

    #[test]
    fn symbol_clone_is_the_same_key() {
        let a = SymbolKey::new("foo");
        assert_eq!(a, a.clone());
    }

    #[test]
    fn named_keys_compare_by_content() {
        assert_eq!(MapKey::name("x"), MapKey::from("x"));
    }

    #[test]
    fn only_names_are_enumerable() {
        assert!(MapKey::name("x").is_named());
        assert!(!MapKey::from(SymbolKey::new("x")).is_named());
    }
}
