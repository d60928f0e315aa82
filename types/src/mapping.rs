//! Insertion-ordered keyed collections.

use std::mem;

use crate::key::{MapKey, SymbolKey};
use crate::value::Value;

/// An ordered collection of key→value pairs.
///
/// Entries keep insertion order. Named and symbol-keyed entries live in the
/// same store, but enumeration is split: [`Mapping::named`] yields only
/// ordinary entries, [`Mapping::symbols`] only alternate-keyed ones. Code
/// that needs every entry must walk both passes; there is deliberately no
/// single "all keys" iterator to fall back on.
#[derive(Debug, Default)]
pub struct Mapping {
    entries: Vec<(MapKey, Value)>,
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, key: impl Into<MapKey>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Convenience lookup by ordinary name.
    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.get(&MapKey::name(name))
    }

    #[must_use]
    pub fn get_symbol(&self, key: &SymbolKey) -> Option<&Value> {
        self.get(&MapKey::Symbol(key.clone()))
    }

    /// Ordinary entries, in insertion order. Symbol-keyed entries are
    /// invisible here.
    pub fn named(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            MapKey::Name(name) => Some((name.as_str(), v)),
            MapKey::Symbol(_) => None,
        })
    }

    /// Alternate-keyed entries, in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = (&SymbolKey, &Value)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            MapKey::Name(_) => None,
            MapKey::Symbol(sym) => Some((sym, v)),
        })
    }

    /// Take every entry out, leaving the mapping empty. Used by the
    /// iterative drop path in `value`.
    pub(crate) fn take_entries(&mut self) -> Vec<(MapKey, Value)> {
        mem::take(&mut self.entries)
    }

    /// Every key, named first then symbols, each group in insertion order.
    ///
    /// This is the enumeration the clone engine uses; the explicit two-pass
    /// order keeps clone layout deterministic.
    #[must_use]
    pub fn ordered_keys(&self) -> Vec<MapKey> {
        let mut keys: Vec<MapKey> = self
            .entries
            .iter()
            .filter(|(k, _)| k.is_named())
            .map(|(k, _)| k.clone())
            .collect();
        keys.extend(
            self.entries
                .iter()
                .filter(|(k, _)| !k.is_named())
                .map(|(k, _)| k.clone()),
        );
        keys
    }
}
