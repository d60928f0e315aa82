//! Shape-preserving container allocation.

use regraft_types::{MapKey, Mapping, Value};

/// Where a resolved child lands in its parent clone.
#[derive(Debug, Clone)]
pub(crate) enum SlotKey {
    Index(usize),
    Key(MapKey),
}

/// Allocate a clone container of the same shape as `shape_of`, with every
/// slot pre-created and holding `Null`.
///
/// Pre-creating the slots (rather than appending as tasks resolve) makes
/// clone layout independent of work-queue pop order: sequences get their
/// full length of placeholders, mappings get the source's complete key list,
/// named keys first and then symbol keys, each group in insertion order.
/// Symbol-keyed slots are created here like any other; dropping them is the
/// regression the tests pin.
///
/// Returns `None` when `shape_of` is not a container.
pub(crate) fn allocate_empty(shape_of: &Value) -> Option<Value> {
    match shape_of {
        Value::Sequence(rc) => {
            let len = rc.borrow().len();
            Some(Value::sequence(vec![Value::Null; len]))
        }
        Value::Mapping(rc) => {
            let source = rc.borrow();
            let mut entries = Mapping::with_capacity(source.len());
            for key in source.ordered_keys() {
                entries.insert(key, Value::Null);
            }
            Some(Value::mapping(entries))
        }
        _ => None,
    }
}

/// Store `value` at `slot` in a container produced by [`allocate_empty`].
pub(crate) fn write(parent: &Value, slot: &SlotKey, value: Value) {
    match (parent, slot) {
        (Value::Sequence(rc), SlotKey::Index(index)) => {
            rc.borrow_mut()[*index] = value;
        }
        (Value::Mapping(rc), SlotKey::Key(key)) => {
            rc.borrow_mut().insert(key.clone(), value);
        }
        _ => debug_assert!(false, "slot kind does not match container shape"),
    }
}

#[cfg(test)]
mod tests {
    use regraft_types::{MapKey, Mapping, SymbolKey, Value};

    use super::{SlotKey, allocate_empty, write};

    #[test]
    fn sequence_allocates_same_length() {
        let source = Value::sequence(vec![Value::Int(1), Value::Int(2)]);
        let shell = allocate_empty(&source).unwrap();
        let items = shell.as_sequence().unwrap().borrow();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| matches!(item, Value::Null)));
    }

    #[test]
    fn mapping_allocates_full_key_list() {
        let sym = SymbolKey::new("alt");
        let mut entries = Mapping::new();
        entries.insert("a", Value::Int(1));
        entries.insert(sym.clone(), Value::Int(2));
        let source = Value::mapping(entries);

        let shell = allocate_empty(&source).unwrap();
        let shell_entries = shell.as_mapping().unwrap().borrow();
        assert!(matches!(shell_entries.get_named("a"), Some(Value::Null)));
        assert!(matches!(shell_entries.get_symbol(&sym), Some(Value::Null)));
    }

    #[test]
    fn shape_never_crosses() {
        let shell = allocate_empty(&Value::sequence(vec![])).unwrap();
        assert!(shell.as_sequence().is_some());
        let shell = allocate_empty(&Value::mapping(Mapping::new())).unwrap();
        assert!(shell.as_mapping().is_some());
        assert!(allocate_empty(&Value::Int(1)).is_none());
    }

    #[test]
    fn write_fills_slots() {
        let seq = Value::sequence(vec![Value::Null, Value::Null]);
        write(&seq, &SlotKey::Index(1), Value::Int(9));
        assert!(matches!(seq.as_sequence().unwrap().borrow()[1], Value::Int(9)));

        let map = allocate_empty(&{
            let mut entries = Mapping::new();
            entries.insert("k", Value::Int(0));
            Value::mapping(entries)
        })
        .unwrap();
        write(&map, &SlotKey::Key(MapKey::name("k")), Value::Int(9));
        assert!(matches!(
            map.as_mapping().unwrap().borrow().get_named("k"),
            Some(Value::Int(9))
        ));
    }
}
