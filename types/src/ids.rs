use std::fmt;

/// Allocation identity of a container value.
///
/// Two handles compare equal here exactly when they point at the same
/// allocation. This is address identity, never content equality: two
/// structurally identical mappings have distinct `ObjectId`s. Valid only
/// while the allocation is alive, which is why identities are compared
/// within a single traversal and never stored across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    #[must_use]
    pub fn new(addr: usize) -> Self {
        Self(addr)
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;

    #[test]
    fn equality_is_by_address() {
        assert_eq!(ObjectId::new(0x10), ObjectId::new(0x10));
        assert_ne!(ObjectId::new(0x10), ObjectId::new(0x18));
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(ObjectId::new(255).to_string(), "0xff");
    }
}
