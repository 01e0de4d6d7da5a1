//! Dense integer ids for task and person names.
//!
//! Ids are handed out in first-seen order, so an interner built from a
//! declaration-ordered list doubles as an index into parallel `Vec`s.

use rustc_hash::FxHashMap;

/// Interned id (u32 for compact storage and fast hashing).
pub type IdInt = u32;

/// Maps string ids to dense integers and back.
#[derive(Debug, Clone)]
pub struct IdInterner {
    to_int: FxHashMap<String, IdInt>,
    from_int: Vec<String>,
}

impl IdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name that must not have been seen before.
    ///
    /// Returns `None` (and leaves the interner unchanged) for a repeat.
    pub fn insert_new(&mut self, name: &str) -> Option<IdInt> {
        if self.to_int.contains_key(name) {
            return None;
        }
        let id = self.from_int.len() as IdInt;
        self.from_int.push(name.to_string());
        self.to_int.insert(name.to_string(), id);
        Some(id)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<IdInt> {
        self.to_int.get(name).copied()
    }

    /// Name for an id handed out by this interner.
    ///
    /// Panics on a foreign id; ids never outlive the interner that made them.
    #[inline]
    pub fn name(&self, id: IdInt) -> &str {
        &self.from_int[id as usize]
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

impl Default for IdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut interner = IdInterner::with_capacity(3);

        assert_eq!(interner.insert_new("design"), Some(0));
        assert_eq!(interner.insert_new("build"), Some(1));
        assert_eq!(interner.insert_new("design"), None);
        assert_eq!(interner.len(), 2);

        assert_eq!(interner.name(1), "build");
        assert_eq!(interner.get("design"), Some(0));
        assert_eq!(interner.get("ship"), None);
    }
}
