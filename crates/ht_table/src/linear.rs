//! Linear probing.
//!
//! A key whose home slot is taken moves on to the next slot, wrapping around
//! at the end of the array: attempt `i` visits `(hash(k) + i) mod m`.

use std::{fmt, hash::BuildHasher};

use serde::{Serialize, Serializer};

use crate::{
    error::Result,
    hash::{IdentityState, slot_index},
    key::Key,
    render::Render,
    slot::{Slot, Slots, probe_sequence},
    table::Table,
};

/// A fixed-capacity open-addressing table with unit probe stride.
#[derive(Debug, Clone)]
pub struct LinearTable<K, V, S = IdentityState> {
    slots: Slots<K, V>,
    hasher: S,
}

impl<K, V> LinearTable<K, V, IdentityState> {
    /// Creates an empty table with `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, IdentityState::default())
    }
}

impl<K, V, S> LinearTable<K, V, S> {
    /// Creates an empty table with `capacity` slots, hashing keys with
    /// `hasher`.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        Ok(Self {
            slots: Slots::new(capacity)?,
            hasher,
        })
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The raw slots, in physical order.
    pub fn slots(&self) -> &[Slot<K, V>] {
        self.slots.as_slice()
    }

    /// Returns `true` if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Iterates over all entries in physical slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter()
    }
}

impl<K: Key, V, S: BuildHasher> LinearTable<K, V, S> {
    /// The physical slot holding `key`, if a lookup can reach it.
    pub fn slot_of(&self, key: &K) -> Option<usize> {
        self.slots.find(self.probe(key), key)
    }

    fn probe(&self, key: &K) -> impl Iterator<Item = usize> + use<K, V, S> {
        let capacity = self.slots.capacity();
        probe_sequence(slot_index(key, &self.hasher, capacity), 1, capacity)
    }
}

impl<K: Key, V, S: BuildHasher> Table<K, V> for LinearTable<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        let probe = self.probe(&key);
        self.slots.put(probe, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        self.slots.get(self.probe(key), key)
    }

    fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let probe = self.probe(key);
        self.slots.get_mut(probe, key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let probe = self.probe(key);
        self.slots.remove(probe, key)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<K: Render, V: Render, S> fmt::Display for LinearTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.render(f)
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for LinearTable<K, V, S> {
    fn serialize<Ser>(&self, ser: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.slots.serialize(ser)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::error::Error;

    fn table() -> LinearTable<i32, &'static str> {
        LinearTable::new(5).unwrap()
    }

    #[test]
    fn collision_moves_to_next_slot() {
        let mut t = table();
        t.put(6, "A").unwrap();
        t.put(6, "A+").unwrap();
        t.put(8, "B").unwrap();
        t.put(11, "C").unwrap();

        assert_eq!(t.to_string(), "[null, 6=A+, 11=C, 8=B, null]");
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(&6), Ok(&"A+"));
        assert_eq!(t.get(&11), Ok(&"C"));
        assert_eq!(t.slot_of(&11), Some(2));
    }

    #[test]
    fn probe_wraps_past_the_end() {
        let mut t = table();
        t.put(4, "a").unwrap();
        t.put(9, "b").unwrap();
        t.put(14, "c").unwrap();

        assert_eq!(t.to_string(), "[9=b, 14=c, null, null, 4=a]");
        assert_eq!(t.get(&14), Ok(&"c"));
    }

    #[test]
    fn accepts_exactly_capacity_keys() {
        let mut t = table();
        for k in [1, 2, 3, 5, 6] {
            t.put(k, "v").unwrap();
        }

        assert!(t.is_full());
        assert_eq!(t.to_string(), "[5=v, 1=v, 2=v, 3=v, 6=v]");
        assert_matches!(t.put(7, "w"), Err(Error::Full { capacity: 5 }));
        assert_eq!(t.len(), 5);

        // Updating an existing key in a full table still succeeds.
        t.put(6, "u").unwrap();
        assert_eq!(t.get(&6), Ok(&"u"));

        t.remove(&3).unwrap();
        t.put(7, "w").unwrap();
        assert_eq!(t.slot_of(&7), Some(3));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn remove_then_reinsert() {
        let mut t = table();
        t.put(0, "a").unwrap();
        t.remove(&0).unwrap();
        assert_eq!(t.get(&0), Err(Error::NotFound));

        t.put(0, "z").unwrap();
        assert_eq!(t.get(&0), Ok(&"z"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn missing_keys_are_not_found() {
        let mut t = table();
        assert_eq!(t.get(&3), Err(Error::NotFound));
        assert_eq!(t.remove(&3), Err(Error::NotFound));

        for k in [1, 2, 3, 5, 6] {
            t.put(k, "v").unwrap();
        }
        assert_eq!(t.get(&11), Err(Error::NotFound));
        assert_eq!(t.remove(&11), Err(Error::NotFound));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn emptied_slot_hides_later_chain_members() {
        let mut t = table();
        t.put(6, "A").unwrap();
        t.put(11, "C").unwrap();
        t.remove(&6).unwrap();

        // Without tombstones the lookup for 11 stops at the emptied slot 1.
        assert_eq!(t.get(&11), Err(Error::NotFound));
        assert_eq!(t.remove(&11), Err(Error::NotFound));
        assert!(!t.contains_key(&11));

        // A put walks the whole sequence, so it updates rather than
        // duplicates.
        t.put(11, "C2").unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.to_string(), "[null, null, 11=C2, null, null]");
    }

    #[test]
    fn null_key_probes_from_slot_zero() {
        let mut t: LinearTable<Option<i32>, Option<&str>> = LinearTable::new(3).unwrap();
        t.put(Some(3), Some("three")).unwrap();
        t.put(None, None).unwrap();

        assert_eq!(t.to_string(), "[3=three, null=null, null]");
        assert_eq!(t.get(&None), Ok(&None));
        assert_eq!(t.slot_of(&None), Some(1));
    }

    #[test]
    fn get_mut_and_clear() {
        let mut t: LinearTable<u32, u32> = LinearTable::new(4).unwrap();
        t.put(1, 10).unwrap();
        *t.get_mut(&1).unwrap() += 5;
        assert_eq!(t.get(&1), Ok(&15));

        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.to_string(), "[null, null, null, null]");
    }

    #[test]
    fn iterates_in_slot_order() {
        let mut t = table();
        for (k, v) in [(4, "a"), (9, "b"), (2, "c")] {
            t.put(k, v).unwrap();
        }

        let keys: Vec<_> = t.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![9, 2, 4]);
    }

    #[test]
    fn serializes_slots() {
        let mut t: LinearTable<i32, i32> = LinearTable::new(3).unwrap();
        t.put(1, 100).unwrap();

        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[null,{"key":1,"value":100},null]"#);
    }
}
