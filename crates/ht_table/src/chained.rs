//! Separate chaining.
//!
//! Each slot holds an insertion-ordered bucket of entries. Keys whose home
//! slots collide share a bucket, so a chained table never runs out of room.

use std::{
    fmt,
    hash::BuildHasher,
    iter,
};

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::{
    entry::Entry,
    error::{Error, Result},
    hash::{IdentityState, slot_index},
    key::Key,
    render::{NULL, Render, write_list},
    table::Table,
};

type Bucket<K, V> = Vec<Entry<K, V>>;

/// A fixed-capacity table resolving collisions by chaining.
///
/// A slot that never held an entry has no bucket at all. Removing the last
/// entry of a bucket leaves an empty bucket behind, which renders as `[]`
/// rather than as `null`.
#[derive(Debug, Clone)]
pub struct ChainedTable<K, V, S = IdentityState> {
    buckets: Box<[Option<Bucket<K, V>>]>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainedTable<K, V, IdentityState> {
    /// Creates an empty table with `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, IdentityState::default())
    }
}

impl<K, V, S> ChainedTable<K, V, S> {
    /// Creates an empty table with `capacity` slots, hashing keys with
    /// `hasher`.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            buckets: absent_buckets(capacity),
            len: 0,
            hasher,
        })
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The raw buckets, indexed by slot.
    pub fn buckets(&self) -> &[Option<Bucket<K, V>>] {
        &self.buckets
    }

    /// Iterates over all entries, by slot and then by insertion order within
    /// a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .flatten()
            .map(|entry| (entry.key(), entry.value()))
    }
}

impl<K: Key, V, S: BuildHasher> ChainedTable<K, V, S> {
    fn index_of(&self, key: &K) -> usize {
        slot_index(key, &self.hasher, self.buckets.len())
    }
}

impl<K: Key, V, S: BuildHasher> Table<K, V> for ChainedTable<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        let index = self.index_of(&key);
        let bucket = self.buckets[index].get_or_insert_with(Vec::new);

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key() == &key) {
            entry.set_value(value);
            trace!(index, "Updated entry in bucket.");
            return Ok(());
        }

        bucket.push(Entry::new(key, value));
        self.len += 1;
        trace!(index, len = self.len, "Appended entry to bucket.");

        Ok(())
    }

    fn get(&self, key: &K) -> Result<&V> {
        self.buckets[self.index_of(key)]
            .iter()
            .flatten()
            .find(|entry| entry.key() == key)
            .map(Entry::value)
            .ok_or(Error::NotFound)
    }

    fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let index = self.index_of(key);
        self.buckets[index]
            .iter_mut()
            .flatten()
            .find(|entry| entry.key() == key)
            .map(Entry::value_mut)
            .ok_or(Error::NotFound)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let index = self.index_of(key);
        let bucket = self.buckets[index].as_mut().ok_or(Error::NotFound)?;
        let position = bucket
            .iter()
            .position(|entry| entry.key() == key)
            .ok_or(Error::NotFound)?;

        let (_, value) = bucket.remove(position).into_parts();
        self.len -= 1;
        trace!(index, len = self.len, "Removed entry from bucket.");

        Ok(value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        self.buckets = absent_buckets(self.buckets.len());
        self.len = 0;
    }
}

impl<K: Render, V: Render, S> fmt::Display for ChainedTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.buckets.iter(), |f, bucket| match bucket {
            None => f.write_str(NULL),
            Some(entries) => write_list(f, entries, |f, entry| entry.render(f)),
        })
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for ChainedTable<K, V, S> {
    fn serialize<Ser>(&self, ser: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        ser.collect_seq(self.buckets.iter())
    }
}

fn absent_buckets<K, V>(capacity: usize) -> Box<[Option<Bucket<K, V>>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}
