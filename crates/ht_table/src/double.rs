//! Double hashing.
//!
//! The probe stride is derived from the key itself. With `p` the largest
//! prime below the capacity `m`, attempt `i` for key `k` visits
//! `(hash(k) + i * (p - k mod p)) mod m`, where `mod` keeps the sign of the
//! key. The stride is never zero, and when `m` is prime every stride below
//! `m` reaches all `m` slots.

use std::{fmt, hash::BuildHasher};

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::{
    error::Result,
    hash::{IdentityState, slot_index},
    key::NumericKey,
    render::Render,
    slot::{Slot, Slots, probe_sequence},
    table::Table,
};

/// A fixed-capacity open-addressing table with a key-derived probe stride.
#[derive(Debug, Clone)]
pub struct DoubleTable<K, V, S = IdentityState> {
    slots: Slots<K, V>,
    hasher: S,
    prime: usize,
}

impl<K, V> DoubleTable<K, V, IdentityState> {
    /// Creates an empty table with `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, IdentityState::default())
    }
}

impl<K, V, S> DoubleTable<K, V, S> {
    /// Creates an empty table with `capacity` slots, hashing keys with
    /// `hasher`.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        let slots = Slots::new(capacity)?;
        let prime = largest_prime_below(capacity);

        if !is_prime(capacity) {
            warn!(
                capacity,
                prime, "Capacity is not prime, some probe strides will not reach every slot."
            );
        }

        Ok(Self {
            slots,
            hasher,
            prime,
        })
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The prime `p` the probe stride is derived from.
    pub fn helper_prime(&self) -> usize {
        self.prime
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

impl<K: NumericKey, V, S: BuildHasher> DoubleTable<K, V, S> {
    /// The physical slot holding `key`, if a lookup can reach it.
    pub fn slot_of(&self, key: &K) -> Result<Option<usize>> {
        Ok(self.slots.find(self.probe(key)?, key))
    }

    /// The probe stride of `key`, in `1..2p`.
    ///
    /// Negative keys leave a negative remainder, so their stride exceeds `p`.
    pub fn stride(&self, key: &K) -> Result<usize> {
        #[allow(clippy::cast_possible_wrap)]
        let prime = self.prime as i64;
        let remainder = key.numeric_value()? % prime;

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let stride = (prime - remainder) as usize;

        Ok(stride)
    }

    fn probe(&self, key: &K) -> Result<impl Iterator<Item = usize> + use<K, V, S>> {
        let capacity = self.slots.capacity();
        let home = slot_index(key, &self.hasher, capacity);

        Ok(probe_sequence(home, self.stride(key)?, capacity))
    }
}

impl<K: NumericKey, V, S: BuildHasher> Table<K, V> for DoubleTable<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        let probe = self.probe(&key)?;
        self.slots.put(probe, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        self.slots.get(self.probe(key)?, key)
    }

    fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let probe = self.probe(key)?;
        self.slots.get_mut(probe, key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let probe = self.probe(key)?;
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

impl<K: Render, V: Render, S> fmt::Display for DoubleTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.render(f)
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for DoubleTable<K, V, S> {
    fn serialize<Ser>(&self, ser: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.slots.serialize(ser)
    }
}

/// The largest prime strictly below `n`, or 2 if there is none.
fn largest_prime_below(n: usize) -> usize {
    (2..n).rev().find(|&c| is_prime(c)).unwrap_or(2)
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}
