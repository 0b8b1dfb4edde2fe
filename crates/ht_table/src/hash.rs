//! Slot hashing.
//!
//! Every table variant maps a key to its first candidate slot with
//! [`slot_index`]. The default hasher, [`IdentityHasher`], gives integers
//! their own value as hash, so the home slot of integer key `k` in a table of
//! capacity `m` is `|k mod m|`.

use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

use crate::key::Key;

/// The default [`BuildHasher`] of every table.
pub type IdentityState = BuildHasherDefault<IdentityHasher>;

/// A deterministic hasher.
///
/// A single integer write hashes to the integer itself (sign-extended to 64
/// bits). Byte writes fold into the state as `h = 31 * h + b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    fn mix(&mut self, n: u64) {
        self.0 = self.0.wrapping_mul(31).wrapping_add(n);
    }
}

macro_rules! write_signed {
    ($($name:ident: $ty:ty),*) => {
        $(
            #[allow(clippy::cast_sign_loss)]
            fn $name(&mut self, n: $ty) {
                self.mix(i64::from(n) as u64);
            }
        )*
    };
}

macro_rules! write_unsigned {
    ($($name:ident: $ty:ty),*) => {
        $(
            fn $name(&mut self, n: $ty) {
                self.mix(u64::from(n));
            }
        )*
    };
}

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.mix(u64::from(byte));
        }
    }

    write_signed!(write_i8: i8, write_i16: i16, write_i32: i32, write_i64: i64);
    write_unsigned!(write_u8: u8, write_u16: u16, write_u32: u32, write_u64: u64);

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn write_i128(&mut self, n: i128) {
        self.mix(n as u64);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_u128(&mut self, n: u128) {
        self.mix(n as u64 ^ (n >> 64) as u64);
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_isize(&mut self, n: isize) {
        self.mix(n as i64 as u64);
    }

    fn write_usize(&mut self, n: usize) {
        self.mix(n as u64);
    }
}

/// The first candidate slot of `key` in a table of `capacity` slots.
///
/// The null key always maps to slot 0. Other keys take the remainder of their
/// signed 64-bit hash, made non-negative.
pub(crate) fn slot_index<K, S>(key: &K, hasher: &S, capacity: usize) -> usize
where
    K: Key + ?Sized,
    S: BuildHasher,
{
    if key.is_null() {
        return 0;
    }

    #[allow(clippy::cast_possible_wrap)]
    let hash = key.hash_with(hasher) as i64;

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let index = (hash % capacity as i64).unsigned_abs() as usize;

    index
}
