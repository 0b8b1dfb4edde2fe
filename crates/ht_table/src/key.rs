use std::hash::{BuildHasher, Hash};

use crate::error::{Error, Result};

/// A key that can be stored in a table.
///
/// Keys are compared by equality and hashed through the table's
/// [`BuildHasher`]. Wrapping a key type in [`Option`] makes it nullable:
/// `None` is a valid key, distinct from every `Some`, and always hashes to
/// the first slot.
pub trait Key: Eq + Hash {
    /// Returns `true` if this is the null key.
    fn is_null(&self) -> bool {
        false
    }

    /// The key's intrinsic hash under `state`.
    fn hash_with<S: BuildHasher>(&self, state: &S) -> u64 {
        state.hash_one(self)
    }
}

/// A key with a natural integer value.
///
/// Double hashing derives its probe stride from this value rather than from
/// a second hash.
pub trait NumericKey: Key {
    /// The integer value of the key, or [`Error::NonNumericKey`] if the key
    /// has none.
    fn numeric_value(&self) -> Result<i64>;
}

impl<K: Key> Key for Option<K> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn hash_with<S: BuildHasher>(&self, state: &S) -> u64 {
        self.as_ref().map_or(0, |key| key.hash_with(state))
    }
}

impl<K: NumericKey> NumericKey for Option<K> {
    fn numeric_value(&self) -> Result<i64> {
        self.as_ref().map_or(Ok(0), NumericKey::numeric_value)
    }
}

impl<K: Key + ?Sized> Key for &K {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    fn hash_with<S: BuildHasher>(&self, state: &S) -> u64 {
        (**self).hash_with(state)
    }
}

impl<K: NumericKey + ?Sized> NumericKey for &K {
    fn numeric_value(&self) -> Result<i64> {
        (**self).numeric_value()
    }
}

macro_rules! impl_key {
    ($($ty:ty),* $(,)?) => {
        $(impl Key for $ty {})*
    };
}

impl_key!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

macro_rules! impl_numeric_key {
    (lossless: $($ty:ty),*) => {
        $(impl NumericKey for $ty {
            fn numeric_value(&self) -> Result<i64> {
                Ok(i64::from(*self))
            }
        })*
    };
    (checked: $($ty:ty),*) => {
        $(impl NumericKey for $ty {
            fn numeric_value(&self) -> Result<i64> {
                i64::try_from(*self).map_err(|_| Error::NonNumericKey(self.to_string()))
            }
        })*
    };
}

impl_numeric_key!(lossless: i8, i16, i32, i64, u8, u16, u32);
impl_numeric_key!(checked: i128, isize, u64, u128, usize);

impl NumericKey for str {
    fn numeric_value(&self) -> Result<i64> {
        self.parse()
            .map_err(|_| Error::NonNumericKey(self.to_owned()))
    }
}

impl NumericKey for String {
    fn numeric_value(&self) -> Result<i64> {
        self.as_str().numeric_value()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use test_log::test;

    use super::*;
    use crate::hash::IdentityState;

    #[test]
    fn null_key_is_distinct() {
        let state = IdentityState::default();

        assert!(None::<i32>.is_null());
        assert!(!Some(0).is_null());
        assert!(!0_i32.is_null());
        assert_eq!(None::<i32>.hash_with(&state), 0);
        assert_eq!(Some(42_i32).hash_with(&state), 42_i32.hash_with(&state));
    }

    #[test]
    fn numeric_values() {
        assert_eq!(7_u8.numeric_value(), Ok(7));
        assert_eq!((-3_i32).numeric_value(), Ok(-3));
        assert_eq!(None::<i64>.numeric_value(), Ok(0));
        assert_eq!(Some(11_i64).numeric_value(), Ok(11));
        assert_eq!("-12".numeric_value(), Ok(-12));
        assert_eq!(String::from("99").numeric_value(), Ok(99));
    }

    #[test]
    fn non_numeric_keys_are_rejected() {
        assert_matches!("abc".numeric_value(), Err(Error::NonNumericKey(s)) if s == "abc");
        assert_matches!(" 1".numeric_value(), Err(Error::NonNumericKey(_)));
        assert_matches!(u64::MAX.numeric_value(), Err(Error::NonNumericKey(_)));
    }
}
