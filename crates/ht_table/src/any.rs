use std::{fmt, hash::BuildHasher};

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    chained::ChainedTable,
    double::DoubleTable,
    error::Result,
    hash::IdentityState,
    key::NumericKey,
    linear::LinearTable,
    render::Render,
    table::Table,
};

/// Collision resolution strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Separate chaining, see [`ChainedTable`].
    #[default]
    Chained,

    /// Linear probing, see [`LinearTable`].
    Linear,

    /// Double hashing, see [`DoubleTable`].
    Double,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chained => "chained",
            Self::Linear => "linear",
            Self::Double => "double",
        })
    }
}

/// A table whose strategy is picked at runtime.
///
/// Keys must be numeric, since any instance may be a [`DoubleTable`].
#[derive(Debug, Clone)]
pub enum AnyTable<K, V, S = IdentityState> {
    Chained(ChainedTable<K, V, S>),
    Linear(LinearTable<K, V, S>),
    Double(DoubleTable<K, V, S>),
}

macro_rules! dispatch {
    ($self:expr, $table:ident => $body:expr) => {
        match $self {
            AnyTable::Chained($table) => $body,
            AnyTable::Linear($table) => $body,
            AnyTable::Double($table) => $body,
        }
    };
}

impl<K, V> AnyTable<K, V, IdentityState> {
    pub fn new(strategy: Strategy, capacity: usize) -> Result<Self> {
        Self::with_hasher(strategy, capacity, IdentityState::default())
    }
}

impl<K, V, S> AnyTable<K, V, S> {
    pub fn with_hasher(strategy: Strategy, capacity: usize, hasher: S) -> Result<Self> {
        Ok(match strategy {
            Strategy::Chained => Self::Chained(ChainedTable::with_hasher(capacity, hasher)?),
            Strategy::Linear => Self::Linear(LinearTable::with_hasher(capacity, hasher)?),
            Strategy::Double => Self::Double(DoubleTable::with_hasher(capacity, hasher)?),
        })
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Chained(_) => Strategy::Chained,
            Self::Linear(_) => Strategy::Linear,
            Self::Double(_) => Strategy::Double,
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        dispatch!(self, t => Box::new(t.iter()))
    }
}

impl<K: NumericKey, V, S: BuildHasher> Table<K, V> for AnyTable<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        dispatch!(self, t => t.put(key, value))
    }

    fn get(&self, key: &K) -> Result<&V> {
        dispatch!(self, t => t.get(key))
    }

    fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        dispatch!(self, t => t.get_mut(key))
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        dispatch!(self, t => t.remove(key))
    }

    fn len(&self) -> usize {
        dispatch!(self, t => t.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, t => t.capacity())
    }

    fn clear(&mut self) {
        dispatch!(self, t => t.clear());
    }
}

impl<K: Render, V: Render, S> fmt::Display for AnyTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, t => fmt::Display::fmt(t, f))
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for AnyTable<K, V, S> {
    fn serialize<Ser>(&self, ser: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        dispatch!(self, t => t.serialize(ser))
    }
}
