//! Open-addressing storage shared by the linear-probing and double-hashing
//! tables.
//!
//! Both variants hold at most one entry per slot and differ only in the probe
//! sequence they walk. Removal empties a slot outright; there are no
//! tombstones, so a lookup stops at the first empty slot it meets.

use std::{fmt, iter};

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::{
    entry::Entry,
    error::{Error, Result},
    render::{NULL, Render, write_list},
};

/// A single open-addressing slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    Empty,
    Occupied(Entry<K, V>),
}

impl<K, V> Slot<K, V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Self::Empty => None,
            Self::Occupied(entry) => Some(entry),
        }
    }

    fn holds(&self, key: &K) -> bool
    where
        K: Eq,
    {
        self.entry().is_some_and(|entry| entry.key() == key)
    }
}

impl<K: Render, V: Render> Render for Slot<K, V> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(NULL),
            Self::Occupied(entry) => entry.render(f),
        }
    }
}

impl<K: Serialize, V: Serialize> Serialize for Slot<K, V> {
    fn serialize<S>(&self, ser: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => ser.serialize_none(),
            Self::Occupied(entry) => ser.serialize_some(entry),
        }
    }
}

/// The slots visited for a key: `home`, `home + step`, `home + 2 * step`, and
/// so on, modulo `capacity`, for exactly `capacity` attempts.
pub(crate) fn probe_sequence(
    home: usize,
    step: usize,
    capacity: usize,
) -> impl Iterator<Item = usize> {
    let step = step % capacity;
    iter::successors(Some(home % capacity), move |&index| {
        Some((index + step) % capacity)
    })
    .take(capacity)
}

/// Where a `put` lands after walking the full probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Existing(usize),
    Vacant(usize),
    Full,
}

/// A fixed array of slots plus its occupancy count.
#[derive(Debug, Clone)]
pub(crate) struct Slots<K, V> {
    slots: Box<[Slot<K, V>]>,
    len: usize,
}

impl<K, V> Slots<K, V> {
    pub(crate) fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub(crate) fn as_slice(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn clear(&mut self) {
        self.slots = empty_slots(self.slots.len());
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots
            .iter()
            .filter_map(Slot::entry)
            .map(|entry| (entry.key(), entry.value()))
    }
}

impl<K: Eq, V> Slots<K, V> {
    /// Inserts or updates `key` along `probe`.
    ///
    /// The whole sequence is walked looking for `key`; only when it is absent
    /// does the entry go into the first empty slot seen on the way.
    pub(crate) fn put(
        &mut self,
        probe: impl Iterator<Item = usize>,
        key: K,
        value: V,
    ) -> Result<()> {
        match self.placement(probe, &key) {
            Placement::Existing(index) => {
                if let Slot::Occupied(entry) = &mut self.slots[index] {
                    entry.set_value(value);
                }
                trace!(index, "Updated entry in slot.");
            }
            Placement::Vacant(index) => {
                self.slots[index] = Slot::Occupied(Entry::new(key, value));
                self.len += 1;
                trace!(index, len = self.len, "Stored entry in slot.");
            }
            Placement::Full => {
                debug!(capacity = self.capacity(), "No empty slot in probe sequence.");
                return Err(Error::Full {
                    capacity: self.capacity(),
                });
            }
        }

        Ok(())
    }

    /// Finds the slot holding `key`.
    ///
    /// The walk ends at the first empty slot, so an entry placed beyond a
    /// slot that has since been emptied is no longer reachable.
    pub(crate) fn find(&self, probe: impl Iterator<Item = usize>, key: &K) -> Option<usize> {
        for (attempt, index) in probe.enumerate() {
            match &self.slots[index] {
                Slot::Empty => {
                    trace!(index, attempt, "Probe hit an empty slot.");
                    return None;
                }
                slot if slot.holds(key) => return Some(index),
                Slot::Occupied(_) => {}
            }
        }

        None
    }

    pub(crate) fn get(&self, probe: impl Iterator<Item = usize>, key: &K) -> Result<&V> {
        let index = self.find(probe, key).ok_or(Error::NotFound)?;
        self.slots[index]
            .entry()
            .map(Entry::value)
            .ok_or(Error::NotFound)
    }

    pub(crate) fn get_mut(
        &mut self,
        probe: impl Iterator<Item = usize>,
        key: &K,
    ) -> Result<&mut V> {
        let index = self.find(probe, key).ok_or(Error::NotFound)?;
        match &mut self.slots[index] {
            Slot::Occupied(entry) => Ok(entry.value_mut()),
            Slot::Empty => Err(Error::NotFound),
        }
    }

    pub(crate) fn remove(&mut self, probe: impl Iterator<Item = usize>, key: &K) -> Result<V> {
        let index = self.find(probe, key).ok_or(Error::NotFound)?;
        match std::mem::replace(&mut self.slots[index], Slot::Empty) {
            Slot::Occupied(entry) => {
                self.len -= 1;
                trace!(index, len = self.len, "Emptied slot.");
                Ok(entry.into_parts().1)
            }
            Slot::Empty => Err(Error::NotFound),
        }
    }

    fn placement(&self, probe: impl Iterator<Item = usize>, key: &K) -> Placement {
        let mut vacant = None;
        for index in probe {
            match &self.slots[index] {
                Slot::Empty => {
                    vacant.get_or_insert(index);
                }
                slot if slot.holds(key) => return Placement::Existing(index),
                Slot::Occupied(_) => {}
            }
        }

        vacant.map_or(Placement::Full, Placement::Vacant)
    }
}

impl<K: Render, V: Render> Slots<K, V> {
    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.slots.iter(), |f, slot| slot.render(f))
    }
}

impl<K: Serialize, V: Serialize> Serialize for Slots<K, V> {
    fn serialize<S>(&self, ser: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.collect_seq(self.slots.iter())
    }
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn probe_sequence_wraps_around() {
        let seq: Vec<_> = probe_sequence(3, 1, 5).collect();
        assert_eq!(seq, vec![3, 4, 0, 1, 2]);

        let seq: Vec<_> = probe_sequence(1, 2, 5).collect();
        assert_eq!(seq, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn probe_sequence_is_bounded_by_capacity() {
        // A stride sharing a factor with the capacity revisits slots.
        let seq: Vec<_> = probe_sequence(0, 2, 4).collect();
        assert_eq!(seq, vec![0, 2, 0, 2]);

        let seq: Vec<_> = probe_sequence(0, 2, 1).collect();
        assert_eq!(seq, vec![0]);
    }

    #[test]
    fn put_prefers_existing_key_over_earlier_hole() {
        let mut slots: Slots<i32, &str> = Slots::new(3).unwrap();
        slots.put([0, 1, 2].into_iter(), 10, "a").unwrap();
        slots.put([0, 1, 2].into_iter(), 20, "b").unwrap();
        slots.remove([0].into_iter(), &10).unwrap();

        // 20 sits behind the emptied slot 0; an update must still find it.
        slots.put([0, 1, 2].into_iter(), 20, "c").unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.as_slice()[1].entry().map(Entry::value), Some(&"c"));
        assert!(slots.as_slice()[0].is_empty());
    }

    #[test]
    fn full_walk_without_vacancy_fails() {
        let mut slots: Slots<i32, ()> = Slots::new(2).unwrap();
        slots.put([0, 1].into_iter(), 1, ()).unwrap();
        slots.put([0, 1].into_iter(), 2, ()).unwrap();

        assert!(slots.is_full());
        assert_eq!(
            slots.put([0, 1].into_iter(), 3, ()),
            Err(Error::Full { capacity: 2 })
        );
        assert_eq!(slots.len(), 2);
    }
}
