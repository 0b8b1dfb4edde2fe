use crate::error::Result;

/// The operations every table variant supports.
///
/// Capacity is fixed at construction. Failed operations never modify the
/// table.
pub trait Table<K, V> {
    /// Inserts `value` under `key`, or replaces the value if `key` is already
    /// present.
    ///
    /// Open-addressing tables fail with [`Error::Full`] when `key` is new and
    /// its probe sequence contains no empty slot.
    ///
    /// [`Error::Full`]: crate::Error::Full
    fn put(&mut self, key: K, value: V) -> Result<()>;

    /// Returns the value stored under `key`, or [`Error::NotFound`].
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn get(&self, key: &K) -> Result<&V>;

    fn get_mut(&mut self, key: &K) -> Result<&mut V>;

    /// Removes `key` and returns its value, or fails with [`Error::NotFound`].
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Number of slots, fixed at construction.
    fn capacity(&self) -> usize;

    /// Drops all entries, returning the table to its freshly constructed
    /// state.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    #[allow(clippy::cast_precision_loss)]
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}
