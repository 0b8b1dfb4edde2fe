pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Table is full, no empty slot found in {capacity} probes")]
    Full { capacity: usize },

    #[error("Key not found")]
    NotFound,

    #[error("Key is not numeric: {0}")]
    NonNumericKey(String),

    #[error("Capacity must be at least 1")]
    ZeroCapacity,
}
