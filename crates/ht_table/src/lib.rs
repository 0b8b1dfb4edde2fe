//! Fixed-capacity hash tables.
//!
//! Three tables implement the same [`Table`] contract and differ only in how
//! they resolve collisions:
//!
//! - [`ChainedTable`]: every slot holds a bucket of entries.
//! - [`LinearTable`]: open addressing, probing one slot at a time.
//! - [`DoubleTable`]: open addressing, probing with a stride derived from the
//!   key.
//!
//! Capacity is fixed at construction. Tables never resize; an
//! open-addressing table rejects new keys with [`Error::Full`] once the
//! key's probe sequence has no empty slot left.
//!
//! Every table renders as a slot-indexed list through [`Display`], e.g. a
//! linear-probing table of capacity 5 holding keys 6, 11 and 8 renders as
//! `[null, 6=A, 11=C, 8=B, null]`.
//!
//! [`Display`]: std::fmt::Display

pub mod any;
pub mod chained;
pub mod double;
pub mod entry;
pub mod error;
pub mod hash;
pub mod key;
pub mod linear;
pub mod render;
pub mod slot;
pub mod table;

pub use any::{AnyTable, Strategy};
pub use chained::ChainedTable;
pub use double::DoubleTable;
pub use entry::Entry;
pub use error::{Error, Result};
pub use hash::{IdentityHasher, IdentityState};
pub use key::{Key, NumericKey};
pub use linear::LinearTable;
pub use render::Render;
pub use slot::Slot;
pub use table::Table;
