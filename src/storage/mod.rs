//! Draft persistence.
//!
//! Drafts live in a small key-value store: one JSON object per key. On disk
//! each key is its own file under the XDG data directory.

mod draft;
mod error;
mod store;

pub use draft::{delete_draft, load_draft, save_draft};
pub use error::StorageError;
pub use store::{FileStore, KeyValueStore, MemoryStore};
