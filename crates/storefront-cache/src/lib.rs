//! Type-safe Key-Value storage for storefront client state.
//!
//! Stands in for the browser's local storage: small pieces of session
//! state (such as the captured delivery location) are stored as JSON
//! under string keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{FileStore, KvStore};
//!
//! let store = FileStore::open(".storefront/state.json")?;
//! store.set("userLocation", &location)?;
//! let saved: Option<Location> = store.get("userLocation")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, FileStore, KvStore, MemoryStore};
}
