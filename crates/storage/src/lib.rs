#![forbid(unsafe_code)]

pub mod json;
pub mod memory;
pub mod repository;

pub use json::JsonStateStore;
pub use memory::InMemoryStateStore;
pub use repository::{StateStore, StorageError, StoredUser};
