//! Key-value storage - JSON file on disk and in-memory fallback.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;
