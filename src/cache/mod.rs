// Cache module for expiring local storage of API responses.
// A namespaced store sits on top of a pluggable key/value backend.

pub mod backend;
pub mod paths;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use paths::cache_dir;
pub use store::{CACHE_PREFIX, CacheStore, CachedData, DEFAULT_TTL};
