//! Collaborator layers: caching and fetching
//!
//! - [`CacheLayer`] memoizes responses by key
//! - [`RemoteLayer`] fetches over HTTP (innermost)
//! - [`MemoryLayer`] serves a fixed set of payloads (innermost, offline)

pub mod cache;
pub mod memory;
pub mod remote;

pub use cache::CacheLayer;
pub use memory::MemoryLayer;
pub use remote::RemoteLayer;
