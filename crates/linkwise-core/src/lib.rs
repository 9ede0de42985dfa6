//! Linkwise Core - Layered lookup pipeline for hypermedia JSON APIs
//!
//! Resources are resolved by key through an ordered stack of layers. The
//! default stack caches canonical responses above a normalizer, which
//! rewrites raw API data into one schema (renamed fields, a `_links`
//! collection, inferred owner/author roles) before it is cached.
//!
//! # Main Components
//!
//! - **Payload model**: [`Payload`] is a closed object/sequence/scalar variant
//! - **Stack**: [`Stack`] composes [`Layer`]s into an immutable [`Pipeline`]
//! - **Normalizer**: [`normalize`] and [`normalizer::NormalizerLayer`]
//! - **Layers**: caching, HTTP fetching and in-memory fetching
//! - **Context**: a per-thread current pipeline with scoped overrides
//!
//! # Example
//!
//! ```no_run
//! use linkwise_core::{context, ClientConfig, Result};
//!
//! fn example() -> Result<()> {
//!     let config = ClientConfig::from_env().with_api_host("https://api.github.com");
//!     let response = context::with_pipeline(config, |_| context::lookup("users/octocat"))??;
//!     println!("{}", response.payload);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod layers;
pub mod normalizer;
pub mod payload;
pub mod stack;
pub mod types;

// Re-export main types for convenience
pub use config::{ApiHost, CacheConfig, ClientConfig, DEFAULT_API_HOST};
pub use context::{PipelineGuard, PipelineSource};
pub use error::{Error, Result};
pub use layers::{CacheLayer, MemoryLayer, RemoteLayer};
pub use normalizer::{normalize, Normalizer, NormalizerLayer};
pub use payload::{DefaultFn, DefaultPolicy, Payload, PayloadMap, HREF_KEY, LINKS_KEY};
pub use stack::{Layer, LayerFactory, Pipeline, Stack, StackBuilder};
pub use types::{LookupKey, Response};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
