//! Layer composition
//!
//! A [`Stack`] is declared once, listing layers outermost to innermost, and
//! built over an innermost fetch layer into a [`Pipeline`].
//!
//! # Examples
//!
//! ```
//! use linkwise_core::{ClientConfig, MemoryLayer, Stack};
//! use linkwise_core::layers::CacheLayer;
//! use linkwise_core::normalizer::NormalizerLayer;
//! use serde_json::json;
//!
//! let stack = Stack::builder()
//!     .layer("cache", |next, config| Ok(Box::new(CacheLayer::new(next, config.cache.clone())) as _))
//!     .layer("normalizer", |next, _| Ok(Box::new(NormalizerLayer::new(next)) as _))
//!     .build();
//!
//! let config = ClientConfig::default().with_api_host("https://api.example.com");
//! let backend = MemoryLayer::new(config.api_host().unwrap())
//!     .with_resource("users/octocat", json!({"username": "octocat"}));
//!
//! let pipeline = stack.build(Box::new(backend), &config).unwrap();
//! let response = pipeline.lookup("users/octocat").unwrap();
//! assert_eq!(response.link("self"), Some("https://api.example.com/users/octocat"));
//! ```
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod layer;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use builder::{Stack, StackBuilder};
pub use layer::{Layer, LayerFactory};
pub use pipeline::Pipeline;
