//! The layer capability
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use crate::config::{ApiHost, ClientConfig};
use crate::error::Result;
use crate::types::{LookupKey, Response};
use std::sync::Arc;

/// A unit in the lookup pipeline
///
/// Given a key, a layer either resolves it itself (the innermost fetch layer,
/// or a cache hit) or delegates to the layer it wraps and may post-process
/// the returned [`Response`]. Errors from the wrapped layer are returned
/// unchanged.
pub trait Layer: Send + Sync {
    /// Short name used in logs and [`crate::Pipeline::layer_names`]
    fn name(&self) -> &'static str;

    /// Resolve `key`
    fn lookup(&self, key: &LookupKey) -> Result<Response>;

    /// The API authority the innermost layer talks to
    fn api_host(&self) -> &ApiHost;

    /// The wrapped layer, `None` for the innermost one
    fn next(&self) -> Option<&dyn Layer> {
        None
    }

    /// Drop memoized state in this layer and every layer below it
    fn reset(&self) {
        if let Some(next) = self.next() {
            next.reset();
        }
    }
}

/// Constructor of a layer around the next (inner) one
pub type LayerFactory =
    Arc<dyn Fn(Box<dyn Layer>, &ClientConfig) -> Result<Box<dyn Layer>> + Send + Sync>;
