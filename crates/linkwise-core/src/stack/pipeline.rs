//! Composed lookup pipeline
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use super::builder::Stack;
use super::layer::Layer;
use crate::config::{ApiHost, ClientConfig};
use crate::error::Result;
use crate::layers::RemoteLayer;
use crate::types::{LookupKey, Response};
use std::fmt;

/// A built stack: one lookup function over a fixed chain of layers
///
/// Immutable after construction. To change the layer order, build a new
/// pipeline from a different [`Stack`].
pub struct Pipeline {
    head: Box<dyn Layer>,
    layer_names: Vec<&'static str>,
}

impl Pipeline {
    pub(crate) fn new(head: Box<dyn Layer>, layer_names: Vec<&'static str>) -> Self {
        Self { head, layer_names }
    }

    /// The default stack over a remote fetch layer
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let remote = RemoteLayer::new(config)?;
        Stack::default_stack().build(Box::new(remote), config)
    }

    /// Resolve `key` through every layer
    pub fn lookup(&self, key: impl Into<LookupKey>) -> Result<Response> {
        let key = key.into();
        let span = tracing::debug_span!("lookup", key = %key);
        let _enter = span.enter();

        let result = self.head.lookup(&key);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Lookup failed");
        }
        result
    }

    /// Drop memoized state in every layer
    pub fn reset(&self) {
        tracing::debug!(layers = ?self.layer_names, "Resetting pipeline");
        self.head.reset();
    }

    pub fn api_host(&self) -> &ApiHost {
        self.head.api_host()
    }

    /// Layer names, outermost first, ending with the innermost layer
    pub fn layer_names(&self) -> &[&'static str] {
        &self.layer_names
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("layers", &self.layer_names)
            .field("api_host", &self.api_host().to_string())
            .finish()
    }
}
