//! Declarative stack builder
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use super::layer::{Layer, LayerFactory};
use super::pipeline::Pipeline;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::layers::CacheLayer;
use crate::normalizer::NormalizerLayer;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct StackEntry {
    name: &'static str,
    factory: LayerFactory,
}

/// Builder for a [`Stack`]; layers are listed outermost first
#[derive(Default)]
pub struct StackBuilder {
    entries: Vec<StackEntry>,
}

impl StackBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer below the ones already declared
    pub fn layer<F>(mut self, name: &'static str, factory: F) -> Self
    where
        F: Fn(Box<dyn Layer>, &ClientConfig) -> Result<Box<dyn Layer>> + Send + Sync + 'static,
    {
        self.entries.push(StackEntry {
            name,
            factory: Arc::new(factory),
        });
        self
    }

    /// Freeze the declared order
    pub fn build(self) -> Stack {
        Stack {
            entries: self.entries.into(),
        }
    }
}

/// An immutable, ordered list of layer factories
///
/// Building a stack over an innermost layer wraps right-to-left, so the
/// first declared layer sees each request first and each response last.
#[derive(Clone)]
pub struct Stack {
    entries: Arc<[StackEntry]>,
}

impl Stack {
    pub fn builder() -> StackBuilder {
        StackBuilder::new()
    }

    /// Cache over normalizer; the caller supplies the fetch layer
    ///
    /// The normalizer sits between the cache and the fetch layer, so cached
    /// entries are always canonical.
    pub fn default_stack() -> Self {
        Self::builder()
            .layer("cache", |next, config| {
                Ok(Box::new(CacheLayer::new(next, config.cache.clone())) as Box<dyn Layer>)
            })
            .layer("normalizer", |next, _config| {
                Ok(Box::new(NormalizerLayer::new(next)) as Box<dyn Layer>)
            })
            .build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared layer names, outermost first
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Instantiate every layer around `innermost`
    pub fn build(&self, innermost: Box<dyn Layer>, config: &ClientConfig) -> Result<Pipeline> {
        let mut layer_names = vec![innermost.name()];
        let mut head = innermost;

        for entry in self.entries.iter().rev() {
            tracing::debug!(layer = entry.name, wraps = head.name(), "Instantiating layer");
            head = (entry.factory)(head, config)?;
            layer_names.push(entry.name);
        }

        layer_names.reverse();
        Ok(Pipeline::new(head, layer_names))
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("layers", &self.names()).finish()
    }
}
