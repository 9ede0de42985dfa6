//! Response caching layer
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use crate::config::{ApiHost, CacheConfig};
use crate::error::Result;
use crate::stack::Layer;
use crate::types::{LookupKey, Response};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<LookupKey, Response>,
    access_order: Vec<LookupKey>, // For LRU eviction
}

impl CacheState {
    fn update_access_order(&mut self, key: &LookupKey) {
        self.access_order.retain(|k| k != key);
        self.access_order.push(key.clone());
    }

    fn evict_to(&mut self, max_entries: usize) {
        while self.entries.len() > max_entries && !self.access_order.is_empty() {
            let oldest = self.access_order.remove(0);
            self.entries.remove(&oldest);
            tracing::trace!(key = %oldest, "Evicted cache entry");
        }
    }
}

/// Memoizes responses of the wrapped layer by [`LookupKey`]
///
/// Errors are never cached. The lock is not held while the wrapped layer
/// runs, so two concurrent misses on the same key may both fetch.
pub struct CacheLayer {
    next: Box<dyn Layer>,
    config: CacheConfig,
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheLayer {
    pub fn new(next: Box<dyn Layer>, config: CacheConfig) -> Self {
        Self {
            next,
            config,
            state: Mutex::new(CacheState::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.state().entries.len(),
        }
    }

    pub fn contains(&self, key: &LookupKey) -> bool {
        self.state().entries.contains_key(key)
    }

    /// Remove every cached entry
    pub fn clear(&self) {
        let mut state = self.state();
        state.entries.clear();
        state.access_order.clear();
    }

    fn enabled(&self) -> bool {
        self.config.enabled && self.config.max_entries > 0
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // Poisoning cannot leave a half-written entry.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Layer for CacheLayer {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        if !self.enabled() {
            return self.next.lookup(key);
        }

        {
            let mut state = self.state();
            if let Some(response) = state.entries.get(key).cloned() {
                state.update_access_order(key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(key = %key, "Cache hit");
                return Ok(response);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let response = self.next.lookup(key)?;

        let mut state = self.state();
        state.entries.insert(key.clone(), response.clone());
        state.update_access_order(key);
        state.evict_to(self.config.max_entries);

        Ok(response)
    }

    fn api_host(&self) -> &ApiHost {
        self.next.api_host()
    }

    fn next(&self) -> Option<&dyn Layer> {
        Some(self.next.as_ref())
    }

    fn reset(&self) {
        self.clear();
        self.next.reset();
    }
}
