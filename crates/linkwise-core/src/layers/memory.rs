//! In-memory fetch layer

use crate::config::ApiHost;
use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::stack::Layer;
use crate::types::{LookupKey, Response};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Innermost layer serving payloads from a fixed map
///
/// Keys are matched with any leading `/` removed. Unknown keys fail with
/// [`Error::NotFound`], as a remote backend would.
#[derive(Debug)]
pub struct MemoryLayer {
    api_host: ApiHost,
    resources: HashMap<String, Payload>,
    fetches: AtomicUsize,
}

impl MemoryLayer {
    pub fn new(api_host: ApiHost) -> Self {
        Self {
            api_host,
            resources: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Add a resource, builder style
    pub fn with_resource(mut self, key: impl Into<LookupKey>, payload: impl Into<Payload>) -> Self {
        self.insert(key, payload);
        self
    }

    pub fn insert(&mut self, key: impl Into<LookupKey>, payload: impl Into<Payload>) {
        let key = key.into();
        self.resources
            .insert(Self::path(&key).to_string(), payload.into());
    }

    /// Number of lookups that reached this layer
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    fn path(key: &LookupKey) -> &str {
        key.as_str().trim_start_matches('/')
    }
}

impl Layer for MemoryLayer {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        match self.resources.get(Self::path(key)) {
            Some(payload) => Ok(Response::new(key.clone(), payload.clone())),
            None => Err(Error::NotFound {
                key: key.to_string(),
            }),
        }
    }

    fn api_host(&self) -> &ApiHost {
        &self.api_host
    }
}
