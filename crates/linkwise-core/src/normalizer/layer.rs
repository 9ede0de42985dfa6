//! The normalizing layer

use super::Normalizer;
use crate::config::ApiHost;
use crate::error::Result;
use crate::stack::Layer;
use crate::types::{LookupKey, Response};

/// Normalizes every response of the wrapped layer
///
/// Object-shaped results additionally get a `self` link pointing at the
/// absolute address of the requested key, unless one is already present.
pub struct NormalizerLayer {
    next: Box<dyn Layer>,
    normalizer: Normalizer,
}

impl NormalizerLayer {
    pub fn new(next: Box<dyn Layer>) -> Self {
        let normalizer = Normalizer::new(next.api_host().clone());
        Self { next, normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

impl Layer for NormalizerLayer {
    fn name(&self) -> &'static str {
        "normalizer"
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        let mut response = self.next.lookup(key)?;
        response.payload = self.normalizer.normalize(response.payload);

        if let Some(data) = response.data_mut() {
            let has_self = data.links().is_some_and(|links| links.has_value("self"));
            if !has_self {
                match self.normalizer.api_host().full_url(key) {
                    Ok(url) => data.set_link("self", url.as_str()),
                    Err(e) => tracing::warn!(key = %key, error = %e, "Cannot build self link"),
                }
            }
        }

        Ok(response)
    }

    fn api_host(&self) -> &ApiHost {
        self.next.api_host()
    }

    fn next(&self) -> Option<&dyn Layer> {
        Some(self.next.as_ref())
    }
}
