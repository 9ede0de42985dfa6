//! Response normalization
//!
//! Rewrites arbitrarily nested response data into the canonical schema:
//!
//! - fields are renamed by [`keys::canonical_key`]
//! - `blog`, `url` and `*_url` string fields become entries of the reserved
//!   [`LINKS_KEY`] collection
//! - `timestamp` (Unix epoch) becomes an ISO-8601 `date`
//! - `user` is promoted to `owner` or `author`, and `author`/`committer`
//!   fill in for each other
//!
//! Normalization is pure and idempotent: a canonical payload normalizes to
//! itself. Link descriptors already under [`LINKS_KEY`] are copied, never
//! rewritten.
//!
//! # Examples
//!
//! ```
//! use linkwise_core::{normalize, ApiHost, Payload};
//! use serde_json::json;
//!
//! let host = ApiHost::parse("https://api.example.com").unwrap();
//! let raw = Payload::from(json!({"username": "octocat", "blog_url": "http://b", "forks": 4}));
//!
//! let canonical = normalize(raw, &host);
//! assert_eq!(
//!     canonical.into_value(),
//!     json!({"login": "octocat", "_links": {"blog": {"href": "http://b"}}, "fork_count": 4})
//! );
//! ```
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

pub mod keys;
pub mod layer;
pub mod links;
pub mod relations;
pub mod timestamp;


pub use layer::NormalizerLayer;

use crate::config::ApiHost;
use crate::payload::{Payload, PayloadMap, LINKS_KEY};
use serde_json::Value;

/// Field holding a Unix epoch time in raw payloads
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Field holding the converted ISO-8601 time in canonical payloads
pub const DATE_KEY: &str = "date";

/// Recursive rewriter from raw to canonical payloads
#[derive(Debug, Clone)]
pub struct Normalizer {
    api_host: ApiHost,
}

impl Normalizer {
    /// Create a normalizer classifying `url` fields against `api_host`
    pub fn new(api_host: ApiHost) -> Self {
        Self { api_host }
    }

    pub fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Normalize any payload, dispatching on its shape
    pub fn normalize(&self, payload: Payload) -> Payload {
        match payload {
            Payload::Object(map) => Payload::Object(self.normalize_map(map)),
            Payload::Sequence(items) => {
                Payload::Sequence(items.into_iter().map(|item| self.normalize(item)).collect())
            }
            scalar @ Payload::Scalar(_) => scalar,
        }
    }

    /// Normalize an object-shaped mapping
    ///
    /// The default policy of `map`, if any, is carried over to the result.
    pub fn normalize_map(&self, map: PayloadMap) -> PayloadMap {
        let mut output = match map.default_policy() {
            Some(policy) => PayloadMap::with_default(policy.clone()),
            None => PayloadMap::new(),
        };

        for (key, value) in map {
            let key = keys::canonical_key(&key, &value).into_owned();

            if key == LINKS_KEY {
                merge_links(&mut output, value);
                continue;
            }

            if let Some(href) = value.as_str() {
                if let Some(relation) = links::link_relation(&key, href, &self.api_host) {
                    output.set_link(relation, href);
                    continue;
                }
            }

            if key == TIMESTAMP_KEY {
                if let Some(date) = timestamp::xmlschema(&value) {
                    output.insert(DATE_KEY, Payload::Scalar(Value::String(date)));
                    continue;
                }
            }

            let value = self.normalize(value);
            output.insert(key, value);
        }

        relations::infer_relationships(&mut output);
        output
    }
}

/// Fold an incoming link collection into `output`
///
/// Explicit entries win over links synthesized from earlier fields.
fn merge_links(output: &mut PayloadMap, value: Payload) {
    match value {
        Payload::Object(incoming) => {
            let links = output.links_mut();
            for (relation, link) in incoming {
                links.insert(relation, link);
            }
        }
        other if output.links().is_none() => {
            output.insert(LINKS_KEY, other);
        }
        other => {
            log::debug!("Dropping non-object {} in favor of synthesized links: {}", LINKS_KEY, other);
        }
    }
}

/// Normalize `payload` against `api_host`
pub fn normalize(payload: Payload, api_host: &ApiHost) -> Payload {
    Normalizer::new(api_host.clone()).normalize(payload)
}
