//! Lookup keys and responses
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use crate::payload::{Payload, PayloadMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path-like identifier of a resource
///
/// Either a path relative to the API host (`users/octocat`, `/repos/a/b`)
/// or an absolute URL. Keys compare by their exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key already carries a scheme
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LookupKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for LookupKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for LookupKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

impl AsRef<str> for LookupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A payload paired with the key it was looked up under
///
/// Below the normalizer the payload is raw; above it the payload is
/// canonical and its link collection lives under [`crate::LINKS_KEY`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub key: LookupKey,
    pub payload: Payload,
}

impl Response {
    pub fn new(key: impl Into<LookupKey>, payload: impl Into<Payload>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }

    /// Object-shaped responses support the link contract
    pub fn is_object(&self) -> bool {
        self.payload.is_object()
    }

    pub fn data(&self) -> Option<&PayloadMap> {
        self.payload.as_object()
    }

    pub fn data_mut(&mut self) -> Option<&mut PayloadMap> {
        self.payload.as_object_mut()
    }

    /// The link collection; `None` for non-object payloads or before normalization
    pub fn links(&self) -> Option<&PayloadMap> {
        self.data().and_then(PayloadMap::links)
    }

    /// Address of the link named `relation`
    pub fn link(&self, relation: &str) -> Option<&str> {
        self.data().and_then(|data| data.link_href(relation))
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_key_absolute() {
        assert!(LookupKey::from("https://api.github.com/users/x").is_absolute());
        assert!(!LookupKey::from("users/x").is_absolute());
        assert!(!LookupKey::from("/users/x").is_absolute());
    }

    #[test]
    fn test_lookup_key_serializes_as_string() {
        let key = LookupKey::from("users/octocat");
        assert_eq!(serde_json::to_value(&key).unwrap(), json!("users/octocat"));
    }

    #[test]
    fn test_response_links() {
        let response = Response::new(
            "users/octocat",
            Payload::from(json!({"_links": {"self": {"href": "https://x/users/octocat"}}})),
        );
        assert!(response.is_object());
        assert_eq!(response.link("self"), Some("https://x/users/octocat"));
        assert!(response.link("html").is_none());

        let scalar = Response::new("meta/version", Payload::from(json!(3)));
        assert!(!scalar.is_object());
        assert!(scalar.links().is_none());
    }
}
