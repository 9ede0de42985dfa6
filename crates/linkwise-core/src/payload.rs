//! Payload data model
//!
//! Response data is a closed tagged variant: an object-shaped mapping, an
//! ordered sequence, or a scalar leaf. Every transformation in the crate
//! dispatches over these three shapes with an exhaustive `match`.
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Reserved field carrying the link collection of an object-shaped payload
pub const LINKS_KEY: &str = "_links";

/// Field of a link descriptor holding the target address
pub const HREF_KEY: &str = "href";

/// Untyped nested response data
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A mapping of string keys to payloads
    Object(PayloadMap),
    /// An ordered sequence of payloads
    Sequence(Vec<Payload>),
    /// A non-container leaf (null, bool, number, string)
    Scalar(Value),
}

impl Payload {
    /// The null scalar
    pub fn null() -> Self {
        Payload::Scalar(Value::Null)
    }

    /// Build a link descriptor `{"href": href}`
    pub fn link(href: impl Into<String>) -> Self {
        let mut map = PayloadMap::new();
        map.insert(HREF_KEY, Payload::Scalar(Value::String(href.into())));
        Payload::Object(map)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Payload::Object(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Payload::Sequence(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Scalar(Value::Null))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Payload::Scalar(Value::Number(_)))
    }

    pub fn as_object(&self) -> Option<&PayloadMap> {
        match self {
            Payload::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut PayloadMap> {
        match self {
            Payload::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Payload]> {
        match self {
            Payload::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::Scalar(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Look up a field of an object-shaped payload, honoring its default policy
    pub fn get(&self, key: &str) -> Option<Cow<'_, Payload>> {
        self.as_object().and_then(|map| map.fetch(key))
    }

    /// Convert into plain JSON. Default policies have no JSON form and are dropped.
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
            Payload::Sequence(items) => Value::Array(items.iter().map(Payload::to_value).collect()),
            Payload::Scalar(value) => value.clone(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Payload::Object(map) => Value::Object(
                map.entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into_value()))
                    .collect(),
            ),
            Payload::Sequence(items) => {
                Value::Array(items.into_iter().map(Payload::into_value).collect())
            }
            Payload::Scalar(value) => value,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Payload::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Payload::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Payload::Sequence(items.into_iter().map(Payload::from).collect()),
            scalar => Payload::Scalar(scalar),
        }
    }
}

impl From<PayloadMap> for Payload {
    fn from(map: PayloadMap) -> Self {
        Payload::Object(map)
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(items: Vec<Payload>) -> Self {
        Payload::Sequence(items)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Payload::from)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Closure producing a fallback for keys absent from a mapping
#[derive(Clone)]
pub struct DefaultFn(Arc<dyn Fn(&str) -> Option<Payload> + Send + Sync>);

impl DefaultFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<Payload> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, key: &str) -> Option<Payload> {
        (self.0)(key)
    }
}

impl PartialEq for DefaultFn {
    fn eq(&self, other: &Self) -> bool {
        // Closures compare by identity.
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFn(..)")
    }
}

/// Fallback used for keys absent from a [`PayloadMap`]
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultPolicy {
    /// Every absent key resolves to the same value
    Fixed(Box<Payload>),
    /// Absent keys are resolved by a closure
    Computed(DefaultFn),
}

impl DefaultPolicy {
    pub fn fixed(value: impl Into<Payload>) -> Self {
        DefaultPolicy::Fixed(Box::new(value.into()))
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<Payload> + Send + Sync + 'static,
    {
        DefaultPolicy::Computed(DefaultFn::new(f))
    }

    pub fn resolve(&self, key: &str) -> Option<Payload> {
        match self {
            DefaultPolicy::Fixed(value) => Some((**value).clone()),
            DefaultPolicy::Computed(f) => f.call(key),
        }
    }
}

/// Insertion-ordered mapping with an optional default-value policy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadMap {
    entries: IndexMap<String, Payload>,
    default: Option<DefaultPolicy>,
}

impl PayloadMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map carrying `policy` for absent keys
    pub fn with_default(policy: DefaultPolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            default: Some(policy),
        }
    }

    pub fn default_policy(&self) -> Option<&DefaultPolicy> {
        self.default.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored value only; the default policy is not consulted
    pub fn get(&self, key: &str) -> Option<&Payload> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Payload> {
        self.entries.get_mut(key)
    }

    /// Stored value, falling back to the default policy
    pub fn fetch(&self, key: &str) -> Option<Cow<'_, Payload>> {
        match self.entries.get(key) {
            Some(value) => Some(Cow::Borrowed(value)),
            None => self
                .default
                .as_ref()
                .and_then(|policy| policy.resolve(key))
                .map(Cow::Owned),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when `key` is stored with a non-null value
    pub fn has_value(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|value| !value.is_null())
    }

    /// Insert or replace; a new key is appended at the end
    pub fn insert(&mut self, key: impl Into<String>, value: Payload) -> Option<Payload> {
        self.entries.insert(key.into(), value)
    }

    /// Remove a key, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Payload> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Payload> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The link collection, if present and object-shaped
    pub fn links(&self) -> Option<&PayloadMap> {
        self.entries.get(LINKS_KEY).and_then(Payload::as_object)
    }

    /// The link collection, created (or replaced, if not object-shaped) on demand
    pub fn links_mut(&mut self) -> &mut PayloadMap {
        let slot = self
            .entries
            .entry(LINKS_KEY.to_string())
            .or_insert_with(|| Payload::Object(PayloadMap::new()));
        if !slot.is_object() {
            *slot = Payload::Object(PayloadMap::new());
        }
        match slot {
            Payload::Object(map) => map,
            _ => unreachable!("link collection was just made object-shaped"),
        }
    }

    /// Address of the link named `relation`
    pub fn link_href(&self, relation: &str) -> Option<&str> {
        self.links()
            .and_then(|links| links.get(relation))
            .and_then(|link| link.as_object())
            .and_then(|link| link.get(HREF_KEY))
            .and_then(Payload::as_str)
    }

    /// Set (or replace) the link named `relation`
    pub fn set_link(&mut self, relation: impl Into<String>, href: impl Into<String>) {
        self.links_mut().insert(relation, Payload::link(href));
    }
}

impl FromIterator<(String, Payload)> for PayloadMap {
    fn from_iter<I: IntoIterator<Item = (String, Payload)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            default: None,
        }
    }
}

impl IntoIterator for PayloadMap {
    type Item = (String, Payload);
    type IntoIter = indexmap::map::IntoIter<String, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PayloadMap {
    type Item = (&'a String, &'a Payload);
    type IntoIter = indexmap::map::Iter<'a, String, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
