//! Tests for layer composition

use super::*;
use crate::config::{ApiHost, ClientConfig};
use crate::error::{Error, Result};
use crate::layers::MemoryLayer;
use crate::payload::Payload;
use crate::types::{LookupKey, Response};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Trail = Arc<Mutex<Vec<String>>>;

/// Records request and response passage
struct TraceLayer {
    tag: &'static str,
    trail: Trail,
    next: Box<dyn Layer>,
}

impl Layer for TraceLayer {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        self.trail.lock().unwrap().push(format!("enter:{}", self.tag));
        let response = self.next.lookup(key)?;
        self.trail.lock().unwrap().push(format!("exit:{}", self.tag));
        Ok(response)
    }

    fn api_host(&self) -> &ApiHost {
        self.next.api_host()
    }

    fn next(&self) -> Option<&dyn Layer> {
        Some(self.next.as_ref())
    }
}

/// Answers every key itself
struct ConstantLayer {
    next: Box<dyn Layer>,
}

impl Layer for ConstantLayer {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        Ok(Response::new(key.clone(), Payload::from(json!("short-circuit"))))
    }

    fn api_host(&self) -> &ApiHost {
        self.next.api_host()
    }

    fn next(&self) -> Option<&dyn Layer> {
        Some(self.next.as_ref())
    }
}

fn trace(tag: &'static str, trail: &Trail) -> impl Fn(Box<dyn Layer>, &ClientConfig) -> Result<Box<dyn Layer>> {
    let trail = trail.clone();
    move |next, _config| {
        Ok(Box::new(TraceLayer {
            tag,
            trail: trail.clone(),
            next,
        }) as Box<dyn Layer>)
    }
}

fn backend() -> MemoryLayer {
    MemoryLayer::new(ApiHost::parse("https://api.example.com").unwrap())
        .with_resource("users/octocat", json!({"login": "octocat"}))
}

#[test]
fn test_first_declared_layer_is_outermost() {
    let trail: Trail = Arc::default();
    let stack = Stack::builder()
        .layer("outer", trace("outer", &trail))
        .layer("inner", trace("inner", &trail))
        .build();

    let pipeline = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap();
    pipeline.lookup("users/octocat").unwrap();

    assert_eq!(
        *trail.lock().unwrap(),
        vec!["enter:outer", "enter:inner", "exit:inner", "exit:outer"]
    );
    assert_eq!(pipeline.layer_names(), &["outer", "inner", "memory"]);
}

#[test]
fn test_layer_may_short_circuit() {
    let trail: Trail = Arc::default();
    let stack = Stack::builder()
        .layer("outer", trace("outer", &trail))
        .layer("constant", |next, _| Ok(Box::new(ConstantLayer { next }) as Box<dyn Layer>))
        .layer("inner", trace("inner", &trail))
        .build();

    let pipeline = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap();
    let response = pipeline.lookup("anything/at/all").unwrap();

    assert_eq!(response.payload.as_str(), Some("short-circuit"));
    assert_eq!(*trail.lock().unwrap(), vec!["enter:outer", "exit:outer"]);
}

#[test]
fn test_errors_propagate_unchanged() {
    let trail: Trail = Arc::default();
    let stack = Stack::builder()
        .layer("outer", trace("outer", &trail))
        .layer("inner", trace("inner", &trail))
        .build();

    let pipeline = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap();
    let err = pipeline.lookup("users/ghost").unwrap_err();

    match err {
        Error::NotFound { key } => assert_eq!(key, "users/ghost"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(*trail.lock().unwrap(), vec!["enter:outer", "enter:inner"]);
}

#[test]
fn test_factory_failure_aborts_build() {
    let stack = Stack::builder()
        .layer("broken", |_next, _| Err(Error::configuration("refusing to build")))
        .build();

    let err = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_stack_is_reusable() {
    let stack = Stack::default_stack();
    assert_eq!(stack.names(), vec!["cache", "normalizer"]);

    let first = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap();
    let second = stack.clone().build(Box::new(backend()), &ClientConfig::default()).unwrap();

    assert_eq!(first.layer_names(), second.layer_names());
    assert_eq!(first.layer_names(), &["cache", "normalizer", "memory"]);
}

#[test]
fn test_empty_stack_is_the_innermost_layer() {
    let stack = Stack::builder().build();
    assert!(stack.is_empty());

    let pipeline = stack.build(Box::new(backend()), &ClientConfig::default()).unwrap();
    let response = pipeline.lookup("users/octocat").unwrap();
    assert_eq!(response.payload, Payload::from(json!({"login": "octocat"})));
    assert_eq!(pipeline.api_host().host(), "api.example.com");
}
