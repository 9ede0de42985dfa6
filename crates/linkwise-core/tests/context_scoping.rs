//! Integration tests for per-thread pipeline scoping


use linkwise_core::context;
use linkwise_core::{ClientConfig, Error, MemoryLayer, Pipeline, Stack};
use serde_json::json;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;
use test_support::default_pipeline;

fn pipeline_for(host: &str, login: &str) -> Arc<Pipeline> {
    let config = ClientConfig::default().with_api_host(host);
    let backend = MemoryLayer::new(config.api_host().unwrap())
        .with_resource("user", json!({"username": login}));
    Arc::new(Stack::default_stack().build(Box::new(backend), &config).unwrap())
}

fn current_login() -> String {
    let response = context::lookup("user").unwrap();
    response.payload.get("login").unwrap().as_str().unwrap().to_string()
}

#[test]
fn test_nested_scopes_unwind_in_order() {
    let outer = pipeline_for("https://outer.example.com", "outer");
    let inner = pipeline_for("https://inner.example.com", "inner");

    context::with_pipeline(outer, |_| {
        assert_eq!(current_login(), "outer");

        context::with_pipeline(inner, |_| {
            assert_eq!(current_login(), "inner");
            assert_eq!(context::api_host().unwrap().host(), "inner.example.com");
        })
        .unwrap();

        assert_eq!(current_login(), "outer");
    })
    .unwrap();

    assert!(!context::is_initialized());
}

#[test]
fn test_scope_is_restored_after_panic() {
    let outer = pipeline_for("https://outer.example.com", "outer");
    let _guard = context::enter(outer).unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        context::with_pipeline(pipeline_for("https://inner.example.com", "inner"), |_| {
            assert_eq!(current_login(), "inner");
            panic!("scoped body failed");
        })
    }));

    assert!(result.is_err());
    assert_eq!(current_login(), "outer");
}

#[test]
fn test_scope_is_restored_after_error() {
    let (pipeline, _) = default_pipeline();

    let result = context::with_pipeline(pipeline, |_| context::lookup("users/ghost")).unwrap();

    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert!(!context::is_initialized());
}

#[test]
fn test_threads_hold_independent_pipelines() {
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["alpha", "beta"]
        .into_iter()
        .map(|login| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                let host = format!("https://{login}.example.com");
                context::with_pipeline(pipeline_for(&host, login), |_| {
                    // Both scopes are active at the same time here.
                    barrier.wait();
                    current_login()
                })
                .unwrap()
            })
        })
        .collect();

    let logins: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(logins, vec!["alpha", "beta"]);
}

#[test]
fn test_one_pipeline_shared_across_threads() {
    let (pipeline, backend) = default_pipeline();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            thread::spawn(move || {
                context::with_pipeline(pipeline, |_| context::lookup("users/octocat").is_ok())
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert!(backend.fetch_count() >= 1);
}
