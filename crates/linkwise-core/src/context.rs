//! Per-thread current pipeline
//!
//! Each thread owns one slot holding the active [`Pipeline`]. [`enter`]
//! installs a pipeline and returns a [`PipelineGuard`]; dropping the guard
//! puts the previous pipeline back, including while unwinding from a panic.
//! [`with_pipeline`] wraps the guard around a closure.
//!
//! ```
//! use linkwise_core::{context, ClientConfig, MemoryLayer, Stack};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let config = ClientConfig::default().with_api_host("https://api.example.com");
//! let backend = MemoryLayer::new(config.api_host().unwrap())
//!     .with_resource("users/octocat", json!({"username": "octocat"}));
//! let pipeline = Arc::new(Stack::default_stack().build(Box::new(backend), &config).unwrap());
//!
//! let login = context::with_pipeline(pipeline, |_| {
//!     let response = context::lookup("users/octocat")?;
//!     Ok::<_, linkwise_core::Error>(response.payload.get("login").map(|v| v.into_owned()))
//! })
//! .unwrap()
//! .unwrap();
//! assert_eq!(login.unwrap().as_str(), Some("octocat"));
//! ```
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use crate::config::{ApiHost, ClientConfig};
use crate::error::Result;
use crate::stack::Pipeline;
use crate::types::{LookupKey, Response};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static CURRENT: RefCell<Option<Arc<Pipeline>>> = const { RefCell::new(None) };
}

/// What to install as the current pipeline
#[derive(Debug)]
pub enum PipelineSource {
    /// An already built pipeline, shared as is
    Built(Arc<Pipeline>),
    /// A configuration from which the default pipeline is built
    Config(ClientConfig),
}

impl PipelineSource {
    fn into_pipeline(self) -> Result<Arc<Pipeline>> {
        match self {
            PipelineSource::Built(pipeline) => Ok(pipeline),
            PipelineSource::Config(config) => Pipeline::from_config(&config).map(Arc::new),
        }
    }
}

impl From<Arc<Pipeline>> for PipelineSource {
    fn from(pipeline: Arc<Pipeline>) -> Self {
        PipelineSource::Built(pipeline)
    }
}

impl From<Pipeline> for PipelineSource {
    fn from(pipeline: Pipeline) -> Self {
        PipelineSource::Built(Arc::new(pipeline))
    }
}

impl From<ClientConfig> for PipelineSource {
    fn from(config: ClientConfig) -> Self {
        PipelineSource::Config(config)
    }
}

/// Restores the previously current pipeline when dropped
///
/// Guards must be dropped in reverse order of creation, which scoping
/// guarantees. The guard is tied to the thread that created it.
#[must_use = "the pipeline is uninstalled as soon as the guard is dropped"]
pub struct PipelineGuard {
    previous: Option<Arc<Pipeline>>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for PipelineGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // The slot may already be gone during thread teardown.
        let _ = CURRENT.try_with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Install a pipeline as current until the returned guard is dropped
pub fn enter(source: impl Into<PipelineSource>) -> Result<PipelineGuard> {
    let pipeline = source.into().into_pipeline()?;
    tracing::debug!(layers = ?pipeline.layer_names(), "Entering pipeline scope");

    let previous = CURRENT.with(|slot| slot.borrow_mut().replace(pipeline));
    Ok(PipelineGuard {
        previous,
        _not_send: PhantomData,
    })
}

/// Run `body` with `source` installed as the current pipeline
///
/// The previous pipeline is restored when `body` returns or panics. Fails
/// only when a pipeline cannot be built from a configuration, in which case
/// `body` does not run.
pub fn with_pipeline<R>(
    source: impl Into<PipelineSource>,
    body: impl FnOnce(&Arc<Pipeline>) -> R,
) -> Result<R> {
    let _guard = enter(source)?;
    let pipeline = current()?;
    Ok(body(&pipeline))
}

/// The current pipeline of this thread
///
/// On first access without a scope, the default pipeline is built from
/// [`ClientConfig::from_env`] and kept for the thread.
pub fn current() -> Result<Arc<Pipeline>> {
    if let Some(pipeline) = CURRENT.with(|slot| slot.borrow().clone()) {
        return Ok(pipeline);
    }

    let pipeline = Arc::new(Pipeline::from_config(&ClientConfig::from_env())?);
    tracing::debug!(api_host = %pipeline.api_host(), "Initialized default pipeline");
    CURRENT.with(|slot| *slot.borrow_mut() = Some(pipeline.clone()));
    Ok(pipeline)
}

/// Drop memoized state in the current pipeline
///
/// Does nothing when no pipeline has been initialized on this thread.
pub fn reset_pipeline() {
    if let Some(pipeline) = CURRENT.with(|slot| slot.borrow().clone()) {
        pipeline.reset();
    }
}

/// Resolve `key` through the current pipeline
pub fn lookup(key: impl Into<LookupKey>) -> Result<Response> {
    current()?.lookup(key)
}

/// API host of the current pipeline
pub fn api_host() -> Result<ApiHost> {
    Ok(current()?.api_host().clone())
}

/// Whether this thread has a current pipeline, without initializing one
pub fn is_initialized() -> bool {
    CURRENT.with(|slot| slot.borrow().is_some())
}
