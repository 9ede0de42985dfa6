//! Client configuration and API host handling

use crate::error::{Error, Result};
use crate::types::LookupKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Default API authority used when none is configured
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Configuration for the default pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute authority (scheme + host) of the API
    pub api_host: String,

    /// Token sent as `Authorization: token <token>`
    pub token: Option<String>,

    /// User-Agent header value
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Response cache settings
    pub cache: CacheConfig,
}

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether to enable cache
    pub enabled: bool,
    /// Maximum cache size (number of entries)
    pub max_entries: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            token: None,
            user_agent: format!("linkwise/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1000,
        }
    }
}

impl ClientConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_with_env();
        config
    }

    /// Apply `LINKWISE_API_HOST`, `LINKWISE_TOKEN` and `LINKWISE_TIMEOUT`
    pub fn merge_with_env(&mut self) {
        if let Ok(host) = std::env::var("LINKWISE_API_HOST") {
            self.api_host = host;
        }

        if let Ok(token) = std::env::var("LINKWISE_TOKEN") {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }

        if let Ok(timeout) = std::env::var("LINKWISE_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!("Invalid LINKWISE_TIMEOUT: {}, keeping {}", timeout, self.timeout_secs),
            }
        }
    }

    /// Set the API host
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Disable response caching
    pub fn without_cache(mut self) -> Self {
        self.cache.enabled = false;
        self
    }

    /// Parse the configured API host
    pub fn api_host(&self) -> Result<ApiHost> {
        ApiHost::parse(&self.api_host)
    }
}

/// The configured API authority
///
/// Decides whether an address belongs to the API (a `self` link) or points
/// elsewhere (an `html` link), and turns lookup keys into absolute addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHost {
    base: Url,
}

impl ApiHost {
    pub fn parse(host: &str) -> Result<Self> {
        let mut base = Url::parse(host).map_err(|source| Error::MalformedAddress {
            address: host.to_string(),
            source,
        })?;

        if base.host_str().is_none() {
            return Err(Error::configuration(format!(
                "API host '{}' has no host component",
                host
            )));
        }

        // Keys join below the base path, so it must end in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    /// Absolute address of `key`
    pub fn full_url(&self, key: &LookupKey) -> Result<Url> {
        let result = if key.is_absolute() {
            Url::parse(key.as_str())
        } else {
            // Joined as a path segment, so `search:x` cannot read as a scheme.
            self.base
                .join(&format!("./{}", key.as_str().trim_start_matches('/')))
        };

        result.map_err(|source| Error::MalformedAddress {
            address: key.to_string(),
            source,
        })
    }

    /// Whether `address` is served by this host
    ///
    /// Fails with [`Error::MalformedAddress`] when `address` is not an
    /// absolute URL.
    pub fn owns(&self, address: &str) -> Result<bool> {
        let url = Url::parse(address).map_err(|source| Error::MalformedAddress {
            address: address.to_string(),
            source,
        })?;
        Ok(url.host_str().is_some() && url.host_str() == self.base.host_str())
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)
    }
}
