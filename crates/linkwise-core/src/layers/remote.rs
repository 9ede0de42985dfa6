//! HTTP fetch layer
//!
//! The innermost layer of the default stack. Performs `GET` requests
//! against the configured API host and hands back raw JSON payloads.

use crate::config::{ApiHost, ClientConfig};
use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::stack::Layer;
use crate::types::{LookupKey, Response};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;

/// Fetches resources from the API over HTTP
#[derive(Debug)]
pub struct RemoteLayer {
    client: Client,
    api_host: ApiHost,
    authorization: Option<HeaderValue>,
}

impl RemoteLayer {
    /// Create a remote layer from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_host = config.api_host()?;
        let authorization = config.token.as_deref().map(authorization_header).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e.into()),
            })?;

        Ok(Self {
            client,
            api_host,
            authorization,
        })
    }

    fn authorization(&self) -> Option<&HeaderValue> {
        self.authorization.as_ref()
    }
}

/// `Authorization: token <token>`, marked sensitive
fn authorization_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("token {}", token)).map_err(|e| Error::Configuration {
        message: "Token is not a valid header value".to_string(),
        source: Some(e.into()),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

impl Layer for RemoteLayer {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn lookup(&self, key: &LookupKey) -> Result<Response> {
        let url = self.api_host.full_url(key)?;
        tracing::debug!(url = %url, "GET");

        let mut request = self.client.get(url.clone());
        if let Some(auth) = self.authorization() {
            request = request.header(AUTHORIZATION, auth.clone());
        }

        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Response received");

        if !status.is_success() {
            return Err(status_error(key, status, body));
        }

        let payload = if body.trim().is_empty() {
            Payload::null()
        } else {
            serde_json::from_str::<Payload>(&body)?
        };

        Ok(Response::new(key.clone(), payload))
    }

    fn api_host(&self) -> &ApiHost {
        &self.api_host
    }
}

/// Classify a non-success status
fn status_error(key: &LookupKey, status: StatusCode, body: String) -> Error {
    if status == StatusCode::NOT_FOUND {
        return Error::NotFound {
            key: key.to_string(),
        };
    }

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());

    Error::Http {
        message: format!("{} returned {}: {}", key, status.as_u16(), message),
        status_code: Some(status.as_u16()),
        source: if body.is_empty() {
            None
        } else {
            Some(anyhow::anyhow!(body))
        },
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    let message = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };

    Error::Transport {
        message,
        source: Some(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let err = status_error(&LookupKey::from("users/ghost"), StatusCode::NOT_FOUND, String::new());
        assert!(matches!(err, Error::NotFound { ref key } if key == "users/ghost"));
    }

    #[test]
    fn test_error_status_uses_api_message() {
        let err = status_error(
            &LookupKey::from("user"),
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Bad credentials"}"#.to_string(),
        );
        match err {
            Error::Http {
                message,
                status_code,
                source,
            } => {
                assert_eq!(status_code, Some(401));
                assert!(message.contains("Bad credentials"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_status_without_body() {
        let err = status_error(&LookupKey::from("x"), StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_new_rejects_bad_host() {
        let config = ClientConfig::default().with_api_host("::not a host::");
        assert!(RemoteLayer::new(&config).is_err());
    }

    #[test]
    fn test_authorization_header() {
        let layer = RemoteLayer::new(&ClientConfig::default().with_token("abc123")).unwrap();
        let header = layer.authorization().unwrap();
        assert_eq!(header.to_str().unwrap(), "token abc123");
        assert!(header.is_sensitive());

        let anonymous = RemoteLayer::new(&ClientConfig::default()).unwrap();
        assert!(anonymous.authorization().is_none());
    }

    #[test]
    fn test_new_rejects_token_unfit_for_header() {
        let err = RemoteLayer::new(&ClientConfig::default().with_token("abc\n123")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(!err.to_string().contains("abc"));
    }
}
