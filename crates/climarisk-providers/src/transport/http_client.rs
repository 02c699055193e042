//! Blocking JSON-over-HTTP client used by providers in live mode.
//!
//! The client makes exactly one attempt per call. Retries and circuit
//! breaking are layered on top by [`crate::resilient::ResilientProvider`].

use std::time::Duration;

use climarisk_core::errors::ProviderError;
use serde_json::Value;

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub bearer_token: Option<String>,
}

/// HTTP transport client. Wraps reqwest when the `live` feature is enabled.
#[derive(Debug)]
pub struct HttpClient {
    provider: String,
    config: HttpClientConfig,
    #[cfg(feature = "live")]
    client: reqwest::blocking::Client,
}

fn permanent(provider: &str, reason: impl Into<String>) -> ProviderError {
    ProviderError::Permanent {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

#[cfg(feature = "live")]
fn transient(provider: &str, reason: impl Into<String>) -> ProviderError {
    ProviderError::Transient {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

impl HttpClient {
    pub fn new(provider: impl Into<String>, mut config: HttpClientConfig) -> Result<Self, ProviderError> {
        let provider = provider.into();
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }

        #[cfg(feature = "live")]
        {
            let client = reqwest::blocking::Client::builder()
                .gzip(true)
                .build()
                .map_err(|e| permanent(&provider, format!("http client init failed: {e}")))?;
            Ok(Self {
                provider,
                config,
                client,
            })
        }

        #[cfg(not(feature = "live"))]
        {
            Ok(Self { provider, config })
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET `{base_url}{path}` with query parameters and decode a JSON body.
    ///
    /// Timeouts, connection failures, 429 and 5xx are transient. Other 4xx
    /// responses and undecodable bodies are permanent.
    #[cfg(feature = "live")]
    pub fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut req = self.client.get(&url).query(query).timeout(timeout);
        if let Some(ref token) = self.config.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|e| {
            if e.is_timeout() || e.is_connect() || e.is_request() {
                transient(&self.provider, e.to_string())
            } else {
                permanent(&self.provider, e.to_string())
            }
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<Value>()
                .map_err(|e| permanent(&self.provider, format!("deserialization failed: {e}")));
        }
        tracing::debug!(provider = %self.provider, url = %url, %status, "non-success response");
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(transient(&self.provider, format!("HTTP {status}")))
        } else {
            let body = resp.text().unwrap_or_default();
            Err(permanent(&self.provider, format!("HTTP {status}: {body}")))
        }
    }

    /// Without the `live` feature there is no transport; every call is permanent.
    #[cfg(not(feature = "live"))]
    pub fn get_json(
        &self,
        path: &str,
        _query: &[(&str, String)],
        _timeout: Duration,
    ) -> Result<Value, ProviderError> {
        Err(permanent(
            &self.provider,
            format!("live feature not enabled, cannot GET {}{path}", self.config.base_url),
        ))
    }
}

/// Extract a numeric field from a JSON object response.
pub fn number_field(provider: &str, body: &Value, field: &str) -> Result<f64, ProviderError> {
    body.get(field)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| permanent(provider, format!("response missing numeric field '{field}'")))
}
