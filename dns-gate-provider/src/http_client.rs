//! Injected HTTP transport and shared request helpers
//!
//! Each adapter receives a [`Transport`] at construction time instead of
//! reaching for a process-wide client. Signing stays inside each adapter;
//! this module only covers sending, logging and reading responses.
//!
//! No request is ever retried here. Dropping the future returned by an
//! adapter operation aborts the in-flight request.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::{TransportConfig, VendorEndpoints};
use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Shared HTTP client plus vendor endpoints.
///
/// Cheap to clone: the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    endpoints: VendorEndpoints,
}

impl Transport {
    /// Builds a client with the configured connect and request timeouts.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Vendor {
                provider: "transport".to_string(),
                raw_code: None,
                raw_message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, config.endpoints.clone()))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client, endpoints: VendorEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoints(&self) -> &VendorEndpoints {
        &self.endpoints
    }
}

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Sends the request and returns `(status_code, response_text)`.
    ///
    /// Transport failures, HTTP 429 and gateway errors (502-504) become
    /// [`ProviderError::Vendor`]; any other status is returned for the adapter
    /// to interpret.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            let raw_message = if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                format!("network error: {e}")
            };
            ProviderError::Vendor {
                provider: provider_name.to_string(),
                raw_code: None,
                raw_message,
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        if status_code == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::Vendor {
                provider: provider_name.to_string(),
                raw_code: Some("429".to_string()),
                raw_message: match retry_after {
                    Some(secs) => format!("rate limited, retry after {secs}s"),
                    None => "rate limited".to_string(),
                },
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status_code})");
            return Err(ProviderError::Vendor {
                provider: provider_name.to_string(),
                raw_code: Some(status_code.to_string()),
                raw_message: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response.text().await.map_err(|e| ProviderError::Vendor {
            provider: provider_name.to_string(),
            raw_code: None,
            raw_message: format!("failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::Vendor {
                provider: provider_name.to_string(),
                raw_code: None,
                raw_message: format!("failed to parse response: {e}"),
            }
        })
    }

    /// Serializes a request body, mapping failures to a vendor error.
    pub fn to_json<B: serde::Serialize>(body: &B, provider_name: &str) -> Result<String> {
        serde_json::to_string(body).map_err(|e| ProviderError::Vendor {
            provider: provider_name.to_string(),
            raw_code: None,
            raw_message: format!("failed to serialize request: {e}"),
        })
    }

    /// `host[:port]` of a base URL, as it must appear in signed `Host` headers.
    pub fn host_header(base_url: &str, provider_name: &str) -> Result<String> {
        let invalid = || ProviderError::Vendor {
            provider: provider_name.to_string(),
            raw_code: None,
            raw_message: format!("invalid endpoint: {base_url}"),
        };
        let url = Url::parse(base_url).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        Ok(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }
}
