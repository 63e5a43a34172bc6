//! Alibaba Cloud HTTP request method

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::sign::AcsSigner;
use super::types::serialize_to_query_string;
use super::{ALIYUN_DNS_VERSION, AliyunClient, EMPTY_BODY_SHA256};

impl AliyunClient {
    /// Execute Alibaba Cloud API request (RPC style: parameters are passed through query string)
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let (access_key_id, access_key_secret) = self.credential.extract_auth()?;
        let endpoint = &self.transport.endpoints().aliyun;
        let host = HttpUtils::host_header(endpoint, self.provider_name())?;

        // 1. The serialization parameter is query string
        let query_string = serialize_to_query_string(params)?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        // 2. Generate signature (using query string)
        let authorization = AcsSigner {
            access_key_id,
            access_key_secret,
            host: &host,
        }
        .sign(action, &query_string, &timestamp, &nonce);

        // 3. Construct URL (parameters are in query string)
        let url = if query_string.is_empty() {
            format!("{endpoint}/")
        } else {
            format!("{endpoint}/?{query_string}")
        };

        // 4. Send request (body is empty)
        let request = self
            .transport
            .client()
            .post(&url)
            .header("Host", &host)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIYUN_DNS_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await?;

        // 5. Parse to Value (business errors may arrive with 2xx or 4xx)
        let value: serde_json::Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(_) if status >= 400 => {
                return Err(self.vendor_error(RawApiError::with_code(
                    status.to_string(),
                    format!("HTTP {status}"),
                )));
            }
            Err(e) => return Err(self.parse_error(e)),
        };

        // 6. Check for errors
        if let (Some(code), Some(message)) = (
            value.get("Code").and_then(|v| v.as_str()),
            value.get("Message").and_then(|v| v.as_str()),
        ) {
            let err = self.map_error(RawApiError::with_code(code, message), ctx);
            if err.is_expected() {
                log::warn!("API error: {code} - {message}");
            } else {
                log::error!("API error: {code} - {message}");
            }
            return Err(err);
        }

        // 7. Convert to target type (Value -> T, no need to re-tokenize)
        serde_json::from_value(value).map_err(|e| self.parse_error(e))
    }
}
