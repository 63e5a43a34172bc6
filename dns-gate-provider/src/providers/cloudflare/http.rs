//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareClient;
use super::types::CloudflareResponse;

impl CloudflareClient {
    /// 执行 zone 范围内的请求，`path` 相对于 `/zones/{zone_id}`
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let (zone_id, api_token) = self.credential.extract_auth()?;
        let url = format!(
            "{}/zones/{zone_id}{path}",
            self.transport.endpoints().cloudflare
        );

        let mut request = self
            .transport
            .client()
            .request(method.clone(), &url)
            .bearer_auth(api_token);
        if let Some(body) = body {
            let payload = HttpUtils::to_json(body, self.provider_name())?;
            log::debug!("Request Body: {payload}");
            request = request
                .header("Content-Type", "application/json")
                .body(payload);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        let Ok(cf_response) = serde_json::from_str::<CloudflareResponse<T>>(&response_text) else {
            if status >= 400 {
                return Err(self.vendor_error(RawApiError::with_code(
                    status.to_string(),
                    format!("HTTP {status}"),
                )));
            }
            return Err(self.parse_error(format!("unexpected body for HTTP {status}")));
        };

        if !cf_response.success || status >= 400 {
            let (code, message) = cf_response
                .errors
                .and_then(|errors| {
                    errors
                        .into_iter()
                        .next()
                        .map(|e| (e.code.to_string(), e.message))
                })
                .unwrap_or_else(|| (status.to_string(), "Unknown error".to_string()));
            let err = self.map_error(RawApiError::with_code(code, message), ctx);
            if err.is_expected() {
                log::warn!("API error: {err}");
            } else {
                log::error!("API error: {err}");
            }
            return Err(err);
        }

        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }
}
