//! `DNSPod` HTTP 请求方法

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::sign::Tc3Signer;
use super::types::{TencentError, TencentResponse};
use super::{DNSPOD_VERSION, DnspodClient};

impl DnspodClient {
    /// 执行腾讯云 API 请求（JSON body，POST 到根路径）
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let (secret_id, secret_key) = self.credential.extract_auth()?;
        let endpoint = &self.transport.endpoints().dnspod;
        let host = HttpUtils::host_header(endpoint, self.provider_name())?;

        // 1. 序列化请求体
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        log::debug!("Request Body: {payload}");

        // 2. 生成签名
        let timestamp = Utc::now().timestamp();
        let authorization = Tc3Signer {
            secret_id,
            secret_key,
            host: &host,
        }
        .sign(action, &payload, timestamp);

        // 3. 发送请求
        let request = self
            .transport
            .client()
            .post(format!("{endpoint}/"))
            .header("Content-Type", "application/json; charset=utf-8")
            .header("Host", &host)
            .header("X-TC-Action", action)
            .header("X-TC-Version", DNSPOD_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("Authorization", authorization)
            .body(payload);

        let (_status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await?;

        // 4. 解析响应
        let tc_response: TencentResponse =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        // 5. 处理错误
        if let Some(error_value) = tc_response.response.get("Error") {
            let error: TencentError = serde_json::from_value(error_value.clone())
                .map_err(|e| self.parse_error(e))?;
            let err = self.map_error(RawApiError::with_code(&error.code, &error.message), ctx);
            if err.is_expected() {
                log::warn!("API error: {} - {}", error.code, error.message);
            } else {
                log::error!("API error: {} - {}", error.code, error.message);
            }
            return Err(err);
        }

        // 6. 提取数据
        serde_json::from_value(tc_response.response).map_err(|e| self.parse_error(e))
    }
}
