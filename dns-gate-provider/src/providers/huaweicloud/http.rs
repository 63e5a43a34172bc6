//! 华为云 HTTP 请求方法

use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::HuaweiClient;
use super::sign::SdkSigner;
use super::types::ErrorResponse;

impl HuaweiClient {
    // ==================== 辅助方法 ====================

    /// 统一处理华为云响应错误
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        // 尝试解析结构化错误，缺少错误码时以 HTTP 状态码代替
        let raw = match serde_json::from_str::<ErrorResponse>(response_text) {
            Ok(ErrorResponse {
                code: Some(code),
                message,
            }) => RawApiError::with_code(code, message.unwrap_or_default()),
            _ => RawApiError::with_code(
                status.to_string(),
                format!("HTTP {status}: {}", truncate_for_log(response_text)),
            ),
        };

        let code = raw.code.clone().unwrap_or_default();
        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("API error: {code} - {err}");
        } else {
            log::error!("API error: {code} - {err}");
        }
        Err(err)
    }

    /// 签名并发送请求，返回响应文本
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &str,
        payload: Option<String>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let (access_key, secret_key) = self.credential.extract_auth()?;
        let endpoint = &self.transport.endpoints().huawei;
        let host = HttpUtils::host_header(endpoint, self.provider_name())?;
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

        let mut headers = vec![("Host", host.as_str()), ("X-Sdk-Date", timestamp.as_str())];
        if payload.is_some() {
            headers.push(("Content-Type", "application/json"));
        }

        let body = payload.unwrap_or_default();
        if !body.is_empty() {
            log::debug!("Request Body: {}", truncate_for_log(&body));
        }

        let authorization = SdkSigner {
            access_key,
            secret_key,
        }
        .sign(method.as_str(), path, query, &headers, &body, &timestamp);

        let url = if query.is_empty() {
            format!("{endpoint}{path}")
        } else {
            format!("{endpoint}{path}?{query}")
        };

        let mut request = self
            .transport
            .client()
            .request(method.clone(), &url)
            .header("Authorization", authorization);
        for (name, value) in &headers {
            request = request.header(*name, *value);
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        Ok(response_text)
    }

    // ==================== 公开 API 方法 ====================

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self.send(Method::GET, path, query, None, ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        let text = self
            .send(Method::POST, path, "", Some(payload), ctx)
            .await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 PUT 请求
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        let text = self.send(Method::PUT, path, "", Some(payload), ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 DELETE 请求（忽略响应体）
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.send(Method::DELETE, path, "", None, ctx).await?;
        Ok(())
    }
}
