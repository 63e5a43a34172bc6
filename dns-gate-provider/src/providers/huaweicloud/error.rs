//! 华为云错误映射
//!
//! 参考: <https://support.huaweicloud.com/api-dns/ErrorCode.html>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::HuaweiClient;

impl ProviderErrorMapper for HuaweiClient {
    fn provider_name(&self) -> &'static str {
        "huawei"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "APIGW.0301" // IAM 认证信息错误
                | "APIGW.0101" // API 不存在/未发布（认证路径错误）
                | "APIGW.0303" // APP 认证信息错误
                | "APIGW.0305" // 通用认证错误
                | "DNS.0005"   // 权限认证失败
                | "DNS.0013",  // 无权限操作 API
            ) => self.invalid_credentials(raw),

            // ============ 记录已存在 ============
            Some(
                "DNS.0312"     // 记录集名称已存在
                | "DNS.0335"   // 存在重复记录集
                | "DNS.0016",  // 记录已存在或冲突
            ) => self.conflict(context, raw),

            // ============ 记录集不存在 ============
            Some("DNS.0313" | "DNS.0004" | "404") => self.not_found(context, raw),

            _ => self.vendor_error(raw),
        }
    }
}
