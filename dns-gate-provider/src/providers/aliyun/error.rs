//! 阿里云错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunClient;

/// 阿里云错误码映射
/// 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>
impl ProviderErrorMapper for AliyunClient {
    fn provider_name(&self) -> &'static str {
        "aliyun"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature",
            ) => self.invalid_credentials(raw),

            // ============ 记录已存在 ============
            // DomainRecordConflict (e.g. CNAME next to A) is a rejection, not a duplicate.
            Some("DomainRecordDuplicate") => self.conflict(context, raw),

            // ============ 记录不存在 ============
            Some(
                "DomainRecordNotBelongToUser"
                | "InvalidRecordId.NotFound"
                | "InvalidRR.NoExist"
                | "PdnsRecord.NotExists",
            ) => self.not_found(context, raw),

            _ => self.vendor_error(raw),
        }
    }
}
