//! `DNSPod` 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DnspodClient;

/// `DescribeRecordList` 在域名下没有记录时返回的错误码
pub(crate) const NO_DATA_OF_RECORD: &str = "ResourceNotFound.NoDataOfRecord";

/// `DNSPod` 错误码映射
/// 参考: <https://cloud.tencent.com/document/api/1427/56192>
impl ProviderErrorMapper for DnspodClient {
    fn provider_name(&self) -> &'static str {
        "dnspod"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(code)
                if code.starts_with("AuthFailure")
                    || matches!(
                        code,
                        "InvalidParameter.InvalidSecretId" | "InvalidParameter.InvalidSignature"
                    ) =>
            {
                self.invalid_credentials(raw)
            }

            // ============ 记录已存在 ============
            Some("InvalidParameter.DomainRecordExist") => self.conflict(context, raw),

            // ============ 记录不存在 ============
            Some("InvalidParameter.RecordIdInvalid" | NO_DATA_OF_RECORD) => {
                self.not_found(context, raw)
            }

            _ => self.vendor_error(raw),
        }
    }
}
