use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, VendorTag};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 vendor 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `Conflict`）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `NotFound`）
    pub record_id: Option<String>,
}

impl ErrorContext {
    pub fn for_record(record_id: &str, record_name: &str) -> Self {
        Self {
            record_name: Some(record_name.to_string()),
            record_id: Some(record_id.to_string()),
        }
    }
}

/// 错误映射 Trait（内部使用）
/// 各 adapter 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 vendor 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::Vendor {
            provider: self.provider_name().to_string(),
            raw_code: None,
            raw_message: format!("failed to parse response: {}", detail.to_string()),
        }
    }

    /// 快捷方法：未映射的错误（fallback）
    fn vendor_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Vendor {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    fn not_found(&self, context: ErrorContext, raw: RawApiError) -> ProviderError {
        ProviderError::NotFound {
            provider: self.provider_name().to_string(),
            record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        }
    }

    fn conflict(&self, context: ErrorContext, raw: RawApiError) -> ProviderError {
        ProviderError::Conflict {
            provider: self.provider_name().to_string(),
            record_name: context
                .record_name
                .unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        }
    }

    fn invalid_credentials(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Credential {
            provider: self.provider_name().to_string(),
            detail: raw.message,
        }
    }
}

/// Single-record capability set implemented once per vendor.
///
/// An adapter instance carries one record's state: its opaque `id` plus the
/// desired field values. It is created fresh for every logical operation and
/// may cache lookups made during that operation (Huawei recordsets), so it is
/// not meant to be shared across requests.
///
/// Typical update flow: [`read`](Self::read) the id, take [`record`](Self::record),
/// mutate fields, hand it back with [`set_record`](Self::set_record), then
/// [`update`](Self::update).
#[async_trait]
pub trait RecordAdapter: Send + Sync {
    /// Vendor this adapter talks to.
    fn vendor(&self) -> VendorTag;

    /// Current opaque id; empty before `create` or `read`.
    fn id(&self) -> &str;

    /// Snapshot of the adapter state in the vendor-agnostic shape.
    fn record(&self) -> DnsRecord;

    /// Replaces the adapter state, including the id when non-empty.
    fn set_record(&mut self, record: DnsRecord);

    /// Creates the record and stores the vendor-assigned id.
    async fn create(&mut self) -> Result<()>;

    /// Loads the record identified by `id` into the adapter.
    async fn read(&mut self, id: &str) -> Result<()>;

    /// Pushes the current field values to the record identified by `id()`.
    async fn update(&mut self) -> Result<()>;

    /// Removes the record identified by `id()`.
    async fn delete(&mut self) -> Result<()>;
}

/// Domain-wide listing capability, paired with [`RecordAdapter`].
#[async_trait]
pub trait RecordListAdapter: Send + Sync {
    /// Vendor this adapter talks to.
    fn vendor(&self) -> VendorTag;

    /// Fetches the first page (vendor maximum size) of the credential's domain.
    ///
    /// Never paginates further.
    async fn list(&mut self) -> Result<()>;

    /// Records fetched by the last [`list`](Self::list), in vendor order.
    fn records(&self) -> Vec<DnsRecord>;

    /// Returns one record per requested id, repeats included, or
    /// [`ProviderError::MismatchCount`] when the number of matches differs
    /// from `ids.len()`.
    fn select_by_ids(&self, ids: &[String]) -> Result<Vec<DnsRecord>> {
        select_matching(self.vendor(), self.records(), ids)
    }
}

/// Pairs every record with each requested id it matches, so a repeated id
/// yields one entry per request and a shared id counts as an over-match.
pub(crate) fn select_matching(
    vendor: VendorTag,
    records: Vec<DnsRecord>,
    ids: &[String],
) -> Result<Vec<DnsRecord>> {
    let selected: Vec<DnsRecord> = records
        .iter()
        .flat_map(|record| {
            ids.iter()
                .filter(move |id| **id == record.id)
                .map(move |_| record.clone())
        })
        .collect();

    if selected.len() != ids.len() {
        return Err(ProviderError::MismatchCount {
            provider: vendor.to_string(),
            requested: ids.len(),
            matched: selected.len(),
        });
    }
    Ok(selected)
}
