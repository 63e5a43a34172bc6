//! Tencent Cloud `DNSPod` API type definition

use serde::{Deserialize, Serialize};

// ============ Tencent Cloud API response structure ============

/// Generic Tencent Cloud response envelope.
#[derive(Debug, Deserialize)]
pub struct TencentResponse {
    #[serde(rename = "Response")]
    pub response: serde_json::Value,
}

/// Error payload nested inside Tencent Cloud responses.
#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ Adapter state ============

/// Field set held by the `DNSPod` adapters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnspodRecord {
    /// Decimal record id, empty before create / read.
    pub id: String,
    pub sub_domain: String,
    pub record_type: String,
    pub value: String,
    pub ttl: u32,
    pub mx: u16,
    pub line: Option<String>,
    pub status: Option<String>,
    pub remark: Option<String>,
}

// ============ Request structure ============

/// `CreateRecord`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRecordRequest<'a> {
    pub domain: &'a str,
    pub sub_domain: &'a str,
    pub record_type: &'a str,
    pub record_line: &'a str,
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none")]
    pub mx: Option<u16>,
    pub status: &'a str,
}

/// `ModifyRecord`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyRecordRequest<'a> {
    pub domain: &'a str,
    pub record_id: u64,
    pub sub_domain: &'a str,
    pub record_type: &'a str,
    pub record_line: &'a str,
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none")]
    pub mx: Option<u16>,
    pub status: &'a str,
}

/// `ModifyRecordRemark`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyRecordRemarkRequest<'a> {
    pub domain: &'a str,
    pub record_id: u64,
    pub remark: &'a str,
}

/// `DescribeRecord` / `DeleteRecord`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordIdRequest<'a> {
    pub domain: &'a str,
    pub record_id: u64,
}

/// `DescribeRecordList`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeRecordListRequest<'a> {
    pub domain: &'a str,
    pub limit: u32,
}

// ============ Response structure ============

/// `CreateRecord` response
#[derive(Debug, Deserialize)]
pub struct CreateRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
}

/// Response carrying nothing the adapters need.
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}

/// `DescribeRecord` response
#[derive(Debug, Deserialize)]
pub struct DescribeRecordResponse {
    #[serde(rename = "RecordInfo")]
    pub record_info: RecordInfo,
}

/// Record detail from `DescribeRecord`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordInfo {
    pub id: u64,
    pub sub_domain: String,
    pub record_type: String,
    #[serde(default)]
    pub record_line: Option<String>,
    pub value: String,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    #[serde(rename = "MX", default)]
    pub mx: Option<u16>,
    /// `1` enabled, `0` disabled.
    #[serde(default)]
    pub enabled: Option<u8>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl From<RecordInfo> for DnspodRecord {
    fn from(info: RecordInfo) -> Self {
        Self {
            id: info.id.to_string(),
            sub_domain: info.sub_domain,
            record_type: info.record_type,
            value: info.value,
            ttl: info.ttl,
            mx: info.mx.unwrap_or(0),
            line: info.record_line,
            status: info
                .enabled
                .map(|e| if e == 1 { "ENABLE" } else { "DISABLE" }.to_string()),
            remark: info.remark.filter(|r| !r.is_empty()),
        }
    }
}

/// `DescribeRecordList` response
#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    #[serde(rename = "RecordList", default)]
    pub record_list: Vec<RecordListItem>,
}

/// Record item from `DescribeRecordList`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordListItem {
    pub record_id: u64,
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    pub value: String,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    #[serde(rename = "MX", default)]
    pub mx: Option<u16>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl From<RecordListItem> for DnspodRecord {
    fn from(item: RecordListItem) -> Self {
        Self {
            id: item.record_id.to_string(),
            sub_domain: item.name,
            record_type: item.record_type,
            value: item.value,
            ttl: item.ttl,
            mx: item.mx.unwrap_or(0),
            line: item.line,
            status: item.status,
            remark: item.remark.filter(|r| !r.is_empty()),
        }
    }
}
