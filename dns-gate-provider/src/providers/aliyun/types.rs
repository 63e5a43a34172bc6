//! 阿里云 API 类型定义和辅助函数

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

// ============ RFC3986 URL 编码 ============

/// RFC3986 URL 编码
pub fn url_encode(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(char::from(byte));
            }
            _ => {
                let _ = write!(result, "%{byte:02X}");
            }
        }
    }
    result
}

/// 将结构体序列化为排序后的 query string（RPC 参数均为扁平字段）
pub fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| ProviderError::Vendor {
        provider: "aliyun".to_string(),
        raw_code: None,
        raw_message: format!("failed to serialize request: {e}"),
    })?;

    let mut flat_map = BTreeMap::new();
    if let serde_json::Value::Object(map) = value {
        for (k, v) in map {
            let v = match v {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            flat_map.insert(k, v);
        }
    }

    Ok(flat_map
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ 请求参数 ============

#[derive(Debug, Serialize)]
pub struct AddDomainRecordRequest<'a> {
    #[serde(rename = "DomainName")]
    pub domain_name: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    #[serde(rename = "Value")]
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(rename = "Line", skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateDomainRecordRequest<'a> {
    #[serde(rename = "RecordId")]
    pub record_id: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    #[serde(rename = "Value")]
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(rename = "Line")]
    pub line: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateDomainRecordRemarkRequest<'a> {
    #[serde(rename = "RecordId")]
    pub record_id: &'a str,
    #[serde(rename = "Remark")]
    pub remark: &'a str,
}

/// `DescribeDomainRecordInfo` / `DeleteDomainRecord` 共用
#[derive(Debug, Serialize)]
pub struct RecordIdRequest<'a> {
    #[serde(rename = "RecordId")]
    pub record_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DescribeDomainRecordsRequest<'a> {
    #[serde(rename = "DomainName")]
    pub domain_name: &'a str,
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
}

// ============ 响应 ============

/// 阿里云的记录字段集合（`DescribeDomainRecordInfo` 与列表项同构）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliyunRecord {
    #[serde(rename = "RecordId", default)]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    #[serde(rename = "Priority")]
    pub priority: Option<u16>,
    #[serde(rename = "Line")]
    pub line: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Remark")]
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AliyunRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct RecordIdResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

/// 不关心内容的响应
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}
