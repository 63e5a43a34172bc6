//! Huawei Cloud DNS API type definition

use serde::{Deserialize, Serialize};

// ============ Huawei Cloud API response structure ============

/// Response payload for `ListPublicZones`.
#[derive(Debug, Deserialize)]
pub struct ListZonesResponse {
    #[serde(default)]
    pub zones: Vec<HuaweiZone>,
}

/// Public zone item; `name` carries a trailing dot.
#[derive(Debug, Deserialize)]
pub struct HuaweiZone {
    pub id: String,
    pub name: String,
}

/// Response payload for `ListRecordSetsByZone`.
#[derive(Debug, Deserialize)]
pub struct ListRecordSetsResponse {
    #[serde(default)]
    pub recordsets: Vec<RecordSet>,
}

/// One recordset: every value sharing a `(name, type)` pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordSet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub records: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Error payload returned by Huawei Cloud DNS APIs.
///
/// DNS errors use `code`/`message`, the API gateway `error_code`/`error_msg`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "error_code")]
    pub code: Option<String>,
    #[serde(alias = "error_msg")]
    pub message: Option<String>,
}

// ============ Request structure ============

/// Body of `CreateRecordSet` and `UpdateRecordSet`.
#[derive(Debug, Serialize)]
pub struct RecordSetBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub records: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

// ============ Adapter state ============

/// Field set held by the Huawei single-record adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HuaweiRecord {
    /// Compound id, see [`identity`](super::identity).
    pub id: String,
    /// Relative or fully qualified name; formatted on use.
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: u32,
    pub priority: u16,
    pub description: Option<String>,
}
