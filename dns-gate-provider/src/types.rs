use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::mask_key_id;

// ============ Vendor Types ============

/// Identifies which vendor adapter handles a domain.
///
/// Serialized as the lowercase tags `"cloudflare"`, `"aliyun"`, `"dnspod"`
/// and `"huawei"`. All tags parse regardless of enabled features; the factory
/// reports [`ProviderError::UnsupportedVendor`] for adapters compiled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorTag {
    /// Cloudflare DNS.
    Cloudflare,
    /// Alibaba Cloud DNS.
    Aliyun,
    /// Tencent Cloud `DNSPod`.
    Dnspod,
    /// Huawei Cloud DNS.
    Huawei,
}

impl VendorTag {
    /// The lowercase tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::Aliyun => "aliyun",
            Self::Dnspod => "dnspod",
            Self::Huawei => "huawei",
        }
    }
}

impl std::fmt::Display for VendorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorTag {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cloudflare" => Ok(Self::Cloudflare),
            "aliyun" => Ok(Self::Aliyun),
            "dnspod" => Ok(Self::Dnspod),
            "huawei" => Ok(Self::Huawei),
            other => Err(ProviderError::UnsupportedVendor {
                vendor: other.to_string(),
            }),
        }
    }
}

// ============ Credentials ============

/// Per-domain vendor credential.
///
/// Owned by the domain entity; adapters hold a read-only copy for the
/// duration of one logical operation. For Cloudflare `auth_id` is the zone id
/// and `auth_secret` the API token; the other vendors use an access key pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCredential {
    /// Vendor hosting the domain.
    pub vendor: VendorTag,
    /// Zone apex, e.g. `"example.com"`.
    pub domain_name: String,
    /// Key id (or Cloudflare zone id).
    pub auth_id: String,
    /// Key secret (or Cloudflare API token).
    pub auth_secret: String,
}

impl DomainCredential {
    pub fn new(
        vendor: VendorTag,
        domain_name: impl Into<String>,
        auth_id: impl Into<String>,
        auth_secret: impl Into<String>,
    ) -> Self {
        Self {
            vendor,
            domain_name: domain_name.into(),
            auth_id: auth_id.into(),
            auth_secret: auth_secret.into(),
        }
    }

    /// Returns `(auth_id, auth_secret)`, failing fast when either is empty.
    pub fn extract_auth(&self) -> Result<(&str, &str)> {
        if self.auth_id.is_empty() || self.auth_secret.is_empty() {
            return Err(ProviderError::Credential {
                provider: self.vendor.to_string(),
                detail: "api id or secret is empty".to_string(),
            });
        }
        Ok((&self.auth_id, &self.auth_secret))
    }
}

impl std::fmt::Debug for DomainCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainCredential")
            .field("vendor", &self.vendor)
            .field("domain_name", &self.domain_name)
            .field("auth_id", &mask_key_id(&self.auth_id))
            .field("auth_secret", &"<redacted>")
            .finish()
    }
}

// ============ DNS Record ============

/// Keys used in [`DnsRecord::vendor_custom_fields`].
pub mod custom_fields {
    /// Cloudflare: proxy through the CDN (bool). Only A/AAAA/CNAME.
    pub const PROXIED: &str = "proxied";
    /// Cloudflare: structured record data (object) for SRV/CAA-style types.
    pub const DATA: &str = "data";
    /// Aliyun / `DNSPod`: resolution line (string).
    pub const LINE: &str = "line";
    /// Aliyun / `DNSPod`: record status (string).
    pub const STATUS: &str = "status";
}

/// Vendor-agnostic view of one DNS record.
///
/// `id` is opaque: each adapter issues and consumes its own encoding.
/// A zero `ttl` or `priority`, and a blank string field, mean "let the
/// vendor default it" and are never sent as literal zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Opaque vendor identity.
    #[serde(default)]
    pub id: String,
    /// Record type (`A`, `AAAA`, `CNAME`, `TXT`, `MX`, ...).
    pub record_type: String,
    /// Name relative to the zone (`@` for the apex).
    pub name: String,
    /// Record content.
    pub content: String,
    /// TTL in seconds; `0` means vendor default.
    #[serde(default)]
    pub ttl: u32,
    /// Priority, meaningful only for MX; `0` means unset.
    #[serde(default)]
    pub priority: u16,
    /// Free-form comment / remark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Vendor-specific extras, see [`custom_fields`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vendor_custom_fields: BTreeMap<String, serde_json::Value>,
}

impl DnsRecord {
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_custom_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.vendor_custom_fields
            .insert(key.to_string(), value.into());
        self
    }

    /// String custom field; blank strings count as absent.
    pub fn custom_str(&self, key: &str) -> Option<&str> {
        self.vendor_custom_fields
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Boolean custom field.
    pub fn custom_bool(&self, key: &str) -> Option<bool> {
        self.vendor_custom_fields
            .get(key)
            .and_then(serde_json::Value::as_bool)
    }
}
