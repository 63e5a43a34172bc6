//! Transport configuration.

use serde::{Deserialize, Serialize};

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Timeouts and endpoints used to build a [`Transport`](crate::Transport).
///
/// Every field has a default, so an empty TOML table or JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Bound on TCP connect plus TLS handshake.
    pub connect_timeout_secs: u64,
    /// Bound on the whole request, including reading the body.
    pub request_timeout_secs: u64,
    /// Vendor API base URLs.
    pub endpoints: VendorEndpoints,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            endpoints: VendorEndpoints::default(),
        }
    }
}

impl TransportConfig {
    /// Routes every vendor to the same base URL (a local mock server in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoints = VendorEndpoints {
            cloudflare: base_url.to_string(),
            aliyun: base_url.to_string(),
            dnspod: base_url.to_string(),
            huawei: base_url.to_string(),
        };
        self
    }
}

/// Base URLs of the four vendor APIs, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorEndpoints {
    pub cloudflare: String,
    pub aliyun: String,
    pub dnspod: String,
    pub huawei: String,
}

impl Default for VendorEndpoints {
    fn default() -> Self {
        Self {
            cloudflare: "https://api.cloudflare.com/client/v4".to_string(),
            aliyun: "https://alidns.cn-hangzhou.aliyuncs.com".to_string(),
            dnspod: "https://dnspod.tencentcloudapi.com".to_string(),
            huawei: "https://dns.myhuaweicloud.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: TransportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TransportConfig::default());
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn partial_endpoints_keep_other_defaults() {
        let config: TransportConfig =
            serde_json::from_str(r#"{"endpoints":{"huawei":"https://dns.cn-north-4.myhuaweicloud.com"}}"#)
                .unwrap();
        assert_eq!(
            config.endpoints.huawei,
            "https://dns.cn-north-4.myhuaweicloud.com"
        );
        assert_eq!(
            config.endpoints.cloudflare,
            "https://api.cloudflare.com/client/v4"
        );
    }

    #[test]
    fn with_base_url_overrides_all_vendors() {
        let config = TransportConfig::default().with_base_url("http://127.0.0.1:9000");
        assert_eq!(config.endpoints.aliyun, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.dnspod, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
