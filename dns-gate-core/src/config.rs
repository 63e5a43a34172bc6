//! 配置加载
//!
//! ```toml
//! [transport]
//! connect_timeout_secs = 5
//! request_timeout_secs = 20
//!
//! [transport.endpoints]
//! huawei = "https://dns.cn-north-4.myhuaweicloud.com"
//! ```

use std::path::Path;

use dns_gate_provider::{DefaultAdapterFactory, Transport, TransportConfig};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level configuration; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Vendor HTTP timeouts and endpoints.
    pub transport: TransportConfig,
}

impl GateConfig {
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Builds the shared transport and the adapter factory around it.
    pub fn build_factory(&self) -> CoreResult<DefaultAdapterFactory> {
        let transport = Transport::new(&self.transport)?;
        Ok(DefaultAdapterFactory::new(transport))
    }
}
