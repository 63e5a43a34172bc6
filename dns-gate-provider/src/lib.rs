//! # dns-gate-provider
//!
//! One record-CRUD contract over four DNS vendors.
//!
//! ## Supported Vendors
//!
//! | Vendor | Feature Flag | Auth Method | Record identity |
//! |--------|-------------|-------------|-----------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token (zone id + API token) | vendor id |
//! | [Aliyun DNS](https://www.aliyun.com/product/dns) | `aliyun` | ACS3-HMAC-SHA256 | vendor id |
//! | [DNSPod (Tencent Cloud)](https://www.dnspod.cn/) | `dnspod` | TC3-HMAC-SHA256 | numeric vendor id |
//! | [Huawei Cloud DNS](https://www.huaweicloud.com/product/dns.html) | `huaweicloud` | SDK-HMAC-SHA256 | `HW<recordset>@<fingerprint>` |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable all vendors listed above.
//! - **`cloudflare`**, **`aliyun`**, **`dnspod`**, **`huaweicloud`**: Enable a single vendor.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_gate_provider::{
//!     AdapterFactory, DefaultAdapterFactory, DnsRecord, DomainCredential, Transport,
//!     TransportConfig, VendorTag,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. One transport per process, injected into every adapter
//!     let factory = DefaultAdapterFactory::new(Transport::new(&TransportConfig::default())?);
//!     let credential = DomainCredential::new(VendorTag::Huawei, "example.com", "ak", "sk");
//!
//!     // 2. Create a record; TTL 0 would let the vendor pick its default
//!     let mut adapter = factory.record_adapter(credential.clone())?;
//!     adapter.set_record(DnsRecord::new("A", "www", "1.2.3.4").with_ttl(300));
//!     adapter.create().await?;
//!
//!     // 3. List the zone and pick records by opaque id
//!     let mut list = factory.list_adapter(credential)?;
//!     list.list().await?;
//!     let picked = list.select_by_ids(&[adapter.id().to_string()])?;
//!     println!("{picked:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError), one of
//! `Credential`, `NotFound`, `Conflict`, `Vendor`, `UnsupportedVendor` or
//! `MismatchCount`. Nothing is retried by this crate.

mod config;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use config::{TransportConfig, VendorEndpoints};
pub use error::{ProviderError, Result};
pub use factory::{AdapterFactory, DefaultAdapterFactory, create_list_adapter, create_record_adapter};
pub use http_client::Transport;
pub use traits::{RecordAdapter, RecordListAdapter};
pub use types::{DnsRecord, DomainCredential, VendorTag, custom_fields};

#[cfg(feature = "cloudflare")]
pub use providers::{CloudflareAdapter, CloudflareListAdapter};

#[cfg(feature = "aliyun")]
pub use providers::{AliyunAdapter, AliyunListAdapter};

#[cfg(feature = "dnspod")]
pub use providers::{DnspodAdapter, DnspodListAdapter};

#[cfg(feature = "huaweicloud")]
pub use providers::{HuaweiAdapter, HuaweiListAdapter};
