//! Vendor adapter implementations

/// Shared helpers used by the adapters.
pub(crate) mod common;

#[cfg(feature = "aliyun")]
mod aliyun;
#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "dnspod")]
mod dnspod;
#[cfg(feature = "huaweicloud")]
mod huaweicloud;

#[cfg(feature = "aliyun")]
pub use aliyun::{AliyunAdapter, AliyunListAdapter};
#[cfg(feature = "cloudflare")]
pub use cloudflare::{CloudflareAdapter, CloudflareListAdapter};
#[cfg(feature = "dnspod")]
pub use dnspod::{DnspodAdapter, DnspodListAdapter};
#[cfg(feature = "huaweicloud")]
pub use huaweicloud::{HuaweiAdapter, HuaweiListAdapter};
