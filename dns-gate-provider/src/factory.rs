//! Adapter factory: vendor tag → adapter constructors.

use crate::error::{ProviderError, Result};
use crate::http_client::Transport;
use crate::traits::{RecordAdapter, RecordListAdapter};
use crate::types::{DomainCredential, VendorTag};

#[cfg(feature = "aliyun")]
use crate::providers::{AliyunAdapter, AliyunListAdapter};
#[cfg(feature = "cloudflare")]
use crate::providers::{CloudflareAdapter, CloudflareListAdapter};
#[cfg(feature = "dnspod")]
use crate::providers::{DnspodAdapter, DnspodListAdapter};
#[cfg(feature = "huaweicloud")]
use crate::providers::{HuaweiAdapter, HuaweiListAdapter};

/// Builds fresh adapters for one logical operation.
///
/// Object safe so callers can hold an `Arc<dyn AdapterFactory>` and swap in a
/// mock in tests.
pub trait AdapterFactory: Send + Sync {
    /// Single-record adapter for `credential.vendor`.
    fn record_adapter(&self, credential: DomainCredential) -> Result<Box<dyn RecordAdapter>>;

    /// List adapter for `credential.vendor`.
    fn list_adapter(&self, credential: DomainCredential) -> Result<Box<dyn RecordListAdapter>>;
}

/// Factory backed by the vendor adapters compiled into this crate.
#[derive(Debug, Clone)]
pub struct DefaultAdapterFactory {
    transport: Transport,
}

impl DefaultAdapterFactory {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

impl AdapterFactory for DefaultAdapterFactory {
    fn record_adapter(&self, credential: DomainCredential) -> Result<Box<dyn RecordAdapter>> {
        create_record_adapter(credential, self.transport.clone())
    }

    fn list_adapter(&self, credential: DomainCredential) -> Result<Box<dyn RecordListAdapter>> {
        create_list_adapter(credential, self.transport.clone())
    }
}

fn unsupported(vendor: VendorTag) -> ProviderError {
    ProviderError::UnsupportedVendor {
        vendor: vendor.to_string(),
    }
}

/// Creates a [`RecordAdapter`] for the credential's vendor.
///
/// Vendors whose feature is disabled yield [`ProviderError::UnsupportedVendor`].
///
/// ```rust,no_run
/// use dns_gate_provider::{
///     create_record_adapter, DnsRecord, DomainCredential, Transport, TransportConfig, VendorTag,
/// };
///
/// # async fn example() -> dns_gate_provider::Result<()> {
/// let transport = Transport::new(&TransportConfig::default())?;
/// let credential = DomainCredential::new(VendorTag::Aliyun, "example.com", "ak", "sk");
/// let mut adapter = create_record_adapter(credential, transport)?;
/// adapter.set_record(DnsRecord::new("A", "www", "1.2.3.4").with_ttl(600));
/// adapter.create().await?;
/// println!("created {}", adapter.id());
/// # Ok(())
/// # }
/// ```
#[allow(unreachable_patterns)]
pub fn create_record_adapter(
    credential: DomainCredential,
    transport: Transport,
) -> Result<Box<dyn RecordAdapter>> {
    match credential.vendor {
        #[cfg(feature = "cloudflare")]
        VendorTag::Cloudflare => Ok(Box::new(CloudflareAdapter::new(credential, transport))),
        #[cfg(feature = "aliyun")]
        VendorTag::Aliyun => Ok(Box::new(AliyunAdapter::new(credential, transport))),
        #[cfg(feature = "dnspod")]
        VendorTag::Dnspod => Ok(Box::new(DnspodAdapter::new(credential, transport))),
        #[cfg(feature = "huaweicloud")]
        VendorTag::Huawei => Ok(Box::new(HuaweiAdapter::new(credential, transport))),
        vendor => {
            let _ = transport;
            Err(unsupported(vendor))
        }
    }
}

/// Creates a [`RecordListAdapter`] for the credential's vendor.
#[allow(unreachable_patterns)]
pub fn create_list_adapter(
    credential: DomainCredential,
    transport: Transport,
) -> Result<Box<dyn RecordListAdapter>> {
    match credential.vendor {
        #[cfg(feature = "cloudflare")]
        VendorTag::Cloudflare => Ok(Box::new(CloudflareListAdapter::new(credential, transport))),
        #[cfg(feature = "aliyun")]
        VendorTag::Aliyun => Ok(Box::new(AliyunListAdapter::new(credential, transport))),
        #[cfg(feature = "dnspod")]
        VendorTag::Dnspod => Ok(Box::new(DnspodListAdapter::new(credential, transport))),
        #[cfg(feature = "huaweicloud")]
        VendorTag::Huawei => Ok(Box::new(HuaweiListAdapter::new(credential, transport))),
        vendor => {
            let _ = transport;
            Err(unsupported(vendor))
        }
    }
}
