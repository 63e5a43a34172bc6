//! Cloudflare DNS adapter
//!
//! The domain credential's `auth_id` is the zone id and `auth_secret` the
//! API token.

mod adapter;
mod error;
mod http;
mod types;

use crate::http_client::Transport;
use crate::types::DomainCredential;

use types::CloudflareRecord;

/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 500;

/// Record types Cloudflare can proxy.
const PROXIABLE_TYPES: [&str; 3] = ["A", "AAAA", "CNAME"];

/// Zone-scoped API client shared by both Cloudflare adapters.
pub(crate) struct CloudflareClient {
    pub(crate) transport: Transport,
    pub(crate) credential: DomainCredential,
}

/// Cloudflare single-record adapter.
pub struct CloudflareAdapter {
    client: CloudflareClient,
    record: CloudflareRecord,
}

impl CloudflareAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: CloudflareClient {
                transport,
                credential,
            },
            record: CloudflareRecord::default(),
        }
    }
}

/// Cloudflare list adapter.
pub struct CloudflareListAdapter {
    client: CloudflareClient,
    records: Vec<CloudflareRecord>,
}

impl CloudflareListAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: CloudflareClient {
                transport,
                credential,
            },
            records: Vec::new(),
        }
    }
}

fn is_proxiable(record_type: &str) -> bool {
    PROXIABLE_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(record_type))
}
