//! Huawei Cloud DNS adapter
//!
//! Huawei only exposes recordsets, so each logical record is one value inside
//! a recordset and is addressed by a compound id (see [`identity`]).

mod adapter;
mod codec;
mod error;
mod http;
mod identity;
mod sign;
mod types;

use crate::http_client::Transport;
use crate::types::DomainCredential;

use types::{HuaweiRecord, RecordSet};

/// Maximum number of recordsets on a single page of Huawei Cloud API
pub(crate) const MAX_PAGE_SIZE: u32 = 500;

/// Signed REST client shared by both Huawei adapters.
pub(crate) struct HuaweiClient {
    pub(crate) transport: Transport,
    pub(crate) credential: DomainCredential,
}

/// Huawei single-record adapter.
///
/// Caches the resolved zone id and owning recordset for the duration of one
/// logical operation; the recordset cache is dropped whenever the id changes.
pub struct HuaweiAdapter {
    client: HuaweiClient,
    record: HuaweiRecord,
    zone_id: Option<String>,
    source: Option<RecordSet>,
}

impl HuaweiAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: HuaweiClient {
                transport,
                credential,
            },
            record: HuaweiRecord::default(),
            zone_id: None,
            source: None,
        }
    }
}

/// Huawei list adapter; flattens every recordset into one record per value.
pub struct HuaweiListAdapter {
    client: HuaweiClient,
    records: Vec<HuaweiRecord>,
}

impl HuaweiListAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: HuaweiClient {
                transport,
                credential,
            },
            records: Vec::new(),
        }
    }
}
