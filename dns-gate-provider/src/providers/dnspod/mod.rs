//! 腾讯云 `DNSPod` adapter

mod adapter;
mod error;
mod http;
mod sign;
mod types;

use crate::http_client::Transport;
use crate::types::DomainCredential;

use types::DnspodRecord;

pub(crate) const DNSPOD_SERVICE: &str = "dnspod";
pub(crate) const DNSPOD_VERSION: &str = "2021-03-23";
/// `DescribeRecordList` 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 500;
/// 未指定线路时使用的默认线路
pub(crate) const DEFAULT_RECORD_LINE: &str = "默认";
/// 未指定状态时新记录为启用
pub(crate) const DEFAULT_STATUS: &str = "ENABLE";

/// TC3 client shared by both `DNSPod` adapters.
pub(crate) struct DnspodClient {
    pub(crate) transport: Transport,
    pub(crate) credential: DomainCredential,
}

/// `DNSPod` single-record adapter.
///
/// Record ids are numeric on the wire; the opaque id is the decimal string.
/// `vendor_custom_fields` carries `line` and `status` (`ENABLE` / `DISABLE`).
pub struct DnspodAdapter {
    client: DnspodClient,
    record: DnspodRecord,
}

impl DnspodAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: DnspodClient {
                transport,
                credential,
            },
            record: DnspodRecord::default(),
        }
    }
}

/// `DNSPod` list adapter.
pub struct DnspodListAdapter {
    client: DnspodClient,
    records: Vec<DnspodRecord>,
}

impl DnspodListAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: DnspodClient {
                transport,
                credential,
            },
            records: Vec::new(),
        }
    }
}
