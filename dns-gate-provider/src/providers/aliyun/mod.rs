//! 阿里云 DNS adapter

mod adapter;
mod error;
mod http;
mod sign;
mod types;

use crate::http_client::Transport;
use crate::types::DomainCredential;

use types::AliyunRecord;

pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
/// 阿里云 `DescribeDomainRecords` 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 500;
/// 更新时 Line 为空则使用默认线路
pub(crate) const DEFAULT_LINE: &str = "default";

/// RPC client shared by both Aliyun adapters.
pub(crate) struct AliyunClient {
    pub(crate) transport: Transport,
    pub(crate) credential: DomainCredential,
}

/// Aliyun single-record adapter.
///
/// `vendor_custom_fields` carries `line` (resolution line) and the read-only
/// `status`.
pub struct AliyunAdapter {
    client: AliyunClient,
    record: AliyunRecord,
}

impl AliyunAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: AliyunClient {
                transport,
                credential,
            },
            record: AliyunRecord::default(),
        }
    }
}

/// Aliyun list adapter.
pub struct AliyunListAdapter {
    client: AliyunClient,
    records: Vec<AliyunRecord>,
}

impl AliyunListAdapter {
    pub fn new(credential: DomainCredential, transport: Transport) -> Self {
        Self {
            client: AliyunClient {
                transport,
                credential,
            },
            records: Vec::new(),
        }
    }
}
