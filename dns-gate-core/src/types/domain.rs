//! 域名与请求者相关类型定义

use serde::{Deserialize, Serialize};

use dns_gate_provider::{DomainCredential, VendorTag};

/// Per-domain role of a user, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DomainRole {
    /// 只读
    ReadOnly,
    /// 读写
    ReadWrite,
    /// 可管理读写用户
    Manager,
    /// 所有者
    Owner,
}

/// Non-secret reference to a domain, safe to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRef {
    /// 域名 ID（由外部持久化层分配）
    pub id: String,
    /// 域名，如 `example.com`
    pub name: String,
    pub vendor: VendorTag,
}

/// Everything the gate needs to know about the target domain.
#[derive(Debug, Clone)]
pub struct DomainContext {
    /// 域名 ID
    pub id: String,
    /// 是否为 ICP 备案域名（非所有者的修改需要审批）
    pub icp_gated: bool,
    pub credential: DomainCredential,
}

impl DomainContext {
    pub fn new(id: impl Into<String>, icp_gated: bool, credential: DomainCredential) -> Self {
        Self {
            id: id.into(),
            icp_gated,
            credential,
        }
    }

    /// Reference without the credential.
    pub fn reference(&self) -> DomainRef {
        DomainRef {
            id: self.id.clone(),
            name: self.credential.domain_name.clone(),
            vendor: self.credential.vendor,
        }
    }
}

/// The user asking for a mutation and their role on the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: String,
    pub role: DomainRole,
}

impl Requester {
    pub fn new(user_id: impl Into<String>, role: DomainRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}
