//! 待审批变更相关类型定义

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operation::ChangeOperation;
use crate::error::CoreResult;

/// 变更类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// 新建 DNS 记录
    Submit,
    /// 修改 DNS 记录
    #[serde(rename = "editDNS")]
    EditDns,
    /// 修改域名其他信息
    EditOthers,
    /// 授予用户访问权限
    GrantAccess,
    /// 撤销用户访问权限
    RevokeAccess,
    /// 删除
    Delete,
}

/// 审批状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// 审核中
    Reviewing,
    /// 已通过
    Approved,
    /// 已拒绝
    Rejected,
}

impl ActionStatus {
    /// Lowercase status string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reviewing => "reviewing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation that was captured instead of applied.
///
/// `operation` holds a JSON-serialized [`ChangeOperation`]; it never carries
/// the domain's credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChange {
    /// 变更 ID (UUID)
    pub id: String,
    /// 域名 ID
    pub domain_id: String,
    /// 发起用户 ID
    pub user_id: String,
    pub action_type: ActionType,
    pub status: ActionStatus,
    /// 人类可读的变更说明
    pub reason: String,
    /// 序列化后的操作
    pub operation: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl PendingChange {
    /// New change in [`ActionStatus::Reviewing`].
    pub fn reviewing(
        domain_id: impl Into<String>,
        user_id: impl Into<String>,
        action_type: ActionType,
        reason: impl Into<String>,
        operation: &ChangeOperation,
    ) -> CoreResult<Self> {
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            domain_id: domain_id.into(),
            user_id: user_id.into(),
            action_type,
            status: ActionStatus::Reviewing,
            reason: reason.into(),
            operation: operation.to_json()?,
            created_at: Utc::now(),
        })
    }

    /// Decodes the captured operation.
    pub fn decode_operation(&self) -> CoreResult<ChangeOperation> {
        ChangeOperation::from_json(&self.operation)
    }
}
