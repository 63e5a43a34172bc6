//! Approval boundary Trait

use async_trait::async_trait;
use dns_gate_provider::DnsRecord;

use crate::error::CoreResult;
use crate::types::PendingChange;

/// Decides the fate of a [`PendingChange`].
///
/// Only a change in `Reviewing` may be approved or rejected.
#[async_trait]
pub trait ApprovalWorkflow: Send + Sync {
    /// Replays the captured operation and marks the change `Approved`.
    ///
    /// Returns the record as the vendor holds it after the replay. A failed
    /// replay leaves the change in `Reviewing`.
    async fn approve(&self, change_id: &str) -> CoreResult<DnsRecord>;

    /// Marks the change `Rejected` without touching the vendor.
    async fn reject(&self, change_id: &str) -> CoreResult<PendingChange>;
}
