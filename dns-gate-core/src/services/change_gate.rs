//! DNS 记录变更闸门
//!
//! Mutations on ICP-gated domains by non-owners are captured as
//! [`PendingChange`]s; everything else goes straight to the vendor.

use std::sync::Arc;

use dns_gate_provider::{AdapterFactory, DnsRecord};

use crate::error::CoreResult;
use crate::traits::PendingChangeRepository;
use crate::types::{
    ChangeOperation, DomainContext, DomainRole, OperationKind, PendingChange, Requester,
};

/// Result of a gated mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Applied immediately; the record as the vendor now holds it.
    Applied(DnsRecord),
    /// Stored for approval; no vendor call was made.
    Deferred(PendingChange),
}

impl GateOutcome {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// DNS 记录变更闸门
pub struct ChangeGate {
    factory: Arc<dyn AdapterFactory>,
    changes: Arc<dyn PendingChangeRepository>,
}

impl ChangeGate {
    #[must_use]
    pub fn new(factory: Arc<dyn AdapterFactory>, changes: Arc<dyn PendingChangeRepository>) -> Self {
        Self { factory, changes }
    }

    /// ICP 备案域名上，非所有者的修改需要审批
    pub fn requires_approval(domain: &DomainContext, requester: &Requester) -> bool {
        domain.icp_gated && requester.role < DomainRole::Owner
    }

    /// 创建 DNS 记录
    pub async fn create(
        &self,
        domain: &DomainContext,
        requester: &Requester,
        record: DnsRecord,
    ) -> CoreResult<GateOutcome> {
        self.submit(OperationKind::Create, domain, requester, record)
            .await
    }

    /// 更新 DNS 记录
    ///
    /// `record.id` names the record to update; the adapter reads it first and
    /// then pushes the given field values.
    pub async fn update(
        &self,
        domain: &DomainContext,
        requester: &Requester,
        record: DnsRecord,
    ) -> CoreResult<GateOutcome> {
        self.submit(OperationKind::Update, domain, requester, record)
            .await
    }

    /// 删除 DNS 记录（不经过审批）
    pub async fn delete(&self, domain: &DomainContext, record_id: &str) -> CoreResult<()> {
        let mut adapter = self.factory.record_adapter(domain.credential.clone())?;
        adapter.read(record_id).await?;
        adapter.delete().await?;
        log::debug!(
            "[{}] Deleted {record_id} from {}",
            domain.credential.vendor,
            domain.credential.domain_name
        );
        Ok(())
    }

    async fn submit(
        &self,
        kind: OperationKind,
        domain: &DomainContext,
        requester: &Requester,
        record: DnsRecord,
    ) -> CoreResult<GateOutcome> {
        let operation = ChangeOperation::new(kind, domain.reference(), record);

        if !Self::requires_approval(domain, requester) {
            let record = operation
                .replay(domain.credential.clone(), self.factory.as_ref())
                .await?;
            return Ok(GateOutcome::Applied(record));
        }

        let reason = format!(
            "{} want to {} dns record for domain {}",
            requester.user_id,
            kind.verb(),
            domain.credential.domain_name
        );
        let change = PendingChange::reviewing(
            domain.id.as_str(),
            requester.user_id.as_str(),
            kind.action_type(),
            reason,
            &operation,
        )?;
        self.changes.save(&change).await?;

        log::info!(
            "Deferred {} on {} by user {} as pending change {}",
            kind.verb(),
            domain.credential.domain_name,
            requester.user_id,
            change.id
        );
        Ok(GateOutcome::Deferred(change))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{
        MockAdapterFactory, MockPendingChangeRepository, requester, test_domain,
    };
    use crate::types::{ActionStatus, ActionType};

    struct Fixture {
        gate: ChangeGate,
        factory: MockAdapterFactory,
        changes: Arc<MockPendingChangeRepository>,
    }

    fn fixture() -> Fixture {
        let factory = MockAdapterFactory::new();
        let changes = Arc::new(MockPendingChangeRepository::new());
        let gate = ChangeGate::new(Arc::new(factory.clone()), changes.clone());
        Fixture {
            gate,
            factory,
            changes,
        }
    }

    fn record() -> DnsRecord {
        DnsRecord::new("A", "www", "192.0.2.1").with_ttl(600)
    }

    #[test]
    fn approval_needed_only_below_owner_on_gated_domain() {
        let gated = test_domain(true);
        let open = test_domain(false);
        for role in [DomainRole::ReadOnly, DomainRole::ReadWrite, DomainRole::Manager] {
            assert!(ChangeGate::requires_approval(&gated, &requester(role)));
            assert!(!ChangeGate::requires_approval(&open, &requester(role)));
        }
        assert!(!ChangeGate::requires_approval(&gated, &requester(DomainRole::Owner)));
        assert!(!ChangeGate::requires_approval(&open, &requester(DomainRole::Owner)));
    }

    #[tokio::test]
    async fn gated_create_is_deferred_without_vendor_calls() {
        let f = fixture();
        let outcome = f
            .gate
            .create(&test_domain(true), &requester(DomainRole::Manager), record())
            .await
            .unwrap();

        let GateOutcome::Deferred(change) = outcome else {
            panic!("expected a deferred change");
        };
        assert_eq!(change.status, ActionStatus::Reviewing);
        assert_eq!(change.action_type, ActionType::Submit);
        assert_eq!(change.domain_id, "domain-1");
        assert_eq!(change.user_id, "user-7");
        assert_eq!(
            change.reason,
            "user-7 want to create dns record for domain example.com"
        );

        let op = change.decode_operation().unwrap();
        assert_eq!(op.kind, OperationKind::Create);
        assert_eq!(op.domain.name, "example.com");
        assert_eq!(op.record, record());
        assert!(!change.operation.contains("test-secret"));

        assert!(f.factory.calls().is_empty());
        assert_eq!(f.changes.len().await, 1);
    }

    #[tokio::test]
    async fn gated_update_uses_edit_dns_action() {
        let f = fixture();
        let mut target = record();
        target.id = "rec-1".to_string();

        let outcome = f
            .gate
            .update(&test_domain(true), &requester(DomainRole::ReadWrite), target)
            .await
            .unwrap();

        let GateOutcome::Deferred(change) = outcome else {
            panic!("expected a deferred change");
        };
        assert_eq!(change.action_type, ActionType::EditDns);
        assert!(change.reason.contains("want to update dns record"));
        assert_eq!(change.decode_operation().unwrap().record.id, "rec-1");
        assert!(f.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn owner_on_gated_domain_applies_directly() {
        let f = fixture();
        let outcome = f
            .gate
            .create(&test_domain(true), &requester(DomainRole::Owner), record())
            .await
            .unwrap();

        let GateOutcome::Applied(applied) = outcome else {
            panic!("expected an applied record");
        };
        assert_eq!(applied.id, "mock-1");
        assert_eq!(applied.content, "192.0.2.1");
        assert_eq!(f.factory.calls(), ["create"]);
        assert_eq!(f.changes.len().await, 0);
    }

    #[tokio::test]
    async fn ungated_update_reads_then_updates() {
        let f = fixture();
        let mut target = record();
        target.id = "rec-1".to_string();

        let outcome = f
            .gate
            .update(&test_domain(false), &requester(DomainRole::ReadOnly), target)
            .await
            .unwrap();

        assert!(!outcome.is_deferred());
        assert_eq!(f.factory.calls(), ["read rec-1", "update rec-1"]);
        assert_eq!(f.changes.len().await, 0);
    }

    #[tokio::test]
    async fn vendor_error_propagates_on_direct_path() {
        let f = fixture();
        f.factory.fail_next(dns_gate_provider::ProviderError::Conflict {
            provider: "aliyun".to_string(),
            record_name: "www".to_string(),
            raw_message: None,
        });

        let err = f
            .gate
            .create(&test_domain(false), &requester(DomainRole::Owner), record())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
        assert_eq!(f.changes.len().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_on_deferred_path() {
        let f = fixture();
        f.changes.set_save_error(Some("disk full".to_string())).await;

        let err = f
            .gate
            .create(&test_domain(true), &requester(DomainRole::ReadWrite), record())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StorageError(ref msg) if msg == "disk full"));
        assert!(f.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_is_never_gated() {
        let f = fixture();
        f.gate
            .delete(&test_domain(true), "rec-3")
            .await
            .unwrap();
        assert_eq!(f.factory.calls(), ["read rec-3", "delete rec-3"]);
        assert_eq!(f.changes.len().await, 0);
    }
}
