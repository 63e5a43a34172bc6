//! 待审批变更的审批服务

use std::sync::Arc;

use async_trait::async_trait;
use dns_gate_provider::{AdapterFactory, DnsRecord};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{ApprovalWorkflow, CredentialLookup, PendingChangeRepository};
use crate::types::{ActionStatus, PendingChange};

/// [`ApprovalWorkflow`] over a [`PendingChangeRepository`].
///
/// Decisions are serialized within one instance so a change is replayed at
/// most once per process. Instances in different processes sharing one
/// repository are not coordinated.
pub struct RepositoryApprovalWorkflow {
    factory: Arc<dyn AdapterFactory>,
    changes: Arc<dyn PendingChangeRepository>,
    credentials: Arc<dyn CredentialLookup>,
    decisions: Mutex<()>,
}

impl RepositoryApprovalWorkflow {
    #[must_use]
    pub fn new(
        factory: Arc<dyn AdapterFactory>,
        changes: Arc<dyn PendingChangeRepository>,
        credentials: Arc<dyn CredentialLookup>,
    ) -> Self {
        Self {
            factory,
            changes,
            credentials,
            decisions: Mutex::new(()),
        }
    }

    /// Loads a change that is allowed to move to `to`.
    async fn load_reviewing(&self, id: &str, to: ActionStatus) -> CoreResult<PendingChange> {
        let change = self
            .changes
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ChangeNotFound(id.to_string()))?;

        if change.status != ActionStatus::Reviewing {
            return Err(CoreError::InvalidTransition {
                id: id.to_string(),
                from: change.status,
                to,
            });
        }
        Ok(change)
    }
}

#[async_trait]
impl ApprovalWorkflow for RepositoryApprovalWorkflow {
    async fn approve(&self, change_id: &str) -> CoreResult<DnsRecord> {
        let _guard = self.decisions.lock().await;
        let change = self
            .load_reviewing(change_id, ActionStatus::Approved)
            .await?;

        let operation = change.decode_operation()?;
        if operation.domain.id != change.domain_id {
            return Err(CoreError::OperationMismatch(format!(
                "change {} is filed under domain {} but targets domain {}",
                change.id, change.domain_id, operation.domain.id
            )));
        }

        let credential = self
            .credentials
            .find_credential(&change.domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(change.domain_id.clone()))?;

        let record = match operation.replay(credential, self.factory.as_ref()).await {
            Ok(record) => record,
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Replay of pending change {change_id} failed: {e}");
                } else {
                    log::error!("Replay of pending change {change_id} failed: {e}");
                }
                return Err(e);
            }
        };

        if let Err(e) = self
            .changes
            .update_status(change_id, ActionStatus::Approved)
            .await
        {
            log::error!(
                "Pending change {change_id} was applied at {} ({}, record {}) but could not be marked approved: {e}",
                operation.domain.vendor,
                operation.domain.name,
                record.id
            );
            return Err(e);
        }
        log::info!(
            "Approved pending change {change_id} ({} on {})",
            operation.kind.verb(),
            operation.domain.name
        );
        Ok(record)
    }

    async fn reject(&self, change_id: &str) -> CoreResult<PendingChange> {
        let _guard = self.decisions.lock().await;
        let mut change = self
            .load_reviewing(change_id, ActionStatus::Rejected)
            .await?;

        self.changes
            .update_status(change_id, ActionStatus::Rejected)
            .await?;
        change.status = ActionStatus::Rejected;
        log::info!("Rejected pending change {change_id}");
        Ok(change)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::services::{ChangeGate, GateOutcome};
    use crate::test_utils::{
        MockAdapterFactory, MockCredentialLookup, MockPendingChangeRepository, requester,
        test_credential, test_domain,
    };
    use crate::types::DomainRole;
    use dns_gate_provider::{ProviderError, VendorTag};

    struct Fixture {
        gate: ChangeGate,
        workflow: RepositoryApprovalWorkflow,
        factory: MockAdapterFactory,
        changes: Arc<MockPendingChangeRepository>,
        credentials: Arc<MockCredentialLookup>,
    }

    async fn fixture() -> Fixture {
        let factory = MockAdapterFactory::new();
        let changes = Arc::new(MockPendingChangeRepository::new());
        let credentials = Arc::new(MockCredentialLookup::new());
        credentials
            .insert("domain-1", test_credential(VendorTag::Aliyun))
            .await;

        let gate = ChangeGate::new(Arc::new(factory.clone()), changes.clone());
        let workflow = RepositoryApprovalWorkflow::new(
            Arc::new(factory.clone()),
            changes.clone(),
            credentials.clone(),
        );
        Fixture {
            gate,
            workflow,
            factory,
            changes,
            credentials,
        }
    }

    async fn defer_update(f: &Fixture) -> PendingChange {
        let mut record = DnsRecord::new("A", "www", "192.0.2.8");
        record.id = "rec-5".to_string();
        let outcome = f
            .gate
            .update(&test_domain(true), &requester(DomainRole::ReadWrite), record)
            .await
            .unwrap();
        match outcome {
            GateOutcome::Deferred(change) => change,
            GateOutcome::Applied(_) => panic!("expected a deferred change"),
        }
    }

    async fn status_of(f: &Fixture, id: &str) -> ActionStatus {
        f.changes.find_by_id(id).await.unwrap().unwrap().status
    }

    #[tokio::test]
    async fn approve_replays_and_marks_approved() {
        let f = fixture().await;
        let change = defer_update(&f).await;
        assert!(f.factory.calls().is_empty());

        let record = f.workflow.approve(&change.id).await.unwrap();
        assert_eq!(record.id, "rec-5");
        assert_eq!(record.content, "192.0.2.8");
        assert_eq!(f.factory.calls(), ["read rec-5", "update rec-5"]);
        assert_eq!(status_of(&f, &change.id).await, ActionStatus::Approved);
    }

    #[tokio::test]
    async fn reject_never_touches_vendor() {
        let f = fixture().await;
        let change = defer_update(&f).await;

        let rejected = f.workflow.reject(&change.id).await.unwrap();
        assert_eq!(rejected.status, ActionStatus::Rejected);
        assert_eq!(status_of(&f, &change.id).await, ActionStatus::Rejected);
        assert!(f.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn decided_change_cannot_move_again() {
        let f = fixture().await;
        let change = defer_update(&f).await;
        f.workflow.reject(&change.id).await.unwrap();

        let err = f.workflow.approve(&change.id).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                from: ActionStatus::Rejected,
                to: ActionStatus::Approved,
                ..
            }
        ));

        let err = f.workflow.reject(&change.id).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                from: ActionStatus::Rejected,
                to: ActionStatus::Rejected,
                ..
            }
        ));
        assert!(f.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn approved_change_is_replayed_once() {
        let f = fixture().await;
        let change = defer_update(&f).await;
        f.workflow.approve(&change.id).await.unwrap();

        let err = f.workflow.approve(&change.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(f.factory.calls().len(), 2);
    }

    #[tokio::test]
    async fn failed_replay_keeps_change_reviewing() {
        let f = fixture().await;
        let change = defer_update(&f).await;
        f.factory.fail_next(ProviderError::NotFound {
            provider: "aliyun".to_string(),
            record_id: "rec-5".to_string(),
            raw_message: None,
        });

        let err = f.workflow.approve(&change.id).await.unwrap_err();
        assert!(matches!(err, CoreError::Provider(ProviderError::NotFound { .. })));
        assert_eq!(status_of(&f, &change.id).await, ActionStatus::Reviewing);
    }

    #[tokio::test]
    async fn status_write_failure_after_replay_surfaces_storage_error() {
        let f = fixture().await;
        let change = defer_update(&f).await;
        f.changes
            .set_status_error(Some("read-only replica".to_string()))
            .await;

        let err = f.workflow.approve(&change.id).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(ref msg) if msg == "read-only replica"));
        assert_eq!(f.factory.calls(), ["read rec-5", "update rec-5"]);
        assert_eq!(status_of(&f, &change.id).await, ActionStatus::Reviewing);
    }

    #[tokio::test]
    async fn unknown_change_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            f.workflow.approve("missing").await,
            Err(CoreError::ChangeNotFound(_))
        ));
        assert!(matches!(
            f.workflow.reject("missing").await,
            Err(CoreError::ChangeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_credential_is_domain_not_found() {
        let f = fixture().await;
        let mut change = defer_update(&f).await;
        let mut operation = change.decode_operation().unwrap();
        operation.domain.id = "domain-2".to_string();
        change.id = "orphan".to_string();
        change.domain_id = "domain-2".to_string();
        change.operation = operation.to_json().unwrap();
        f.changes.save(&change).await.unwrap();

        let err = f.workflow.approve("orphan").await.unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(ref id) if id == "domain-2"));
        assert_eq!(status_of(&f, "orphan").await, ActionStatus::Reviewing);
    }

    #[tokio::test]
    async fn credential_for_other_vendor_is_mismatch() {
        let f = fixture().await;
        f.credentials
            .insert("domain-1", test_credential(VendorTag::Cloudflare))
            .await;
        let change = defer_update(&f).await;

        let err = f.workflow.approve(&change.id).await.unwrap_err();
        assert!(matches!(err, CoreError::OperationMismatch(_)));
        assert!(f.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn changes_list_per_domain() {
        let f = fixture().await;
        let first = defer_update(&f).await;
        let second = defer_update(&f).await;

        let listed = f.changes.find_by_domain("domain-1").await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
        assert!(f.changes.find_by_domain("domain-9").await.unwrap().is_empty());
    }
}
