//! Serializable record mutation, captured by the gate and replayed on approval.

use serde::{Deserialize, Serialize};

use dns_gate_provider::{AdapterFactory, DnsRecord, DomainCredential, ProviderError, VendorTag};

use super::change::ActionType;
use super::domain::DomainRef;
use crate::error::{CoreError, CoreResult};

/// Which adapter call an operation stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
}

impl OperationKind {
    /// Action type recorded on the pending change.
    pub fn action_type(self) -> ActionType {
        match self {
            Self::Create => ActionType::Submit,
            Self::Update => ActionType::EditDns,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Intended adapter call: kind, target domain and desired record state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeOperation {
    pub kind: OperationKind,
    pub domain: DomainRef,
    pub record: DnsRecord,
}

impl ChangeOperation {
    pub fn new(kind: OperationKind, domain: DomainRef, record: DnsRecord) -> Self {
        Self {
            kind,
            domain,
            record,
        }
    }

    pub fn vendor(&self) -> VendorTag {
        self.domain.vendor
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runs the captured call through a fresh adapter and returns the
    /// record as the vendor now holds it.
    ///
    /// Updates read the record first so adapters that resolve ids lazily
    /// (Huawei) start from the current vendor state.
    pub async fn replay(
        &self,
        credential: DomainCredential,
        factory: &dyn AdapterFactory,
    ) -> CoreResult<DnsRecord> {
        if credential.vendor != self.domain.vendor || credential.domain_name != self.domain.name {
            return Err(CoreError::OperationMismatch(format!(
                "operation targets {} ({}), credential is for {} ({})",
                self.domain.name, self.domain.vendor, credential.domain_name, credential.vendor
            )));
        }

        let mut adapter = factory.record_adapter(credential)?;
        match self.kind {
            OperationKind::Create => {
                adapter.set_record(DnsRecord {
                    id: String::new(),
                    ..self.record.clone()
                });
                adapter.create().await?;
            }
            OperationKind::Update => {
                if self.record.id.is_empty() {
                    return Err(ProviderError::NotFound {
                        provider: self.domain.vendor.to_string(),
                        record_id: String::new(),
                        raw_message: Some("record id is empty".to_string()),
                    }
                    .into());
                }
                adapter.read(&self.record.id).await?;
                adapter.set_record(self.record.clone());
                adapter.update().await?;
            }
        }

        log::debug!(
            "[{}] Applied {} for domain {}: {}",
            self.domain.vendor,
            self.kind.verb(),
            self.domain.name,
            adapter.id()
        );
        Ok(adapter.record())
    }
}
