//! Domain credential lookup abstract Trait

use async_trait::async_trait;
use dns_gate_provider::DomainCredential;

use crate::error::CoreResult;

/// Resolves the credential of a domain at approval time.
///
/// Pending changes never store secrets, so replay fetches the current
/// credential from the domain entity instead.
#[async_trait]
pub trait CredentialLookup: Send + Sync {
    /// # Arguments
    /// * `domain_id` - Domain ID
    async fn find_credential(&self, domain_id: &str) -> CoreResult<Option<DomainCredential>>;
}
