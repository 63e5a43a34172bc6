//! Pending change persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{ActionStatus, PendingChange};

/// Pending change warehouse Trait
///
/// The gate's obligation ends once [`save`](Self::save) returns `Ok`, so
/// implementations must only return after the change is durably stored.
#[async_trait]
pub trait PendingChangeRepository: Send + Sync {
    /// Save a change (new or overwrite)
    ///
    /// # Arguments
    /// * `change` - Change data
    async fn save(&self, change: &PendingChange) -> CoreResult<()>;

    /// Get change based on ID
    ///
    /// # Arguments
    /// * `id` - Change ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<PendingChange>>;

    /// Get all changes of a domain, oldest first
    ///
    /// # Arguments
    /// * `domain_id` - Domain ID
    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<PendingChange>>;

    /// Update change status
    ///
    /// Returns [`CoreError::ChangeNotFound`](crate::CoreError::ChangeNotFound)
    /// when no change has this id.
    ///
    /// # Arguments
    /// * `id` - Change ID
    /// * `status` - new status
    async fn update_status(&self, id: &str, status: ActionStatus) -> CoreResult<()>;
}
