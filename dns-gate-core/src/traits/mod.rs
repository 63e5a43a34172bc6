//! Storage layer abstraction trait definition

mod approval_workflow;
mod credential_lookup;
mod pending_change_repository;

pub use approval_workflow::ApprovalWorkflow;
pub use credential_lookup::CredentialLookup;
pub use pending_change_repository::PendingChangeRepository;
