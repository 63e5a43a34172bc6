//! DNS Gate Core Library
//!
//! Decides whether a DNS record mutation runs now or waits for approval:
//! - [`ChangeGate`]: applies a create/update directly, or captures it as a
//!   [`PendingChange`] when the domain is ICP-gated and the requester is not
//!   its owner
//! - [`RepositoryApprovalWorkflow`]: approves (replays) or rejects captured changes
//! - [`GateConfig`]: TOML configuration for the shared vendor transport
//!
//! Persistence and credential storage are abstracted through traits; vendor
//! calls go through [`dns_gate_provider`].

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::GateConfig;
pub use error::{CoreError, CoreResult};
pub use services::{ChangeGate, GateOutcome, RepositoryApprovalWorkflow};
pub use traits::{ApprovalWorkflow, CredentialLookup, PendingChangeRepository};
pub use types::{
    ActionStatus, ActionType, ChangeOperation, DomainContext, DomainRef, DomainRole,
    OperationKind, PendingChange, Requester,
};
