//! 核心类型定义

mod change;
mod domain;
mod operation;

pub use change::{ActionStatus, ActionType, PendingChange};
pub use domain::{DomainContext, DomainRef, DomainRole, Requester};
pub use operation::{ChangeOperation, OperationKind};

// Re-export library types
pub use dns_gate_provider::{DnsRecord, DomainCredential, VendorTag};
