//! 业务逻辑服务层

mod approval_service;
mod change_gate;

pub use approval_service::RepositoryApprovalWorkflow;
pub use change_gate::{ChangeGate, GateOutcome};
