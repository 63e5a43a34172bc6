//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::ActionStatus;

// Re-export library error type
pub use dns_gate_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain has no stored credential
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Pending change not found
    #[error("Pending change not found: {0}")]
    ChangeNotFound(String),

    /// Status change not allowed from the current status
    #[error("Pending change {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: ActionStatus,
        to: ActionStatus,
    },

    /// Replayed operation does not belong to the supplied credential
    #[error("Operation mismatch: {0}")]
    OperationMismatch(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::ChangeNotFound(_)
            | Self::InvalidTransition { .. }
            | Self::OperationMismatch(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::SerializationError(_) | Self::StorageError(_) | Self::ConfigError(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_classification() {
        let not_found = CoreError::from(ProviderError::NotFound {
            provider: "huawei".to_string(),
            record_id: "HWrs@00".to_string(),
            raw_message: None,
        });
        assert!(not_found.is_expected());

        let vendor = CoreError::from(ProviderError::Vendor {
            provider: "aliyun".to_string(),
            raw_code: Some("InternalError".to_string()),
            raw_message: "boom".to_string(),
        });
        assert!(!vendor.is_expected());
    }

    #[test]
    fn invalid_transition_message_names_both_states() {
        let err = CoreError::InvalidTransition {
            id: "c-1".to_string(),
            from: ActionStatus::Rejected,
            to: ActionStatus::Approved,
        };
        assert_eq!(
            err.to_string(),
            "Pending change c-1 cannot move from rejected to approved"
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::ChangeNotFound("c-9".to_string())).unwrap_or_default();
        assert_eq!(json["code"], "ChangeNotFound");
        assert_eq!(json["details"], "c-9");
    }
}
