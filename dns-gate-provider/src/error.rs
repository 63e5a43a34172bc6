use serde::{Deserialize, Serialize};

/// Unified error type for every adapter operation.
///
/// The variants form a closed taxonomy; vendor-specific error codes are mapped
/// into one of them by each adapter, so callers never branch on raw vendor
/// payloads. Every variant that concerns a vendor call carries the `provider`
/// name that produced it.
///
/// # Propagation
///
/// - [`Credential`](Self::Credential) and [`UnsupportedVendor`](Self::UnsupportedVendor)
///   indicate misconfiguration and must not be retried.
/// - [`Vendor`](Self::Vendor) and [`NotFound`](Self::NotFound) propagate unchanged.
///   This crate performs no automatic retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The domain's auth id or secret is missing. No vendor call was attempted.
    Credential {
        /// Provider the credential belongs to.
        provider: String,
        /// What is wrong with the credential.
        detail: String,
    },

    /// The vendor reports no such record (or recordset).
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// Opaque id that could not be resolved.
        record_id: String,
        /// Original error message from the vendor, if any.
        raw_message: Option<String>,
    },

    /// The vendor reports that the target state already exists.
    Conflict {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Original error message from the vendor, if any.
        raw_message: Option<String>,
    },

    /// Any other vendor-reported or transport-level failure.
    ///
    /// Timeouts, connection failures and unparseable responses land here too.
    Vendor {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the vendor API, if available.
        raw_code: Option<String>,
        /// Raw error message from the vendor API or transport.
        raw_message: String,
    },

    /// The factory was given a vendor tag it has no adapter for.
    UnsupportedVendor {
        /// The unrecognized tag.
        vendor: String,
    },

    /// `select_by_ids` did not resolve exactly one record per requested id.
    MismatchCount {
        /// Provider whose list was searched.
        provider: String,
        /// Number of ids requested.
        requested: usize,
        /// Number of records that matched.
        matched: usize,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Credential { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::UnsupportedVendor { .. }
                | Self::MismatchCount { .. }
        )
    }

    /// Whether the error stems from configuration rather than the vendor.
    ///
    /// Such errors must surface immediately and never be retried.
    #[must_use]
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::Credential { .. } | Self::UnsupportedVendor { .. }
        )
    }

    /// Provider name attached to the error, if any.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Credential { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::Conflict { provider, .. }
            | Self::Vendor { provider, .. }
            | Self::MismatchCount { provider, .. } => Some(provider),
            Self::UnsupportedVendor { .. } => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credential { provider, detail } => {
                write!(f, "[{provider}] Invalid credentials: {detail}")
            }
            Self::NotFound {
                provider,
                record_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Record '{record_id}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Record '{record_id}' not found")
                }
            }
            Self::Conflict {
                provider,
                record_name,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_name}' already exists")
            }
            Self::Vendor {
                provider,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] Vendor error [{code}]: {raw_message}")
                } else {
                    write!(f, "[{provider}] Vendor error: {raw_message}")
                }
            }
            Self::UnsupportedVendor { vendor } => {
                write!(f, "Unsupported DNS vendor: {vendor}")
            }
            Self::MismatchCount {
                provider,
                requested,
                matched,
            } => {
                write!(
                    f,
                    "[{provider}] Not all records found: requested {requested}, matched {matched}"
                )
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
