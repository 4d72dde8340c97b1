// ── Core error types ──
//
// User-facing errors from orangebox-core. Consumers never see reqwest or
// serde failures directly; the `From<orangebox_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Unknown {entity_type} field: {field}")]
    UnknownField { entity_type: String, field: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the backend answered).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Attach the entity type to a bare "resource not found" error.
    pub(crate) fn for_entity(self, entity_type: &str, identifier: impl ToString) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: identifier.to_string(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<orangebox_api::Error> for CoreError {
    fn from(err: orangebox_api::Error) -> Self {
        match err {
            orangebox_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            orangebox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            orangebox_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            orangebox_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            orangebox_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            orangebox_api::Error::Api { status: 422, message } => {
                CoreError::ValidationFailed { message }
            }
            orangebox_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            orangebox_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
