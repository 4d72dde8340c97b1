// ── Runtime connection configuration ──
//
// Describes *how* to reach the REST backend. Never touches disk: the
// CLI/TUI builds a `ClientConfig` (usually via orangebox-config) and
// hands it in.

use std::time::Duration;

use orangebox_api::{ApiClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Connection settings for one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `http://localhost:8000/api`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build an API client for this backend.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        Ok(ApiClient::new(self.api_url.as_str(), &self.transport())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_normalized_base() {
        let cfg = ClientConfig {
            timeout: Duration::from_secs(5),
            ..ClientConfig::new(Url::parse("http://localhost:8000/api").unwrap())
        };
        let client = cfg.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn missing_ca_surfaces_as_connection_error() {
        let cfg = ClientConfig {
            tls: TlsVerification::CustomCa("/nonexistent/ca.pem".into()),
            ..ClientConfig::new(Url::parse("https://localhost").unwrap())
        };
        let err = cfg.build_client().unwrap_err();
        assert!(matches!(err, CoreError::ConnectionFailed { ref reason, .. } if reason.starts_with("TLS error")));
    }
}
