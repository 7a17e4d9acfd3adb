//! Stack and endpoint records consumed by the deployment adapter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StackError;

/// File name of the compose manifest expected inside a stack's project directory.
pub const MANIFEST_FILE_NAME: &str = "docker-compose.yml";

/// A named, deployable stack backed by a compose manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDescriptor {
    /// Stack name, passed verbatim to the orchestration tool
    pub name: String,
    /// Directory holding `docker-compose.yml`
    pub project_path: PathBuf,
}

impl StackDescriptor {
    pub fn new(name: impl Into<String>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_path: project_path.into(),
        }
    }

    /// Path of the compose manifest for this stack.
    pub fn manifest_path(&self) -> PathBuf {
        self.project_path.join(MANIFEST_FILE_NAME)
    }
}

/// A target container engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Engine address, e.g. `tcp://10.0.0.5:2376` or `unix:///var/run/docker.sock`
    pub url: String,
    /// TLS settings; absent means plain connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

impl EndpointDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tls: None,
        }
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// TLS settings, only when TLS is switched on.
    pub fn enabled_tls(&self) -> Option<&TlsConfig> {
        self.tls.as_ref().filter(|tls| tls.enabled)
    }
}

/// TLS settings for an endpoint. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub skip_verify: bool,
    #[serde(default)]
    pub ca_cert_path: String,
    #[serde(default)]
    pub cert_path: String,
    #[serde(default)]
    pub key_path: String,
}

impl TlsConfig {
    /// TLS with server verification against the given CA.
    pub fn verified(ca_cert_path: impl Into<String>) -> Self {
        Self {
            enabled: true,
            skip_verify: false,
            ca_cert_path: ca_cert_path.into(),
            ..Self::default()
        }
    }

    /// TLS without server verification.
    pub fn insecure() -> Self {
        Self {
            enabled: true,
            skip_verify: true,
            ..Self::default()
        }
    }

    pub fn with_client_cert(
        mut self,
        cert_path: impl Into<String>,
        key_path: impl Into<String>,
    ) -> Self {
        self.cert_path = cert_path.into();
        self.key_path = key_path.into();
        self
    }

    /// Whether a complete client certificate/key pair is configured.
    pub fn has_client_cert(&self) -> bool {
        !self.cert_path.is_empty() && !self.key_path.is_empty()
    }

    /// Check the TLS record invariants.
    ///
    /// A disabled config is always valid. Enabled configs need both or neither
    /// of the client cert/key, and a CA certificate unless verification is skipped.
    pub fn validate(&self) -> Result<(), StackError> {
        if !self.enabled {
            return Ok(());
        }
        if self.cert_path.is_empty() != self.key_path.is_empty() {
            return Err(StackError::InvalidConfig(
                "TLS cert_path and key_path must be set together".to_string(),
            ));
        }
        if !self.skip_verify && self.ca_cert_path.is_empty() {
            return Err(StackError::InvalidConfig(
                "TLS ca_cert_path is required unless skip_verify is set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_joins_compose_file() {
        let stack = StackDescriptor::new("blog", "/data/stacks/blog");
        assert_eq!(
            stack.manifest_path(),
            PathBuf::from("/data/stacks/blog/docker-compose.yml")
        );
    }

    #[test]
    fn enabled_tls_ignores_disabled_config() {
        let endpoint = EndpointDescriptor::new("tcp://host:2376").with_tls(TlsConfig {
            ca_cert_path: "/certs/ca.pem".to_string(),
            ..TlsConfig::default()
        });
        assert!(endpoint.enabled_tls().is_none());
    }

    #[test]
    fn validate_accepts_disabled_config_with_partial_fields() {
        let tls = TlsConfig {
            cert_path: "/certs/cert.pem".to_string(),
            ..TlsConfig::default()
        };
        assert!(tls.validate().is_ok());
    }

    #[test]
    fn validate_rejects_lone_client_cert() {
        let tls = TlsConfig {
            cert_path: "/certs/cert.pem".to_string(),
            ..TlsConfig::insecure()
        };
        let err = tls.validate().unwrap_err();
        assert!(err.to_string().contains("cert_path and key_path"));
    }

    #[test]
    fn validate_requires_ca_when_verifying() {
        let tls = TlsConfig {
            enabled: true,
            ..TlsConfig::default()
        };
        let err = tls.validate().unwrap_err();
        assert!(err.to_string().contains("ca_cert_path"));
    }

    #[test]
    fn validate_accepts_insecure_with_client_cert() {
        let tls = TlsConfig::insecure().with_client_cert("/c.pem", "/k.pem");
        assert!(tls.validate().is_ok());
        assert!(tls.has_client_cert());
    }
}
