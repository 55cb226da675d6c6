//! Service configuration with validation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Upload limits
    pub limits: LimitsConfig,
    /// Media storage backend configuration
    pub storage: StorageConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            limits: LimitsConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_upload_bytes cannot be 0".into(),
            ));
        }

        match self.storage.backend {
            StorageBackendKind::Local => {
                if self.storage.local_root.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidStorage(
                        "local backend requires local_root".into(),
                    ));
                }
            }
            StorageBackendKind::Remote => {
                if self.storage.remote_endpoint.is_none() {
                    return Err(ConfigError::InvalidStorage(
                        "remote backend requires remote_endpoint".into(),
                    ));
                }
            }
        }

        if self.storage.prefix.is_empty() {
            return Err(ConfigError::InvalidStorage(
                "storage prefix cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
        }
    }
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max uploaded file size in bytes (default: 5MB)
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Which media storage backend to wire at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Local filesystem under `local_root`.
    Local,
    /// Remote object storage at `remote_endpoint`.
    Remote,
}

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection
    pub backend: StorageBackendKind,
    /// Root directory for the local backend
    pub local_root: PathBuf,
    /// Object key prefix (doubles as the public URL path for local storage)
    pub prefix: String,
    /// Base URL of the remote object store (remote backend only)
    pub remote_endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Local,
            local_root: PathBuf::from("data"),
            prefix: "uploads".to_string(),
            remote_endpoint: None,
        }
    }
}

/// Authentication configuration.
///
/// Token verification proper belongs to the upstream auth collaborator; this
/// only configures the static token table used by development runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// token → identity mappings for the static verifier
    pub tokens: HashMap<String, String>,
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid storage configuration
    #[error("invalid storage config: {0}")]
    InvalidStorage(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
