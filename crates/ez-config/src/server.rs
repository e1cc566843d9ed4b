//! HTTP listener configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

/// 64 KiB: every request body is a small JSON object.
const fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Request bodies larger than this are rejected before parsing.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Parse [`bind`](Self::bind) into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.bind".into(),
            reason: format!("{e}"),
        })
    }
}
