//! Service configuration

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Configuration for the long-lived HTTP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: Listen address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = raw
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR: {}", raw))?;

        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_default() {
        unsafe {
            std::env::remove_var("BIND_ADDR");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_server_config_invalid_address() {
        unsafe {
            std::env::set_var("BIND_ADDR", "localhost");
        }

        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));

        unsafe {
            std::env::remove_var("BIND_ADDR");
        }
    }
}
