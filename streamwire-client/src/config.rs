//! Client configuration.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use streamwire_protocol::{DEFAULT_PORT, MAX_PAYLOAD_SIZE};

/// Default connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for dialing a broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Broker address as `host:port`.
    pub server_address: String,
    /// Upper bound on establishing the TCP connection.
    #[serde(with = "duration_ms_serde")]
    pub connect_timeout: Duration,
    /// Disables Nagle's algorithm on the socket.
    pub nodelay: bool,
    /// Largest response payload accepted, in bytes.
    pub max_response_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_address: format!("127.0.0.1:{}", DEFAULT_PORT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            nodelay: true,
            max_response_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with `STREAMWIRE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    pub fn with_max_response_size(mut self, size: u32) -> Self {
        self.max_response_size = size;
        self
    }

    /// Applies `STREAMWIRE_*` environment variables. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("STREAMWIRE_SERVER_ADDRESS") {
            if !addr.is_empty() {
                self.server_address = addr;
            }
        }

        if let Some(timeout) = lookup("STREAMWIRE_CONNECT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.connect_timeout = Duration::from_millis(ms);
            }
        }

        if let Some(nodelay) = lookup("STREAMWIRE_NODELAY") {
            self.nodelay = nodelay == "1" || nodelay.to_lowercase() == "true";
        }

        if let Some(size) = lookup("STREAMWIRE_MAX_RESPONSE_SIZE") {
            if let Ok(n) = size.parse() {
                self.max_response_size = n;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.server_address.is_empty() {
            return Err(ClientError::Config("server_address must not be empty".into()));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::Config("connect_timeout must be non-zero".into()));
        }
        if self.max_response_size == 0 {
            return Err(ClientError::Config(
                "max_response_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_address, "127.0.0.1:8090");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.nodelay);
        assert_eq!(config.max_response_size, 16 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("broker:9000")
            .with_connect_timeout(Duration::from_millis(250))
            .with_nodelay(false)
            .with_max_response_size(1024);
        assert_eq!(config.server_address, "broker:9000");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert!(!config.nodelay);
        assert_eq!(config.max_response_size, 1024);
    }

    #[test]
    fn test_env_overrides() {
        let vars = overrides(&[
            ("STREAMWIRE_SERVER_ADDRESS", "10.0.0.5:8090"),
            ("STREAMWIRE_CONNECT_TIMEOUT_MS", "1500"),
            ("STREAMWIRE_NODELAY", "false"),
            ("STREAMWIRE_MAX_RESPONSE_SIZE", "4096"),
        ]);
        let mut config = ClientConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());

        assert_eq!(config.server_address, "10.0.0.5:8090");
        assert_eq!(config.connect_timeout, Duration::from_millis(1500));
        assert!(!config.nodelay);
        assert_eq!(config.max_response_size, 4096);
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let vars = overrides(&[
            ("STREAMWIRE_CONNECT_TIMEOUT_MS", "soon"),
            ("STREAMWIRE_MAX_RESPONSE_SIZE", "-1"),
        ]);
        let mut config = ClientConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = ClientConfig::default().with_max_response_size(0);
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = ClientConfig::default().with_connect_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = ClientConfig::new("");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_config_serde_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server_address": "broker:8090", "connect_timeout": 500}"#)
                .unwrap();
        assert_eq!(config.server_address, "broker:8090");
        assert_eq!(config.connect_timeout, Duration::from_millis(500));
        assert!(config.nodelay);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["connect_timeout"], 500);
    }
}
