//! Server configuration, read from `PROPCAST_*` environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use propcast_core::{ConfigSource, Placeholder};

use crate::error::{ServerError, ServerResult};

pub const HOST_VAR: &str = "PROPCAST_HOST";
pub const PORT_VAR: &str = "PROPCAST_PORT";
pub const PLACEHOLDER_VAR: &str = "PROPCAST_PLACEHOLDER";
pub const PROPERTIES_VAR: &str = "PROPCAST_PROPERTIES";

/// Properties file picked up from the working directory when present.
pub const DEFAULT_PROPERTIES_FILE: &str = "application.properties";

/// The property served when nothing else is configured.
pub const DEFAULT_PLACEHOLDER: &str = "${test:default}";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Which property to serve and its fallback.
    pub placeholder: Placeholder,
    /// Explicit properties file. When `None` the optional
    /// [`DEFAULT_PROPERTIES_FILE`] is used instead.
    pub properties_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            placeholder: Placeholder::new("test", Some("default".to_string())),
            properties_file: None,
        }
    }
}

impl ServerConfig {
    /// Reads overrides from `source`, keeping defaults for anything unset.
    pub fn from_source(source: &dyn ConfigSource) -> ServerResult<Self> {
        let mut config = ServerConfig::default();

        if let Some(host) = source.get(HOST_VAR) {
            config.host = host
                .parse::<IpAddr>()
                .map_err(|e| ServerError::Config(format!("{} '{}' is not an IP address: {}", HOST_VAR, host, e)))?;
        }
        if let Some(port) = source.get(PORT_VAR) {
            config.port = port
                .parse::<u16>()
                .map_err(|e| ServerError::Config(format!("{} '{}' is not a valid port: {}", PORT_VAR, port, e)))?;
        }
        if let Some(expression) = source.get(PLACEHOLDER_VAR) {
            config.placeholder = Placeholder::parse(&expression)?;
        }
        if let Some(path) = source.get(PROPERTIES_VAR).filter(|p| !p.is_empty()) {
            config.properties_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcast_core::MapSource;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServerConfig::from_source(&MapSource::new("env")).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.placeholder.to_string(), DEFAULT_PLACEHOLDER);
        assert!(config.properties_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let env = MapSource::new("env")
            .with(HOST_VAR, "0.0.0.0")
            .with(PORT_VAR, "3000")
            .with(PLACEHOLDER_VAR, "${greeting:hi}")
            .with(PROPERTIES_VAR, "/etc/propcast/app.properties");
        let config = ServerConfig::from_source(&env).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.placeholder.key(), "greeting");
        assert_eq!(config.placeholder.default_value(), Some("hi"));
        assert_eq!(config.properties_file, Some(PathBuf::from("/etc/propcast/app.properties")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let env = MapSource::new("env").with(PORT_VAR, "eighty");
        let err = ServerConfig::from_source(&env).unwrap_err();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.contains(PORT_VAR)));

        let env = MapSource::new("env").with(PORT_VAR, "70000");
        assert!(ServerConfig::from_source(&env).is_err());
    }

    #[test]
    fn test_invalid_placeholder_rejected() {
        let env = MapSource::new("env").with(PLACEHOLDER_VAR, "${:oops}");
        let err = ServerConfig::from_source(&env).unwrap_err();
        assert!(matches!(err, ServerError::Core(_)));
    }
}
