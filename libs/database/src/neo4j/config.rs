#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default};
use std::time::Duration;

/// Neo4j driver settings applied to every probe driver
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neo4jConfig {
    /// Socket connect timeout in seconds
    pub connection_timeout_secs: u64,
}

impl Neo4jConfig {
    pub fn with_connection_timeout(mut self, secs: u64) -> Self {
        self.connection_timeout_secs = secs;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: 10,
        }
    }
}

/// Environment variables:
/// - `NEO4J_CONNECTION_TIMEOUT_SECS` (optional, default: 10)
#[cfg(feature = "config")]
impl FromEnv for Neo4jConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            connection_timeout_secs: env_parse_or_default(
                "NEO4J_CONNECTION_TIMEOUT_SECS",
                Self::default().connection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neo4j_config_default() {
        let config = Neo4jConfig::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.with_connection_timeout(2).connection_timeout(),
            Duration::from_secs(2)
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_neo4j_config_from_env() {
        temp_env::with_var("NEO4J_CONNECTION_TIMEOUT_SECS", Some("3"), || {
            let config = Neo4jConfig::from_env().unwrap();
            assert_eq!(config.connection_timeout_secs, 3);
        });

        temp_env::with_var_unset("NEO4J_CONNECTION_TIMEOUT_SECS", || {
            let config = Neo4jConfig::from_env().unwrap();
            assert_eq!(config, Neo4jConfig::default());
        });
    }
}
