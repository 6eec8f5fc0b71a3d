use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

// Driver settings live next to the drivers in the database library
use database::mongodb::MongoConfig;
use database::neo4j::Neo4jConfig;

pub use core_config::Environment;

/// Application-specific configuration
///
/// Only driver tuning comes from the environment; the databases to check
/// arrive with each request.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub neo4j: Neo4jConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let mongodb = MongoConfig::from_env()?;
        let neo4j = Neo4jConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            mongodb,
            neo4j,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(
            [
                "APP_ENV",
                "PORT",
                "MONGODB_APP_NAME",
                "MONGODB_CONNECT_TIMEOUT_SECS",
                "NEO4J_CONNECTION_TIMEOUT_SECS",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "instance_api");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.mongodb, MongoConfig::default());
                assert_eq!(config.neo4j, Neo4jConfig::default());
            },
        );
    }

    #[test]
    fn test_config_reads_driver_timeouts() {
        temp_env::with_vars(
            [
                ("MONGODB_CONNECT_TIMEOUT_SECS", Some("4")),
                ("NEO4J_CONNECTION_TIMEOUT_SECS", Some("6")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.connect_timeout_secs, 4);
                assert_eq!(config.neo4j.connection_timeout_secs, 6);
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        temp_env::with_var("NEO4J_CONNECTION_TIMEOUT_SECS", Some("soon"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("NEO4J_CONNECTION_TIMEOUT_SECS"));
        });
    }
}
