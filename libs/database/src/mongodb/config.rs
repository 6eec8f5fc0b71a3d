#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default};
use mongodb::options::ClientOptions;
use std::time::Duration;

/// MongoDB client settings applied to every probe client
///
/// The connection string itself is not part of this config: it is built per
/// request from the submitted instance configuration (see
/// [`MongoTarget`](super::MongoTarget)). This struct only carries
/// the driver knobs the operator controls.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::default().with_app_name("instance-api");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Set both driver timeouts
    pub fn with_timeouts(mut self, connect_secs: u64, server_selection_secs: u64) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.server_selection_timeout_secs = server_selection_secs;
        self
    }

    /// Copy these settings onto parsed client options.
    pub fn apply(&self, options: &mut ClientOptions) {
        options.connect_timeout = Some(Duration::from_secs(self.connect_timeout_secs));
        options.server_selection_timeout =
            Some(Duration::from_secs(self.server_selection_timeout_secs));
        // A probe client only ever needs one connection.
        options.max_pool_size = Some(1);
        options.min_pool_size = Some(0);

        if let Some(ref app_name) = self.app_name {
            options.app_name = Some(app_name.clone());
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            app_name: None,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 10,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 10)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            connect_timeout_secs: env_parse_or_default(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or_default(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_default() {
        let config = MongoConfig::default();
        assert_eq!(config.app_name, None);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.server_selection_timeout_secs, 10);
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::default()
            .with_app_name("my-app")
            .with_timeouts(3, 4);
        assert_eq!(config.app_name, Some("my-app".to_string()));
        assert_eq!(config.connect_timeout_secs, 3);
        assert_eq!(config.server_selection_timeout_secs, 4);
    }

    #[test]
    fn test_mongo_config_apply_sets_driver_timeouts() {
        let mut options = ClientOptions::default();
        MongoConfig::default()
            .with_app_name("probe")
            .with_timeouts(2, 5)
            .apply(&mut options);

        assert_eq!(options.connect_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.max_pool_size, Some(1));
        assert_eq!(options.app_name.as_deref(), Some("probe"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_APP_NAME", Some("instance-api")),
                ("MONGODB_CONNECT_TIMEOUT_SECS", Some("7")),
                ("MONGODB_SERVER_SELECTION_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.app_name.as_deref(), Some("instance-api"));
                assert_eq!(config.connect_timeout_secs, 7);
                assert_eq!(config.server_selection_timeout_secs, 10);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_timeout() {
        temp_env::with_var("MONGODB_CONNECT_TIMEOUT_SECS", Some("ten"), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_CONNECT_TIMEOUT_SECS"));
        });
    }
}
