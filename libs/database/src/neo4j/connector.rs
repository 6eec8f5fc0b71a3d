use neo4j::driver::{ConnectionConfig, Driver, DriverConfig};
use std::sync::Arc;
use tracing::debug;

use super::{Neo4jAuthToken, Neo4jConfig};
use crate::common::{DatabaseError, DatabaseResult};

/// Build a driver for `url` authenticating with `token`.
///
/// No connection is made here; [`verify_connectivity`](super::verify_connectivity)
/// performs the handshake and [`close`](super::close) releases the driver.
///
/// # Example
/// ```ignore
/// use database::neo4j::{Neo4jAuthToken, Neo4jConfig, open_driver, verify_connectivity, close};
///
/// let token = Neo4jAuthToken::basic("neo4j", "password");
/// let driver = open_driver("neo4j://localhost:7687", &token, &Neo4jConfig::default())?;
/// let (driver, result) = verify_connectivity(driver).await;
/// close(driver).await;
/// ```
pub fn open_driver(
    url: &str,
    token: &Neo4jAuthToken,
    config: &Neo4jConfig,
) -> DatabaseResult<Driver> {
    debug!(url, auth = %token, "Opening Neo4j driver");

    let connection_config: ConnectionConfig = url
        .parse()
        .map_err(|e| DatabaseError::ConfigError(format!("invalid Neo4j URL '{url}': {e}")))?;

    let driver_config = DriverConfig::new()
        .with_auth(Arc::new(token.to_driver_token()))
        .with_connection_timeout(config.connection_timeout());

    Ok(Driver::new(connection_config, driver_config))
}
