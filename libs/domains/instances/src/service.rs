//! Connection Service - validates an instance configuration and probes both stores

use std::sync::Arc;
use tracing::{info, info_span, instrument};

use crate::error::{InstanceError, InstanceResult};
use crate::models::{
    CheckConnectionRequest, ConnectionOptions, ConnectionStatus, InstanceConnectionConfig,
};
use crate::probe::{MongoDriver, MongoProber, Neo4jDriver, Neo4jProber};

/// Service behind the instance endpoints
///
/// Holds no connections between calls; every check opens and releases its
/// own clients through the drivers.
pub struct ConnectionService<M: MongoDriver, N: Neo4jDriver> {
    mongo: Arc<M>,
    neo4j: Arc<N>,
}

impl<M: MongoDriver, N: Neo4jDriver> ConnectionService<M, N> {
    pub fn new(mongo: M, neo4j: N) -> Self {
        Self {
            mongo: Arc::new(mongo),
            neo4j: Arc::new(neo4j),
        }
    }

    /// Validate `request`, then probe both databases concurrently.
    ///
    /// Fails with `Validation` before any network call, or with
    /// `ConnectionFailure` carrying both results when either probe fails.
    #[instrument(skip_all)]
    pub async fn check_connection(
        &self,
        request: CheckConnectionRequest,
    ) -> InstanceResult<ConnectionStatus> {
        let config = InstanceConnectionConfig::try_from(request)?;
        let status = self.probe(&config).await;

        if status.all_connected() {
            info!("All connections established");
            Ok(status)
        } else {
            Err(InstanceError::ConnectionFailure(status))
        }
    }

    /// Probe both databases concurrently. Never fails.
    pub async fn probe(&self, config: &InstanceConnectionConfig) -> ConnectionStatus {
        let mongo = MongoProber::new(
            self.mongo.as_ref(),
            info_span!("probe", component = "mongo"),
        );
        let neo4j = Neo4jProber::new(
            self.neo4j.as_ref(),
            info_span!("probe", component = "neo4j"),
        );

        let (mongo_connected, neo4j_connected) =
            tokio::join!(mongo.probe(&config.mongo), neo4j.probe(&config.neo4j));

        ConnectionStatus {
            mongo_connected,
            neo4j_connected,
        }
    }

    /// Schemes and auth methods accepted by [`check_connection`](Self::check_connection)
    pub fn options(&self) -> ConnectionOptions {
        ConnectionOptions::catalog()
    }
}
