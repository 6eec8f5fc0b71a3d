//! Instance API routes
//!
//! Wires the instances domain to the live MongoDB and Neo4j drivers.

use axum::Router;
use domain_instances::{ConnectionService, LiveMongoDriver, LiveNeo4jDriver, handlers};

use crate::config::Config;

/// Create the instance router
pub fn router(config: &Config) -> Router {
    let mongo = LiveMongoDriver::new(config.mongodb.clone());
    let neo4j = LiveNeo4jDriver::new(config.neo4j.clone());

    handlers::router(ConnectionService::new(mongo, neo4j))
}
