//! Instances Domain
//!
//! Validates the connection settings of an instance and checks that both of
//! its backing stores (MongoDB and Neo4j) are reachable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, concurrent probing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Probes    │  ← Open / handshake / close (driver traits + live drivers)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Request body, typed configuration, responses
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_instances::{ConnectionService, LiveMongoDriver, LiveNeo4jDriver, handlers};
//!
//! let service = ConnectionService::new(LiveMongoDriver::default(), LiveNeo4jDriver::default());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod probe;
pub mod service;
mod validation;

// Re-export commonly used types
pub use error::{InstanceError, InstanceResult};
pub use handlers::ApiDoc;
pub use models::{
    AuthParameters, CheckConnectionRequest, ConnectionOptions, ConnectionStatus,
    InstanceConnectionConfig, MongoAuth, MongoAuthConfiguration, MongoConnectionConfig,
    MongoMechanism, MongoScheme, Neo4jAuth, Neo4jAuthConfiguration, Neo4jAuthType,
    Neo4jConnectionConfig, Neo4jScheme,
};
pub use probe::{
    LiveMongoDriver, LiveNeo4jDriver, MongoDriver, MongoProber, Neo4jDriver, Neo4jProber,
    ProbeSession,
};
pub use service::ConnectionService;
