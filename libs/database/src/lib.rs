//! Database library providing short-lived connectors for MongoDB and Neo4j
//!
//! Each connector opens a client, performs a single handshake and releases
//! the client again. Nothing here holds a pool across calls.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `neo4j` (default) - Neo4j support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::{Secret, mongodb};
//!
//! let target = mongodb::MongoTarget::new("mongodb://", "localhost:27017")
//!     .with_credentials("admin", Secret::new("password"));
//! let client = mongodb::open_client(&target, &mongodb::MongoConfig::default()).await?;
//! mongodb::ping(&client).await?;
//! mongodb::close(client).await;
//! ```
//!
//! ## Neo4j
//!
//! ```ignore
//! use database::neo4j;
//!
//! let token = neo4j::Neo4jAuthToken::bearer("ZXlKaGJHY2lPaUpJVXpJMU5pSjk=");
//! let driver = neo4j::open_driver("neo4j://localhost:7687", &token, &Default::default())?;
//! let (driver, result) = neo4j::verify_connectivity(driver).await;
//! if let Some(driver) = driver {
//!     neo4j::close(driver).await;
//! }
//! result?;
//! ```

// Always available modules
pub mod common;

// Database-specific modules (conditional based on features)
#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "neo4j")]
pub mod neo4j;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult, Secret};
