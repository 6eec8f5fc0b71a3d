//! Neo4j connector and handshake helpers
//!
//! Built on the `neo4j` driver crate, which supports all four Bolt auth
//! schemes (none, basic, bearer, kerberos). Its API is blocking; the async
//! helpers here move that work onto tokio's blocking pool.

mod auth;
mod config;
mod connector;
mod health;

pub use auth::Neo4jAuthToken;
pub use config::Neo4jConfig;
pub use connector::open_driver;
pub use health::{close, verify_connectivity};

// Re-export the driver type for convenience
pub use neo4j::driver::Driver;
