//! MongoDB connector and handshake helpers
//!
//! Short-lived clients only: open, ping, close.

mod config;
mod connector;
mod health;
mod target;

pub use config::MongoConfig;
pub use connector::open_client;
pub use health::{close, ping};
pub use target::{MongoCredentials, MongoTarget, mask_userinfo};

// Re-export MongoDB types for convenience
pub use mongodb::Client;
