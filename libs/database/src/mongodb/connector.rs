use mongodb::{Client, options::ClientOptions};
use tracing::debug;

use super::{MongoConfig, MongoTarget};
use crate::common::DatabaseResult;

/// Build a client bound to `target`.
///
/// The driver connects lazily, so this only parses the connection string and
/// applies `config`. Use [`ping`](super::ping) to perform the actual
/// handshake and [`close`](super::close) to release the client.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, MongoTarget, open_client, ping, close};
///
/// let target = MongoTarget::new("mongodb://", "localhost:27017");
/// let client = open_client(&target, &MongoConfig::default()).await?;
/// let reachable = ping(&client).await.is_ok();
/// close(client).await;
/// ```
pub async fn open_client(target: &MongoTarget, config: &MongoConfig) -> DatabaseResult<Client> {
    debug!(target = %target, "Opening MongoDB client");

    let connection_string = target.connection_string();
    let mut options = ClientOptions::parse(connection_string.as_str()).await?;
    config.apply(&mut options);

    Ok(Client::with_options(options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Secret;

    #[tokio::test]
    async fn test_open_client_is_lazy() {
        // No server is contacted until the first operation.
        let target = MongoTarget::new("mongodb://", "127.0.0.1:1")
            .with_credentials("alice", Secret::new("s3cret"));
        let client = open_client(&target, &MongoConfig::default()).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_open_client_rejects_malformed_uri() {
        let target = MongoTarget::new("mongodb://", "");
        let err = open_client(&target, &MongoConfig::default()).await.unwrap_err();
        assert!(matches!(err, crate::DatabaseError::Mongo(_)));
    }
}
