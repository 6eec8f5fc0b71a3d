//! Connection probes
//!
//! A probe opens a private client, runs one handshake and releases the
//! client again. Every failure (driver error or panic) collapses into
//! `false`; nothing propagates to the caller.
//!
//! The driver traits are the seam between probe logic and real network I/O:
//! the app wires [`LiveMongoDriver`] / [`LiveNeo4jDriver`], tests inject
//! fakes.

mod mongo;
mod neo4j;

pub use mongo::{LiveMongoDriver, MongoProber};
pub use neo4j::{LiveNeo4jDriver, Neo4jProber};

use async_trait::async_trait;
use database::{DatabaseResult, mongodb::MongoTarget, neo4j::Neo4jAuthToken};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error};

/// An opened, not yet verified client.
#[async_trait]
pub trait ProbeSession: Send {
    /// Connect and authenticate. The first call that touches the network.
    async fn handshake(&mut self) -> DatabaseResult<()>;

    /// Release the client. Must not fail.
    async fn close(self: Box<Self>);
}

/// Opens MongoDB clients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MongoDriver: Send + Sync {
    async fn open(&self, target: &MongoTarget) -> DatabaseResult<Box<dyn ProbeSession>>;
}

/// Opens Neo4j drivers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Neo4jDriver: Send + Sync {
    async fn open(&self, url: &str, token: Neo4jAuthToken)
    -> DatabaseResult<Box<dyn ProbeSession>>;
}

/// Open a session, handshake, and always close what was opened.
async fn run_probe<F>(open: F, store: &'static str) -> bool
where
    F: Future<Output = DatabaseResult<Box<dyn ProbeSession>>>,
{
    let mut session = match AssertUnwindSafe(open).catch_unwind().await {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            error!(error = %e, "Failed to create {} client", store);
            return false;
        }
        Err(_) => {
            error!("{} client creation panicked", store);
            return false;
        }
    };

    let outcome = AssertUnwindSafe(session.handshake()).catch_unwind().await;

    debug!("Closing {} connection", store);
    session.close().await;

    match outcome {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!(error = %e, "{} connection failed", store);
            false
        }
        Err(_) => {
            error!("{} connection attempt panicked", store);
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeSession, Handshake};
    use super::*;
    use database::DatabaseError;
    use std::sync::atomic::Ordering;

    async fn probe_with(behavior: Handshake) -> (bool, usize, usize) {
        let (session, handshakes, closes) = FakeSession::new(behavior);
        let open = async move { Ok(Box::new(session) as Box<dyn ProbeSession>) };
        let connected = run_probe(open, "test").await;
        (
            connected,
            handshakes.load(Ordering::SeqCst),
            closes.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn test_successful_handshake_closes_session() {
        assert_eq!(probe_with(Handshake::Ok).await, (true, 1, 1));
    }

    #[tokio::test]
    async fn test_failed_handshake_closes_session() {
        assert_eq!(probe_with(Handshake::Fail).await, (false, 1, 1));
    }

    #[tokio::test]
    async fn test_panicking_handshake_closes_session() {
        assert_eq!(probe_with(Handshake::Panic).await, (false, 1, 1));
    }

    #[tokio::test]
    async fn test_open_failure_is_false() {
        let open = async { Err(DatabaseError::ConfigError("bad url".into())) };
        assert!(!run_probe(open, "test").await);
    }

    #[tokio::test]
    async fn test_open_panic_is_false() {
        let open = async {
            if true {
                panic!("constructor bug");
            }
            Err(DatabaseError::ConfigError("unreachable".into()))
        };
        assert!(!run_probe(open, "test").await);
    }
}
