use async_trait::async_trait;
use database::neo4j::{self, Driver, Neo4jAuthToken, Neo4jConfig};
use database::{DatabaseError, DatabaseResult};
use tracing::{Instrument, Span, debug, info};

use super::{Neo4jDriver, ProbeSession, run_probe};
use crate::models::{Neo4jAuth, Neo4jConnectionConfig};

/// Checks whether a Neo4j server accepts the submitted credentials.
pub struct Neo4jProber<'a, D: Neo4jDriver + ?Sized> {
    driver: &'a D,
    span: Span,
}

impl<'a, D: Neo4jDriver + ?Sized> Neo4jProber<'a, D> {
    /// `span` scopes every log record of this probe.
    pub fn new(driver: &'a D, span: Span) -> Self {
        Self { driver, span }
    }

    /// `true` when a driver could connect and authenticate.
    pub async fn probe(&self, config: &Neo4jConnectionConfig) -> bool {
        async {
            info!(
                url = %config.url,
                scheme = %config.scheme,
                auth_type = %config.auth.auth_type(),
                "Checking Neo4j connection"
            );

            match &config.auth {
                Neo4jAuth::Basic { .. } => debug!("Using basic authentication"),
                Neo4jAuth::Bearer { .. } => debug!("Using bearer authentication"),
                Neo4jAuth::Kerberos { .. } => debug!("Using kerberos authentication"),
                Neo4jAuth::None => debug!("Using no authentication"),
            }

            let url = config.driver_url();
            let token = config.auth.token();
            debug!(url = %url, auth = %token, "Attempting to connect to Neo4j");

            run_probe(self.driver.open(&url, token), "Neo4j").await
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Opens real drivers with the `neo4j` crate.
#[derive(Debug, Clone, Default)]
pub struct LiveNeo4jDriver {
    config: Neo4jConfig,
}

impl LiveNeo4jDriver {
    pub fn new(config: Neo4jConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Neo4jDriver for LiveNeo4jDriver {
    async fn open(
        &self,
        url: &str,
        token: Neo4jAuthToken,
    ) -> DatabaseResult<Box<dyn ProbeSession>> {
        let driver = neo4j::open_driver(url, &token, &self.config)?;
        Ok(Box::new(Neo4jSession {
            driver: Some(driver),
        }))
    }
}

/// `None` only after the driver was lost in a failed blocking task.
struct Neo4jSession {
    driver: Option<Driver>,
}

#[async_trait]
impl ProbeSession for Neo4jSession {
    async fn handshake(&mut self) -> DatabaseResult<()> {
        let driver = self
            .driver
            .take()
            .ok_or_else(|| DatabaseError::ConnectionFailed("Neo4j driver already released".into()))?;

        let (driver, result) = neo4j::verify_connectivity(driver).await;
        self.driver = driver;
        result
    }

    async fn close(self: Box<Self>) {
        if let Some(driver) = self.driver {
            neo4j::close(driver).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Neo4jScheme;
    use crate::probe::MockNeo4jDriver;
    use crate::probe::testing::{FakeSession, Handshake};
    use database::Secret;
    use std::sync::atomic::Ordering;

    fn config(auth: Neo4jAuth) -> Neo4jConnectionConfig {
        Neo4jConnectionConfig {
            url: "graph.example.net:7687".into(),
            scheme: Neo4jScheme::Bolt,
            auth,
        }
    }

    async fn probe_expecting(auth: Neo4jAuth, expected: Neo4jAuthToken) -> bool {
        let mut driver = MockNeo4jDriver::new();
        driver
            .expect_open()
            .withf(move |url, token| url == "bolt://graph.example.net:7687" && *token == expected)
            .times(1)
            .returning(|_, _| Ok(Box::new(FakeSession::new(Handshake::Ok).0) as Box<dyn ProbeSession>));

        Neo4jProber::new(&driver, Span::none())
            .probe(&config(auth))
            .await
    }

    #[tokio::test]
    async fn test_basic_auth_token() {
        let auth = Neo4jAuth::Basic {
            username: "neo4j".into(),
            password: Secret::new("pw"),
        };
        assert!(probe_expecting(auth, Neo4jAuthToken::basic("neo4j", "pw")).await);
    }

    #[tokio::test]
    async fn test_bearer_auth_token() {
        let auth = Neo4jAuth::Bearer {
            token: Secret::new("dG9rZW4="),
        };
        assert!(probe_expecting(auth, Neo4jAuthToken::bearer("dG9rZW4=")).await);
    }

    #[tokio::test]
    async fn test_kerberos_auth_token() {
        let auth = Neo4jAuth::Kerberos {
            ticket: Secret::new("dGlja2V0"),
        };
        assert!(probe_expecting(auth, Neo4jAuthToken::kerberos("dGlja2V0")).await);
    }

    #[tokio::test]
    async fn test_no_auth_passes_none_token() {
        assert!(probe_expecting(Neo4jAuth::None, Neo4jAuthToken::none()).await);
    }

    #[tokio::test]
    async fn test_panicking_handshake_is_false_and_closes() {
        let (session, _, closes) = FakeSession::new(Handshake::Panic);
        let mut session = Some(session);

        let mut driver = MockNeo4jDriver::new();
        driver.expect_open().times(1).returning(move |_, _| {
            Ok(Box::new(session.take().expect("opened twice")) as Box<dyn ProbeSession>)
        });

        let prober = Neo4jProber::new(&driver, Span::none());
        assert!(!prober.probe(&config(Neo4jAuth::None)).await);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_live_driver_unreachable_server() {
        let driver = LiveNeo4jDriver::new(Neo4jConfig::default().with_connection_timeout(1));
        let config = Neo4jConnectionConfig {
            url: "127.0.0.1:1".into(),
            scheme: Neo4jScheme::Bolt,
            auth: Neo4jAuth::None,
        };
        assert!(!Neo4jProber::new(&driver, Span::none()).probe(&config).await);
    }

    #[tokio::test]
    #[ignore] // Requires actual Neo4j
    async fn test_live_driver_against_local_server() {
        let driver = LiveNeo4jDriver::default();
        let config = Neo4jConnectionConfig {
            url: "localhost:7687".into(),
            scheme: Neo4jScheme::Neo4j,
            auth: Neo4jAuth::Basic {
                username: "neo4j".into(),
                password: Secret::new("password"),
            },
        };
        assert!(Neo4jProber::new(&driver, Span::none()).probe(&config).await);
    }
}
