use async_trait::async_trait;
use database::DatabaseResult;
use database::mongodb::{self, Client, MongoConfig, MongoTarget, mask_userinfo};
use tracing::{Instrument, Span, debug, info};

use super::{MongoDriver, ProbeSession, run_probe};
use crate::models::{MongoAuth, MongoConnectionConfig};

/// Checks whether a MongoDB deployment accepts the submitted credentials.
pub struct MongoProber<'a, D: MongoDriver + ?Sized> {
    driver: &'a D,
    span: Span,
}

impl<'a, D: MongoDriver + ?Sized> MongoProber<'a, D> {
    /// `span` scopes every log record of this probe.
    pub fn new(driver: &'a D, span: Span) -> Self {
        Self { driver, span }
    }

    /// `true` when a client could connect and authenticate.
    pub async fn probe(&self, config: &MongoConnectionConfig) -> bool {
        async {
            info!(
                uri = %mask_userinfo(&config.uri),
                scheme = %config.scheme,
                mechanism = %config.auth.mechanism(),
                username = config.auth.username(),
                "Checking MongoDB connection"
            );

            match &config.auth {
                MongoAuth::Scram { .. } => debug!("Using SCRAM authentication"),
                MongoAuth::None => debug!("Using no authentication"),
            }

            let target = config.target();
            debug!(target = %target, "Attempting to connect to MongoDB");

            run_probe(self.driver.open(&target), "MongoDB").await
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Opens real clients with the `mongodb` driver.
#[derive(Debug, Clone, Default)]
pub struct LiveMongoDriver {
    config: MongoConfig,
}

impl LiveMongoDriver {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MongoDriver for LiveMongoDriver {
    async fn open(&self, target: &MongoTarget) -> DatabaseResult<Box<dyn ProbeSession>> {
        let client = mongodb::open_client(target, &self.config).await?;
        Ok(Box::new(MongoSession { client }))
    }
}

struct MongoSession {
    client: Client,
}

#[async_trait]
impl ProbeSession for MongoSession {
    async fn handshake(&mut self) -> DatabaseResult<()> {
        mongodb::ping(&self.client).await
    }

    async fn close(self: Box<Self>) {
        mongodb::close(self.client).await;
    }
}
