use neo4j::driver::Driver;
use std::time::Instant;
use tokio::task;
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Open a connection, authenticate and run the server-info round trip.
///
/// The driver API is blocking, so the work runs on tokio's blocking pool.
/// The driver is handed back alongside the outcome so the caller can still
/// release it after a failure.
pub async fn verify_connectivity(driver: Driver) -> (Option<Driver>, DatabaseResult<()>) {
    let start = Instant::now();
    let joined = task::spawn_blocking(move || {
        let result = driver.verify_connectivity().map_err(DatabaseError::from);
        (driver, result)
    })
    .await;

    match joined {
        Ok((driver, result)) => {
            if result.is_ok() {
                debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Neo4j connectivity verified"
                );
            }
            (Some(driver), result)
        }
        // The driver was dropped while the blocking task unwound.
        Err(e) => (
            None,
            Err(DatabaseError::HealthCheckFailed(format!(
                "Neo4j connectivity task failed: {e}"
            ))),
        ),
    }
}

/// Release the driver and its connection pool.
///
/// Dropping a driver closes its sockets, which may block, so the drop
/// happens on the blocking pool.
pub async fn close(driver: Driver) {
    if let Err(e) = task::spawn_blocking(move || drop(driver)).await {
        debug!(error = %e, "Neo4j driver shutdown task failed");
    }
}
