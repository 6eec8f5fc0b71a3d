use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, FieldViolation};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InstanceResult;
use crate::models::{
    AuthParameters, CheckConnectionRequest, ConnectionOptions, ConnectionStatus,
    MongoAuthConfiguration, MongoMechanism, MongoOptions, MongoScheme, Neo4jAuthConfiguration,
    Neo4jAuthType, Neo4jOptions, Neo4jScheme, OptionEntry,
};
use crate::probe::{MongoDriver, Neo4jDriver};
use crate::service::ConnectionService;

/// OpenAPI documentation for Instance API
#[derive(OpenApi)]
#[openapi(
    paths(check_connection, list_options),
    components(schemas(
        CheckConnectionRequest,
        Neo4jAuthConfiguration,
        MongoAuthConfiguration,
        AuthParameters,
        Neo4jScheme,
        Neo4jAuthType,
        MongoScheme,
        MongoMechanism,
        ConnectionStatus,
        ConnectionOptions,
        Neo4jOptions,
        MongoOptions,
        OptionEntry,
        ErrorResponse,
        FieldViolation,
    )),
    tags(
        (name = "Instance", description = "Instance connection validation (MongoDB + Neo4j)")
    )
)]
pub struct ApiDoc;

/// Create the instance router with all HTTP endpoints
pub fn router<M, N>(service: ConnectionService<M, N>) -> Router
where
    M: MongoDriver + 'static,
    N: Neo4jDriver + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/check-connection", post(check_connection))
        .route("/options", get(list_options))
        .with_state(shared_service)
}

/// Check that both databases of an instance are reachable
#[utoipa::path(
    post,
    path = "/check-connection",
    tag = "Instance",
    request_body = CheckConnectionRequest,
    responses(
        (status = 204, description = "Both connections were established"),
        (status = 400, description = "At least one connection failed (`data` holds the per-database result), or the body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "The configuration is incomplete or invalid; `data` lists the violations", body = ErrorResponse)
    )
)]
async fn check_connection<M: MongoDriver, N: Neo4jDriver>(
    State(service): State<Arc<ConnectionService<M, N>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> InstanceResult<StatusCode> {
    // Field types are checked by the validator so they land in the 422 report
    let Json(body) = payload?;
    let request = CheckConnectionRequest::from_json(body)?;
    service.check_connection(request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the schemes and auth methods accepted by check-connection
#[utoipa::path(
    get,
    path = "/options",
    tag = "Instance",
    responses(
        (status = 200, description = "Connection option catalog", body = ConnectionOptions)
    )
)]
async fn list_options<M: MongoDriver, N: Neo4jDriver>(
    State(service): State<Arc<ConnectionService<M, N>>>,
) -> Json<ConnectionOptions> {
    Json(service.options())
}
