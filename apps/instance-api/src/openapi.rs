//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Instance API",
        version = "0.1.0",
        description = "Validates instance connection settings against MongoDB and Neo4j",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/instance", api = domain_instances::ApiDoc)
    ),
    tags(
        (name = "Instance", description = "Instance connection validation (MongoDB + Neo4j)")
    )
)]
pub struct ApiDoc;
