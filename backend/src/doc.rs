//! OpenAPI document for the users API.
//!
//! Domain errors are described through the mirrors in
//! [`crate::inbound::http::schemas`]. Debug builds serve the document through
//! Swagger UI.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{SaveUserRequest, UserResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "Create, read and delete user records, plus health probes."
    ),
    servers((url = "/", description = "Same origin as the API")),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SaveUserRequest, UserResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
