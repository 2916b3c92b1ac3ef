//! Users API handlers.
//!
//! ```text
//! GET /api/users/1
//! POST /api/users {"name":"Alice"}
//! DELETE /api/users/1
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Register the `/api/users` routes and their extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .service(get_user)
            .service(create_user)
            .service(delete_user),
    );
}

/// Request body for `POST /api/users`.
///
/// Omit `id` to create a user under a freshly assigned identifier; supply it
/// to overwrite (or create) the user stored under that identifier.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaveUserRequest {
    /// Identifier of the user to overwrite.
    #[schema(example = 1, minimum = 1)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name to store.
    #[schema(example = "Alice")]
    pub name: String,
}

impl TryFrom<SaveUserRequest> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: SaveUserRequest) -> Result<Self, Self::Error> {
        let draft = UserDraft::new(value.name);
        match value.id {
            Some(raw) => Ok(draft.with_id(UserId::new(raw)?)),
            None => Ok(draft),
        }
    }
}

/// User representation returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Stored name.
    #[schema(example = "Alice")]
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::NonPositiveId { value } => {
            Error::invalid_request(format!("user id must be positive, got {value}"))
                .with_details(json!({ "field": "id", "code": "non_positive_id" }))
        }
    }
}

fn parse_user_id(raw: i64) -> ApiResult<UserId> {
    UserId::new(raw).map_err(map_user_validation_error)
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.find_by_id(id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Create a user, or overwrite the one stored under the supplied `id`.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = SaveUserRequest,
    responses(
        (status = 200, description = "User persisted", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "saveUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<SaveUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let draft = UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users_command.save(draft).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user. Deleting an unknown identifier also succeeds.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 204, description = "User deleted or already absent"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    state.users_command.delete_by_id(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
