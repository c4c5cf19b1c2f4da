//! Bulk user import handler.

use axum::{extract::State, response::Json, routing::post, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::ImportBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ImportSummary, ImportUserInput};
use crate::errors::AppResult;

/// Bulk import request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportUsersRequest {
    /// Users to create or update
    pub users: Vec<ImportUserInput>,
}

/// Create import routes
pub fn import_routes() -> Router<AppState> {
    Router::new().route("/import-users", post(import_users))
}

/// Import users in bulk (admin only)
///
/// The caller is checked before the body is decoded. Each user is then
/// processed on its own; failures are listed in `errors` and do not stop
/// the remaining users.
#[utoipa::path(
    post,
    path = "/functions/v1/import-users",
    tag = "Import",
    request_body = ImportUsersRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Import processed", body = ImportSummary),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 413, description = "Request body over the size limit")
    )
)]
pub async fn import_users(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    body: ImportBody,
) -> AppResult<Json<ImportSummary>> {
    state.import_service.authorize(current_user.id).await?;

    let payload: ImportUsersRequest = body.parse()?;
    tracing::info!(caller = %current_user.email, "Received import of {} users", payload.users.len());

    let summary = state
        .import_service
        .import_users(current_user.id, payload.users)
        .await?;

    Ok(Json(summary))
}
