use axum::extract::{Path, State};
use axum::response::Response;
use gtd_core::dto::ProjectDto;
use gtd_core::model::EntityId;

use super::respond;
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(State(app): State<AppState>) -> Result<Response, AppError> {
    Ok(respond(app.services.projects.get_all().await?))
}

/// POST /api/projects: create, or rename when the body carries an id.
pub async fn save_project(
    State(app): State<AppState>,
    ApiJson(dto): ApiJson<ProjectDto>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.projects.create_or_update(dto).await?))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.projects.get(id).await?))
}

/// DELETE /api/projects/:id: answers with the number of actions detached.
pub async fn delete_project(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    let result = app.services.projects.delete(id).await?;
    Ok(respond(result.map(|detached| serde_json::json!({ "detached": detached }))))
}

/// GET /api/projects/:id/actions
pub async fn list_actions(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.actions.get_in_project(id).await?))
}
