use axum::extract::{Path, State};
use axum::response::Response;
use gtd_core::dto::ActionListDto;
use gtd_core::model::EntityId;

use super::respond;
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

/// GET /api/lists
pub async fn list_lists(State(app): State<AppState>) -> Result<Response, AppError> {
    Ok(respond(app.services.lists.get_all().await?))
}

/// POST /api/lists: create, or rename when the body carries an id.
pub async fn save_list(
    State(app): State<AppState>,
    ApiJson(dto): ApiJson<ActionListDto>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.lists.create_or_update(dto).await?))
}

/// GET /api/lists/:id
pub async fn get_list(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.lists.get(id).await?))
}

/// DELETE /api/lists/:id: answers with the number of actions detached.
pub async fn delete_list(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    let result = app.services.lists.delete(id).await?;
    Ok(respond(result.map(|detached| serde_json::json!({ "detached": detached }))))
}

/// GET /api/lists/:id/actions
pub async fn list_actions(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.actions.get_in_list(id).await?))
}
