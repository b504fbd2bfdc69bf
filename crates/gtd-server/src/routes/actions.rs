use axum::extract::{Path, State};
use axum::response::Response;
use gtd_core::dto::ActionDto;
use gtd_core::model::EntityId;

use super::{respond, respond_empty};
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MoveBody {
    pub list_id: EntityId,
}

#[derive(serde::Deserialize)]
pub struct AssignBody {
    pub project_id: EntityId,
}

/// GET /api/actions: every action.
pub async fn list_actions(State(app): State<AppState>) -> Result<Response, AppError> {
    Ok(respond(app.services.actions.get_all().await?))
}

/// POST /api/actions: create, or update when the body carries an id.
pub async fn save_action(
    State(app): State<AppState>,
    ApiJson(dto): ApiJson<ActionDto>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.actions.create_or_update(dto).await?))
}

/// GET /api/actions/:id
pub async fn get_action(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond(app.services.actions.get_action(id).await?))
}

/// PUT /api/actions/:id: update; the path id wins over any id in the body.
pub async fn update_action(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
    ApiJson(mut dto): ApiJson<ActionDto>,
) -> Result<Response, AppError> {
    dto.id = Some(id);
    Ok(respond(app.services.actions.create_or_update(dto).await?))
}

/// DELETE /api/actions/:id
pub async fn delete_action(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    Ok(respond_empty(app.services.actions.delete(id).await?))
}

/// POST /api/actions/:id/complete: mark done now.
pub async fn complete_action(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    let result = app.services.actions.complete(id, chrono::Utc::now()).await?;
    Ok(respond(result))
}

/// PUT /api/actions/:id/list
pub async fn move_to_list(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
    ApiJson(body): ApiJson<MoveBody>,
) -> Result<Response, AppError> {
    Ok(respond_empty(
        app.services.actions.move_to_list(id, body.list_id).await?,
    ))
}

/// PUT /api/actions/:id/project
pub async fn assign_to_project(
    State(app): State<AppState>,
    Path(id): Path<EntityId>,
    ApiJson(body): ApiJson<AssignBody>,
) -> Result<Response, AppError> {
    Ok(respond_empty(
        app.services
            .actions
            .assign_to_project(id, body.project_id)
            .await?,
    ))
}
