use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use super::acting_user;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/clients/:id: one client record.
pub async fn get_client(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let client = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.get_client(&id, &actor)
        })
        .await?;
    Ok(Json(serde_json::to_value(client)?))
}

/// GET /api/clients/:id/followups: follow-ups scheduled for a client.
pub async fn list_followups(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let followups = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.list_followups(&id, &actor)
        })
        .await?;
    Ok(Json(serde_json::to_value(followups)?))
}

/// GET /api/clients/:id/activity: audit trail for a client.
pub async fn list_activity(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let entries = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.list_activity(&id, &actor)
        })
        .await?;
    Ok(Json(serde_json::to_value(entries)?))
}

#[derive(serde::Deserialize)]
pub struct AssignBody {
    pub trainer_id: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/clients/:id/assign: assign a trainer to a client.
pub async fn assign_trainer(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AssignBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let applied = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.assign_trainer(&id, &body.trainer_id, body.notes.as_deref(), &actor)
        })
        .await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "client": applied.value,
        "warnings": applied.warnings,
    })))
}
