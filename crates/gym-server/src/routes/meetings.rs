use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};

use super::acting_user;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MeetingBody {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// PUT /api/clients/:id/first-meeting: set or move the first meeting date.
pub async fn set_meeting_date(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<MeetingBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let applied = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.set_meeting_date(&id, body.date, &actor)
        })
        .await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "client": applied.value,
        "warnings": applied.warnings,
    })))
}

/// POST /api/clients/:id/first-meeting/complete: mark the first meeting held.
pub async fn complete_meeting(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<MeetingBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let applied = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.mark_completed(&id, body.date, &actor)
        })
        .await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "client": applied.value,
        "warnings": applied.warnings,
    })))
}
