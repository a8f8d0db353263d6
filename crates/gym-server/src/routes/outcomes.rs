use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use gym_core::types::PurchaseType;

use super::acting_user;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct OutcomeBody {
    pub purchase_type: PurchaseType,
    #[serde(default)]
    pub notes: Option<String>,
    /// Optimistic concurrency check against `Client::version`.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// POST /api/clients/:id/outcome: record the first-meeting purchase outcome.
pub async fn record_outcome(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<OutcomeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = acting_user(&headers)?;
    let applied = app
        .run(move |engine| {
            let actor = engine.resolve_actor(&user)?;
            engine.record_outcome(
                &id,
                body.purchase_type,
                body.notes.as_deref(),
                body.expected_version,
                &actor,
            )
        })
        .await?;
    let record = applied.value;
    Ok(Json(serde_json::json!({
        "ok": true,
        "client": record.client,
        "followup": record.followup,
        "require_default_template_assignment": record.require_default_template_assignment,
        "warnings": applied.warnings,
    })))
}
