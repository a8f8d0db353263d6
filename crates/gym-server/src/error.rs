use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gym_core::error::GymError;

// ---------------------------------------------------------------------------
// Internal sentinel for primary-write timeouts
// ---------------------------------------------------------------------------

/// Carries an HTTP 504 through the `anyhow::Error` chain. The blocking write
/// may still land after the response is sent, so callers must re-read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TimeoutError(String);

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 403 for a request that carries no usable identity.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self(GymError::Unauthorized(msg.into()).into())
    }

    /// Construct a 504 Gateway Timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self(TimeoutError(msg.into()).into())
    }
}

/// HTTP status for a domain error.
pub fn status_for(err: &GymError) -> StatusCode {
    match err {
        GymError::Unauthorized(_) => StatusCode::FORBIDDEN,
        GymError::InvalidTrainer(_)
        | GymError::DateRequired
        | GymError::InvalidId(_)
        | GymError::InvalidPurchaseType(_)
        | GymError::InvalidRole(_)
        | GymError::InvalidChannel(_) => StatusCode::BAD_REQUEST,
        GymError::MeetingNotCompleted(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GymError::ClientNotFound(_)
        | GymError::UserNotFound(_)
        | GymError::SettingsNotFound(_) => StatusCode::NOT_FOUND,
        GymError::Conflict { .. } | GymError::ClientExists(_) | GymError::UserExists(_) => {
            StatusCode::CONFLICT
        }
        GymError::NotInitialized
        | GymError::Config(_)
        | GymError::Store(_)
        | GymError::Io(_)
        | GymError::Yaml(_)
        | GymError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(t) = self.0.downcast_ref::<TimeoutError>() {
            let body = serde_json::json!({ "error": t.0.clone(), "code": "timeout" });
            return (StatusCode::GATEWAY_TIMEOUT, axum::Json(body)).into_response();
        }

        let (status, code) = match self.0.downcast_ref::<GymError>() {
            Some(e) => (status_for(e), e.code()),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string(), "code": code });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn status_of(err: GymError) -> StatusCode {
        AppError(err.into()).into_response().status()
    }

    #[test]
    fn unauthorized_maps_to_403() {
        assert_eq!(
            status_of(GymError::Unauthorized("t2".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn invalid_trainer_maps_to_400() {
        assert_eq!(
            status_of(GymError::InvalidTrainer("o1".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn date_required_maps_to_400() {
        assert_eq!(status_of(GymError::DateRequired), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn meeting_not_completed_maps_to_422() {
        assert_eq!(
            status_of(GymError::MeetingNotCompleted("c1".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn client_not_found_maps_to_404() {
        assert_eq!(
            status_of(GymError::ClientNotFound("c1".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn missing_settings_map_to_404() {
        assert_eq!(
            status_of(GymError::SettingsNotFound("gym-a".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn version_conflict_maps_to_409() {
        let err = GymError::Conflict {
            id: "c1".into(),
            expected: 1,
            found: 2,
        };
        assert_eq!(status_of(err), StatusCode::CONFLICT);
    }

    #[test]
    fn store_failure_maps_to_500() {
        assert_eq!(
            status_of(GymError::Store("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let io_err = std::io::Error::other("disk full");
        assert_eq!(status_of(GymError::Io(io_err)), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_domain_error_maps_to_500() {
        let response = AppError(anyhow::anyhow!("something unexpected")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeout_constructor_maps_to_504() {
        let response = AppError::timeout("primary write exceeded 5s").into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(GymError::ClientNotFound("c1".into()).into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
