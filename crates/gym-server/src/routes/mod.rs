pub mod clients;
pub mod meetings;
pub mod outcomes;

use crate::error::AppError;
use axum::http::HeaderMap;

/// Header naming the acting staff user.
pub const USER_HEADER: &str = "x-user-id";

/// Read the acting user id from the request headers.
pub fn acting_user(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized(format!("missing {USER_HEADER} header")))
}

