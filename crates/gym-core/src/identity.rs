use crate::error::{GymError, Result};
use crate::store::RecordStore;
use crate::types::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl StaffUser {
    pub fn new(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            name: name.into(),
            role,
            created_at: now,
        }
    }

    pub fn as_actor(&self) -> ActingUser {
        ActingUser {
            id: self.id.clone(),
            role: self.role,
            tenant_id: Some(self.tenant_id.clone()),
        }
    }
}

/// Who is calling a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl ActingUser {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            tenant_id: None,
        }
    }
}

/// Resolve the acting user for a session identified by `user_id`.
///
/// Unknown ids are rejected as `Unauthorized`, not `NotFound`, so callers
/// cannot probe for user existence.
pub fn resolve_actor(store: &dyn RecordStore, user_id: &str) -> Result<ActingUser> {
    match store.load_user(user_id) {
        Ok(user) => Ok(user.as_actor()),
        Err(GymError::UserNotFound(_)) | Err(GymError::InvalidId(_)) => Err(
            GymError::Unauthorized(format!("unknown user '{user_id}'")),
        ),
        Err(e) => Err(e),
    }
}
