use crate::effects::{SideEffectWarning, WarningKind};
use crate::store::RecordStore;
use crate::types::{ActivityAction, TargetType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ActivityLogEntry
// ---------------------------------------------------------------------------

/// Append-only audit record. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub action: ActivityAction,
    pub target_id: String,
    pub target_type: TargetType,
    pub user_id: String,
    pub tenant_id: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// ActivityLogger
// ---------------------------------------------------------------------------

pub struct ActivityLogger {
    store: Arc<dyn RecordStore>,
}

impl ActivityLogger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Append an audit entry.
    ///
    /// Never fails the caller's primary path: a missing tenant skips the
    /// write and store errors come back as a warning.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        action: ActivityAction,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
        tenant_id: Option<&str>,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<ActivityLogEntry, SideEffectWarning> {
        let tenant_id = match tenant_id {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(SideEffectWarning::new(
                    WarningKind::ActivityLog,
                    format!("no tenant for {action} on {target_type} '{target_id}'; entry skipped"),
                ))
            }
        };

        let entry = ActivityLogEntry {
            id: Uuid::new_v4(),
            action,
            target_id: target_id.to_string(),
            target_type,
            user_id: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
            notes: notes.into(),
            created_at: now,
        };

        self.store.insert_activity(&entry).map_err(|e| {
            SideEffectWarning::new(
                WarningKind::ActivityLog,
                format!("failed to record {action}: {e}"),
            )
        })?;
        Ok(entry)
    }
}
