use crate::types::FollowupType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled or completed contact with a client.
///
/// Written once by the lifecycle engine; `outcome` is filled in later by
/// whoever resolves the follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followup {
    pub id: Uuid,
    pub client_id: String,
    pub tenant_id: String,
    /// `None` when the client had no assigned trainer at scheduling time.
    pub trainer_id: Option<String>,
    pub followup_type: FollowupType,
    pub scheduled_at: DateTime<Utc>,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Followup {
    pub fn new(
        client_id: impl Into<String>,
        tenant_id: impl Into<String>,
        trainer_id: Option<String>,
        followup_type: FollowupType,
        scheduled_at: DateTime<Utc>,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.into(),
            tenant_id: tenant_id.into(),
            trainer_id,
            followup_type,
            scheduled_at,
            notes: notes.into(),
            outcome: None,
            created_at: now,
        }
    }
}
