use super::{Applied, LifecycleEngine};
use crate::auth;
use crate::client::{Client, ClientPatch};
use crate::effects::SideEffects;
use crate::error::{GymError, Result};
use crate::identity::ActingUser;
use crate::types::ActivityAction;
use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

impl LifecycleEngine {
    /// Schedule (or reschedule) the client's first meeting.
    pub fn set_meeting_date(
        &self,
        client_id: &str,
        date: Option<DateTime<Utc>>,
        actor: &ActingUser,
    ) -> Result<Applied<Client>> {
        let client = self.store.load_client(client_id)?;
        auth::require_edit(actor, &client)?;
        let date = date.ok_or(GymError::DateRequired)?;

        let now = self.now();
        let patch = ClientPatch {
            first_meeting_date: Some(date),
            ..Default::default()
        };
        let updated = self.store.update_client(client_id, &patch, now)?;
        tracing::info!(client = %updated.id, date = %date, "first meeting date set");

        let mut effects = SideEffects::new();
        self.log_activity(
            &mut effects,
            ActivityAction::FirstMeetingDateUpdated,
            &updated,
            actor,
            &format!("First meeting scheduled for {}", date.format(DATE_FORMAT)),
            now,
        );
        Ok(Applied::new(updated, effects))
    }

    /// Mark the first meeting as held.
    ///
    /// A `date` passed here is stamped as the meeting date in the same write.
    /// Completing an already-completed meeting is a no-op success.
    pub fn mark_completed(
        &self,
        client_id: &str,
        date: Option<DateTime<Utc>>,
        actor: &ActingUser,
    ) -> Result<Applied<Client>> {
        let client = self.store.load_client(client_id)?;
        auth::require_edit(actor, &client)?;

        if client.first_meeting_completed {
            tracing::debug!(client = %client.id, "first meeting already completed");
            return Ok(Applied::clean(client));
        }

        let meeting_date = date
            .or(client.first_meeting_date)
            .ok_or(GymError::DateRequired)?;

        let now = self.now();
        let patch = ClientPatch {
            first_meeting_completed: Some(true),
            first_meeting_date: date,
            ..Default::default()
        };
        let updated = self.store.update_client(client_id, &patch, now)?;
        tracing::info!(client = %updated.id, "first meeting completed");

        let mut effects = SideEffects::new();
        self.log_activity(
            &mut effects,
            ActivityAction::FirstMeetingCompleted,
            &updated,
            actor,
            &format!("First meeting held on {}", meeting_date.format(DATE_FORMAT)),
            now,
        );
        Ok(Applied::new(updated, effects))
    }
}
