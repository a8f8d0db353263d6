use super::{Applied, LifecycleEngine};
use crate::auth;
use crate::client::{Client, ClientPatch};
use crate::effects::SideEffects;
use crate::error::{GymError, Result};
use crate::followup::Followup;
use crate::identity::ActingUser;
use crate::types::{ActivityAction, FollowupType, PurchaseType};
use serde::Serialize;

/// Result of recording a purchase outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRecord {
    pub client: Client,
    /// Set only for `PurchaseType::None` when scheduling succeeded.
    pub followup: Option<Followup>,
    /// Tenant asks for a default workout template on conversion. Advisory.
    pub require_default_template_assignment: bool,
}

impl LifecycleEngine {
    /// Record the commercial outcome of the first meeting.
    ///
    /// Re-recording overwrites the previous outcome and recomputes the
    /// confirmation date. Each `none` outcome schedules its own follow-up.
    pub fn record_outcome(
        &self,
        client_id: &str,
        purchase: PurchaseType,
        notes: Option<&str>,
        expected_version: Option<u64>,
        actor: &ActingUser,
    ) -> Result<Applied<OutcomeRecord>> {
        let client = self.store.load_client(client_id)?;
        auth::require_edit(actor, &client)?;
        if !client.first_meeting_completed {
            return Err(GymError::MeetingNotCompleted(client.id));
        }

        let settings = self.settings.resolve(&client.tenant_id)?;
        let now = self.now();
        let notes = notes.map(str::trim).filter(|n| !n.is_empty());
        let confirmation_due = settings.confirmation_due(purchase, now)?;
        let followup_at = match purchase {
            PurchaseType::None => Some(settings.first_followup_at(now)?),
            _ => None,
        };

        let patch = ClientPatch {
            purchase_type: Some(purchase),
            internal_notes: notes.map(str::to_string),
            next_confirmation_due: Some(confirmation_due),
            expected_version,
            ..Default::default()
        };
        let updated = self.store.update_client(client_id, &patch, now)?;
        tracing::info!(client = %updated.id, outcome = %purchase, "purchase outcome recorded");

        let mut effects = SideEffects::new();
        let followup = followup_at.and_then(|at| {
            effects.absorb(self.schedule_followup(Followup::new(
                &updated.id,
                &updated.tenant_id,
                updated.assigned_to.clone(),
                FollowupType::PostFirstMeeting,
                at,
                notes.unwrap_or(&self.followup_note),
                now,
            )))
        });

        let summary = match notes {
            Some(n) => format!("Purchase outcome: {}. {n}", purchase.label()),
            None => format!("Purchase outcome: {}", purchase.label()),
        };
        self.log_activity(
            &mut effects,
            ActivityAction::PurchaseOutcomeRecorded,
            &updated,
            actor,
            &summary,
            now,
        );

        Ok(Applied::new(
            OutcomeRecord {
                client: updated,
                followup,
                require_default_template_assignment: settings.require_default_template_assignment,
            },
            effects,
        ))
    }
}
