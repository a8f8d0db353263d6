use super::{Applied, LifecycleEngine};
use crate::auth;
use crate::client::{Client, ClientPatch};
use crate::effects::SideEffects;
use crate::error::{GymError, Result};
use crate::followup::Followup;
use crate::identity::{ActingUser, StaffUser};
use crate::notify::Notification;
use crate::types::{ActivityAction, FollowupType, Role};

impl LifecycleEngine {
    /// (Re)assign `client_id` to `trainer_id`.
    ///
    /// Any staff member may reassign any client in their tenant; the
    /// assigned-trainer gate does not apply here.
    pub fn assign_trainer(
        &self,
        client_id: &str,
        trainer_id: &str,
        notes: Option<&str>,
        actor: &ActingUser,
    ) -> Result<Applied<Client>> {
        auth::require_staff(actor)?;
        let client = self.store.load_client(client_id)?;
        if actor
            .tenant_id
            .as_deref()
            .is_some_and(|t| t != client.tenant_id)
        {
            return Err(GymError::Unauthorized(format!(
                "'{}' may not reassign clients of another tenant",
                actor.id
            )));
        }
        let trainer = self.resolve_trainer(trainer_id, &client)?;

        let now = self.now();
        let patch = ClientPatch {
            assigned_to: Some(trainer.id.clone()),
            ..Default::default()
        };
        let updated = self.store.update_client(client_id, &patch, now)?;
        tracing::info!(
            client = %updated.id,
            trainer = %trainer.id,
            actor = %actor.id,
            "trainer assigned"
        );

        let note = match notes.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Assigned to {}", trainer.name),
        };

        let mut effects = SideEffects::new();
        self.log_activity(
            &mut effects,
            ActivityAction::TrainerAssigned,
            &updated,
            actor,
            &note,
            now,
        );
        effects.absorb(self.schedule_followup(Followup::new(
            &updated.id,
            &updated.tenant_id,
            Some(trainer.id.clone()),
            FollowupType::InApp,
            now,
            note,
            now,
        )));
        effects.absorb(self.dispatch(Notification {
            user_id: trainer.id.clone(),
            title: "New client assigned".to_string(),
            message: format!("{} ({}) has been assigned to you", updated.name, updated.id),
            channel: self.channel,
        }));

        Ok(Applied::new(updated, effects))
    }

    fn resolve_trainer(&self, trainer_id: &str, client: &Client) -> Result<StaffUser> {
        let user = match self.store.load_user(trainer_id) {
            Ok(u) => u,
            Err(GymError::UserNotFound(_)) | Err(GymError::InvalidId(_)) => {
                return Err(GymError::InvalidTrainer(format!(
                    "'{trainer_id}' does not exist"
                )))
            }
            Err(e) => return Err(e),
        };
        if user.role != Role::Trainer {
            return Err(GymError::InvalidTrainer(format!(
                "'{}' is a {}, not a trainer",
                user.id, user.role
            )));
        }
        if user.tenant_id != client.tenant_id {
            return Err(GymError::InvalidTrainer(format!(
                "'{}' belongs to another tenant",
                user.id
            )));
        }
        Ok(user)
    }
}
