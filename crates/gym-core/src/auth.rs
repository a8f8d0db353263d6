//! Authorization gate for client mutations.

use crate::client::Client;
use crate::error::{GymError, Result};
use crate::identity::ActingUser;
use crate::types::Role;

/// How the acting user relates to the client being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    AssignedTrainer,
    Unrelated,
    /// The actor is scoped to a different tenant than the client.
    OtherTenant,
}

impl Relation {
    pub fn of(actor: &ActingUser, client: &Client) -> Self {
        if actor
            .tenant_id
            .as_deref()
            .is_some_and(|t| t != client.tenant_id)
        {
            Relation::OtherTenant
        } else if client.is_assigned_to(&actor.id) {
            Relation::AssignedTrainer
        } else {
            Relation::Unrelated
        }
    }
}

pub fn can_edit_role(role: Role, relation: Relation) -> bool {
    if relation == Relation::OtherTenant {
        return false;
    }
    match role {
        Role::Admin | Role::Operator => true,
        Role::Trainer => relation == Relation::AssignedTrainer,
        Role::Member => false,
    }
}

pub fn can_edit(actor: &ActingUser, client: &Client) -> bool {
    can_edit_role(actor.role, Relation::of(actor, client))
}

/// Fail with `Unauthorized` unless `actor` may mutate `client`.
pub fn require_edit(actor: &ActingUser, client: &Client) -> Result<()> {
    if can_edit(actor, client) {
        tracing::debug!(actor = %actor.id, client = %client.id, "edit allowed");
        return Ok(());
    }
    Err(GymError::Unauthorized(format!(
        "{} '{}' may not edit client '{}'",
        actor.role, actor.id, client.id
    )))
}

/// Fail with `Unauthorized` unless `actor` holds a staff role.
pub fn require_staff(actor: &ActingUser) -> Result<()> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(GymError::Unauthorized(format!(
            "{} '{}' is not a staff member",
            actor.role, actor.id
        )))
    }
}

/// Staff scoped to the client's tenant may read it.
pub fn require_view(actor: &ActingUser, client: &Client) -> Result<()> {
    require_staff(actor)?;
    if Relation::of(actor, client) == Relation::OtherTenant {
        return Err(GymError::Unauthorized(format!(
            "'{}' may not view client '{}'",
            actor.id, client.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn client_assigned_to(trainer: Option<&str>) -> Client {
        let mut c = Client::new("c1", "gym-a", "Dana", Utc::now());
        c.assigned_to = trainer.map(str::to_string);
        c
    }

    #[test]
    fn admins_and_operators_always_edit() {
        let client = client_assigned_to(None);
        assert!(can_edit(&ActingUser::new("a1", Role::Admin), &client));
        assert!(can_edit(&ActingUser::new("o1", Role::Operator), &client));
    }

    #[test]
    fn trainer_edits_only_own_clients() {
        let client = client_assigned_to(Some("t1"));
        assert!(can_edit(&ActingUser::new("t1", Role::Trainer), &client));
        assert!(!can_edit(&ActingUser::new("t2", Role::Trainer), &client));
    }

    #[test]
    fn trainer_cannot_edit_unassigned_client() {
        let client = client_assigned_to(None);
        assert!(!can_edit(&ActingUser::new("t1", Role::Trainer), &client));
    }

    #[test]
    fn other_tenant_staff_cannot_edit() {
        let client = client_assigned_to(Some("t1"));
        let mut admin = ActingUser::new("a1", Role::Admin);
        admin.tenant_id = Some("gym-b".to_string());
        assert!(!can_edit(&admin, &client));

        admin.tenant_id = Some("gym-a".to_string());
        assert!(can_edit(&admin, &client));
    }

    #[test]
    fn members_never_edit() {
        let client = client_assigned_to(Some("m1"));
        assert!(!can_edit(&ActingUser::new("m1", Role::Member), &client));
    }

    #[test]
    fn require_edit_surfaces_unauthorized() {
        let client = client_assigned_to(Some("t1"));
        let err = require_edit(&ActingUser::new("t2", Role::Trainer), &client).unwrap_err();
        assert_eq!(err.code(), "unauthorized");
    }

    #[test]
    fn any_staff_in_tenant_may_view() {
        let client = client_assigned_to(Some("t1"));
        assert!(require_view(&ActingUser::new("t2", Role::Trainer), &client).is_ok());
        assert!(require_view(&ActingUser::new("m1", Role::Member), &client).is_err());
    }

    #[test]
    fn require_staff_rejects_members() {
        assert!(require_staff(&ActingUser::new("t1", Role::Trainer)).is_ok());
        assert!(require_staff(&ActingUser::new("m1", Role::Member)).is_err());
    }
}
