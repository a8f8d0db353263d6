//! Record intake: seeding clients, staff and tenant settings.
//!
//! These are plain writes, not lifecycle operations. Nothing here logs
//! activity or notifies anyone.

use crate::client::Client;
use crate::error::{GymError, Result};
use crate::identity::{ActingUser, StaffUser};
use crate::settings::TenantSettings;
use crate::store::RecordStore;
use crate::types::Role;
use chrono::{DateTime, Utc};

/// Contact details captured at intake.
#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub fn create_client(
    store: &dyn RecordStore,
    id: &str,
    tenant_id: &str,
    name: &str,
    contact: Contact,
    now: DateTime<Utc>,
) -> Result<Client> {
    let mut client = Client::new(id, tenant_id, name.trim(), now);
    client.email = contact.email;
    client.phone = contact.phone;
    store.insert_client(&client)?;
    tracing::info!(client = %client.id, tenant = %client.tenant_id, "client created");
    Ok(client)
}

pub fn add_staff(
    store: &dyn RecordStore,
    id: &str,
    tenant_id: &str,
    name: &str,
    role: Role,
    now: DateTime<Utc>,
) -> Result<StaffUser> {
    let user = StaffUser::new(id, tenant_id, name.trim(), role, now);
    store.insert_user(&user)?;
    tracing::info!(user = %user.id, role = %user.role, "staff user added");
    Ok(user)
}

/// Replace a tenant's settings. Only admins and operators of that tenant
/// may write them, and every day window must be within
/// [`crate::settings::MAX_WINDOW_DAYS`].
pub fn set_settings(
    store: &dyn RecordStore,
    settings: &TenantSettings,
    actor: &ActingUser,
) -> Result<()> {
    let same_tenant = actor.tenant_id.as_deref() == Some(settings.tenant_id.as_str());
    if !matches!(actor.role, Role::Admin | Role::Operator) || !same_tenant {
        return Err(GymError::Unauthorized(format!(
            "'{}' may not change settings for tenant '{}'",
            actor.id, settings.tenant_id
        )));
    }
    settings.validate()?;
    store.save_settings(settings)?;
    tracing::info!(tenant = %settings.tenant_id, actor = %actor.id, "tenant settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn create_client_persists_contact() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        let contact = Contact {
            email: Some("dana@example.com".into()),
            phone: None,
        };
        create_client(&store, "c1", "gym-a", " Dana ", contact, now()).unwrap();

        let loaded = store.load_client("c1").unwrap();
        assert_eq!(loaded.name, "Dana");
        assert_eq!(loaded.email.as_deref(), Some("dana@example.com"));
        assert!(loaded.assigned_to.is_none());
    }

    #[test]
    fn duplicate_client_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        create_client(&store, "c1", "gym-a", "Dana", Contact::default(), now()).unwrap();
        let err =
            create_client(&store, "c1", "gym-a", "Dana", Contact::default(), now()).unwrap_err();
        assert!(matches!(err, GymError::ClientExists(_)));
    }

    #[test]
    fn trainers_cannot_write_settings() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        let mut trainer = ActingUser::new("t1", Role::Trainer);
        trainer.tenant_id = Some("gym-a".into());

        let err = set_settings(&store, &TenantSettings::new("gym-a"), &trainer).unwrap_err();
        assert!(matches!(err, GymError::Unauthorized(_)));
        assert!(store.load_settings("gym-a").is_err());
    }

    #[test]
    fn operator_writes_own_tenant_only() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        let operator = add_staff(&store, "o1", "gym-a", "Olive", Role::Operator, now())
            .unwrap()
            .as_actor();

        let mut settings = TenantSettings::new("gym-a");
        settings.days_to_first_followup = 5;
        set_settings(&store, &settings, &operator).unwrap();
        assert_eq!(store.load_settings("gym-a").unwrap().days_to_first_followup, 5);

        let err = set_settings(&store, &TenantSettings::new("gym-b"), &operator).unwrap_err();
        assert!(matches!(err, GymError::Unauthorized(_)));
    }

    #[test]
    fn out_of_range_windows_not_saved() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        let admin = add_staff(&store, "a1", "gym-a", "Al", Role::Admin, now())
            .unwrap()
            .as_actor();

        let mut settings = TenantSettings::new("gym-a");
        settings.days_to_first_followup = u32::MAX;
        let err = set_settings(&store, &settings, &admin).unwrap_err();
        assert!(matches!(err, GymError::Config(_)));
        assert!(store.load_settings("gym-a").is_err());
    }
}
