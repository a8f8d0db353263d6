//! Durable persistence for clients, staff, tenant settings, follow-ups and
//! the activity log.
//!
//! Layout under the data root:
//!   .gym/clients/<id>.yaml      one manifest per client
//!   .gym/users/<id>.yaml        one record per user
//!   .gym/settings/<tenant>.yaml one settings row per tenant
//!   .gym/followups.yaml         append-only list
//!   .gym/activity.yaml          append-only list

use crate::activity::ActivityLogEntry;
use crate::client::{Client, ClientPatch};
use crate::error::{GymError, Result};
use crate::followup::Followup;
use crate::identity::StaffUser;
use crate::io;
use crate::paths;
use crate::settings::TenantSettings;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

pub trait RecordStore: Send + Sync {
    fn insert_client(&self, client: &Client) -> Result<()>;
    fn load_client(&self, id: &str) -> Result<Client>;
    /// Apply a partial update atomically and return the stored result.
    fn update_client(&self, id: &str, patch: &ClientPatch, now: DateTime<Utc>) -> Result<Client>;

    fn insert_user(&self, user: &StaffUser) -> Result<()>;
    fn load_user(&self, id: &str) -> Result<StaffUser>;
    fn list_users(&self) -> Result<Vec<StaffUser>>;

    fn load_settings(&self, tenant_id: &str) -> Result<TenantSettings>;
    fn save_settings(&self, settings: &TenantSettings) -> Result<()>;

    fn insert_followup(&self, followup: &Followup) -> Result<()>;
    fn list_followups(&self, client_id: &str) -> Result<Vec<Followup>>;

    fn insert_activity(&self, entry: &ActivityLogEntry) -> Result<()>;
    fn list_activity(&self, target_id: &str) -> Result<Vec<ActivityLogEntry>>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// YAML-on-disk record store.
///
/// Writes go through a single in-process lock so read-modify-write cycles
/// on a client manifest or on the append-only lists are atomic with respect
/// to other callers sharing this store.
pub struct FileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open an initialized data root.
    pub fn open(root: &Path) -> Result<Self> {
        if !paths::gym_dir(root).is_dir() {
            return Err(GymError::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Create the directory tree if needed, then open.
    pub fn init(root: &Path) -> Result<Self> {
        for dir in [
            paths::GYM_DIR,
            paths::CLIENTS_DIR,
            paths::USERS_DIR,
            paths::SETTINGS_DIR,
        ] {
            io::ensure_dir(&root.join(dir))?;
        }
        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| GymError::Store("record store lock poisoned".to_string()))
    }

    fn read_client(&self, id: &str) -> Result<Client> {
        paths::validate_id(id)?;
        let path = paths::client_path(&self.root, id);
        if !path.exists() {
            return Err(GymError::ClientNotFound(id.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&data)?)
    }
}

impl RecordStore for FileStore {
    fn insert_client(&self, client: &Client) -> Result<()> {
        paths::validate_id(&client.id)?;
        paths::validate_id(&client.tenant_id)?;
        let _guard = self.guard()?;
        let path = paths::client_path(&self.root, &client.id);
        if path.exists() {
            return Err(GymError::ClientExists(client.id.clone()));
        }
        io::write_yaml(&path, client)
    }

    fn load_client(&self, id: &str) -> Result<Client> {
        self.read_client(id)
    }

    fn update_client(&self, id: &str, patch: &ClientPatch, now: DateTime<Utc>) -> Result<Client> {
        let _guard = self.guard()?;
        let mut client = self.read_client(id)?;
        client.apply(patch, now)?;
        if !patch.is_empty() {
            io::write_yaml(&paths::client_path(&self.root, id), &client)?;
        }
        Ok(client)
    }

    fn insert_user(&self, user: &StaffUser) -> Result<()> {
        paths::validate_id(&user.id)?;
        paths::validate_id(&user.tenant_id)?;
        let _guard = self.guard()?;
        let path = paths::user_path(&self.root, &user.id);
        if path.exists() {
            return Err(GymError::UserExists(user.id.clone()));
        }
        io::write_yaml(&path, user)
    }

    fn load_user(&self, id: &str) -> Result<StaffUser> {
        paths::validate_id(id)?;
        let path = paths::user_path(&self.root, id);
        if !path.exists() {
            return Err(GymError::UserNotFound(id.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    fn list_users(&self) -> Result<Vec<StaffUser>> {
        let dir = self.root.join(paths::USERS_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut users = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let data = std::fs::read_to_string(&path)?;
            users.push(serde_yaml::from_str::<StaffUser>(&data)?);
        }
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    fn load_settings(&self, tenant_id: &str) -> Result<TenantSettings> {
        paths::validate_id(tenant_id)?;
        let path = paths::settings_path(&self.root, tenant_id);
        if !path.exists() {
            return Err(GymError::SettingsNotFound(tenant_id.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    fn save_settings(&self, settings: &TenantSettings) -> Result<()> {
        paths::validate_id(&settings.tenant_id)?;
        let _guard = self.guard()?;
        io::write_yaml(&paths::settings_path(&self.root, &settings.tenant_id), settings)
    }

    fn insert_followup(&self, followup: &Followup) -> Result<()> {
        let _guard = self.guard()?;
        let path = paths::followups_path(&self.root);
        let mut items: Vec<Followup> = io::read_yaml_list(&path)?;
        items.push(followup.clone());
        io::write_yaml(&path, &items)
    }

    fn list_followups(&self, client_id: &str) -> Result<Vec<Followup>> {
        let items: Vec<Followup> = io::read_yaml_list(&paths::followups_path(&self.root))?;
        Ok(items.into_iter().filter(|f| f.client_id == client_id).collect())
    }

    fn insert_activity(&self, entry: &ActivityLogEntry) -> Result<()> {
        let _guard = self.guard()?;
        let path = paths::activity_path(&self.root);
        let mut items: Vec<ActivityLogEntry> = io::read_yaml_list(&path)?;
        items.push(entry.clone());
        io::write_yaml(&path, &items)
    }

    fn list_activity(&self, target_id: &str) -> Result<Vec<ActivityLogEntry>> {
        let items: Vec<ActivityLogEntry> = io::read_yaml_list(&paths::activity_path(&self.root))?;
        Ok(items.into_iter().filter(|e| e.target_id == target_id).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
