//! Client lifecycle engine.
//!
//! Every public operation follows the same shape:
//!
//! 1. authorize the acting user (fail fast, nothing written)
//! 2. read what it needs (client, trainer, tenant settings)
//! 3. commit one primary write through the record store
//! 4. run best-effort side effects (activity log, follow-up, notification)
//!    and collect their failures as warnings on the result
//!
//! The engine keeps no state between calls beyond its collaborators.

mod assignment;
mod meeting;
mod outcome;

pub use outcome::OutcomeRecord;

use crate::activity::{ActivityLogEntry, ActivityLogger};
use crate::auth;
use crate::client::Client;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::effects::{SideEffectWarning, SideEffects, WarningKind};
use crate::error::{GymError, Result};
use crate::followup::Followup;
use crate::identity::{self, ActingUser};
use crate::notify::{self, Notification, Notifier};
use crate::settings::{SettingsSource, StoreSettings};
use crate::store::{FileStore, RecordStore};
use crate::types::{ActivityAction, Channel, TargetType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Applied
// ---------------------------------------------------------------------------

/// A committed operation plus any side-effect warnings.
#[derive(Debug, Clone, Serialize)]
pub struct Applied<T> {
    pub value: T,
    pub warnings: Vec<SideEffectWarning>,
}

impl<T> Applied<T> {
    fn new(value: T, effects: SideEffects) -> Self {
        Self {
            value,
            warnings: effects.into_warnings(),
        }
    }

    fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LifecycleEngine
// ---------------------------------------------------------------------------

pub struct LifecycleEngine {
    store: Arc<dyn RecordStore>,
    settings: Arc<dyn SettingsSource>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    activity: ActivityLogger,
    channel: Channel,
    followup_note: String,
}

impl LifecycleEngine {
    /// Engine over `store` with settings read from the same store, the
    /// system clock and default config.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        let cfg = EngineConfig::default();
        Self {
            settings: Arc::new(StoreSettings::new(store.clone())),
            activity: ActivityLogger::new(store.clone()),
            store,
            notifier,
            clock: Arc::new(SystemClock),
            channel: cfg.default_channel,
            followup_note: cfg.default_followup_note,
        }
    }

    /// Open the file-backed engine rooted at `root`, wiring the notifier
    /// from `.gym/config.yaml`.
    pub fn open(root: &Path) -> Result<Self> {
        let cfg = EngineConfig::load(root)?;
        let store: Arc<dyn RecordStore> = Arc::new(FileStore::open(root)?);
        let notifier =
            notify::from_config(&cfg.notifier).map_err(|e| GymError::Config(e.to_string()))?;
        Ok(Self::new(store, notifier).with_config(&cfg))
    }

    pub fn with_config(mut self, cfg: &EngineConfig) -> Self {
        self.channel = cfg.default_channel;
        self.followup_note = cfg.default_followup_note.clone();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = settings;
        self
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn resolve_actor(&self, user_id: &str) -> Result<ActingUser> {
        identity::resolve_actor(self.store.as_ref(), user_id)
    }

    pub fn get_client(&self, client_id: &str, actor: &ActingUser) -> Result<Client> {
        let client = self.store.load_client(client_id)?;
        auth::require_view(actor, &client)?;
        Ok(client)
    }

    pub fn list_followups(&self, client_id: &str, actor: &ActingUser) -> Result<Vec<Followup>> {
        self.get_client(client_id, actor)?;
        self.store.list_followups(client_id)
    }

    pub fn list_activity(
        &self,
        client_id: &str,
        actor: &ActingUser,
    ) -> Result<Vec<ActivityLogEntry>> {
        self.get_client(client_id, actor)?;
        self.store.list_activity(client_id)
    }

    // -----------------------------------------------------------------------
    // Side-effect helpers
    // -----------------------------------------------------------------------

    fn log_activity(
        &self,
        effects: &mut SideEffects,
        action: ActivityAction,
        client: &Client,
        actor: &ActingUser,
        notes: &str,
        now: DateTime<Utc>,
    ) {
        effects.absorb(self.activity.record(
            action,
            &client.id,
            TargetType::Client,
            &actor.id,
            Some(client.tenant_id.as_str()),
            notes,
            now,
        ));
    }

    fn schedule_followup(&self, followup: Followup) -> std::result::Result<Followup, SideEffectWarning> {
        self.store.insert_followup(&followup).map_err(|e| {
            SideEffectWarning::new(
                WarningKind::Followup,
                format!("failed to schedule {} follow-up: {e}", followup.followup_type),
            )
        })?;
        Ok(followup)
    }

    fn dispatch(&self, notification: Notification) -> std::result::Result<(), SideEffectWarning> {
        self.notifier.notify(&notification).map_err(|e| {
            SideEffectWarning::new(
                WarningKind::Notification,
                format!("could not notify '{}': {e}", notification.user_id),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------
