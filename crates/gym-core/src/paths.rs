use crate::error::{GymError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GYM_DIR: &str = ".gym";
pub const CLIENTS_DIR: &str = ".gym/clients";
pub const USERS_DIR: &str = ".gym/users";
pub const SETTINGS_DIR: &str = ".gym/settings";

pub const CONFIG_FILE: &str = ".gym/config.yaml";
pub const FOLLOWUPS_FILE: &str = ".gym/followups.yaml";
pub const ACTIVITY_FILE: &str = ".gym/activity.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn gym_dir(root: &Path) -> PathBuf {
    root.join(GYM_DIR)
}

pub fn client_path(root: &Path, id: &str) -> PathBuf {
    root.join(CLIENTS_DIR).join(format!("{id}.yaml"))
}

pub fn user_path(root: &Path, id: &str) -> PathBuf {
    root.join(USERS_DIR).join(format!("{id}.yaml"))
}

pub fn settings_path(root: &Path, tenant_id: &str) -> PathBuf {
    root.join(SETTINGS_DIR).join(format!("{tenant_id}.yaml"))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn followups_path(root: &Path) -> PathBuf {
    root.join(FOLLOWUPS_FILE)
}

pub fn activity_path(root: &Path) -> PathBuf {
    root.join(ACTIVITY_FILE)
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Ids double as file names, so they are restricted to a safe charset.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 || !id_re().is_match(id) {
        return Err(GymError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
