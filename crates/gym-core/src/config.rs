use crate::error::{GymError, Result};
use crate::paths;
use crate::types::Channel;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// NotifierConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    #[default]
    Log,
    Webhook {
        url: String,
        #[serde(default = "default_webhook_timeout")]
        timeout_seconds: u64,
    },
    Disabled,
}

fn default_webhook_timeout() -> u64 {
    3
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub default_channel: Channel,
    /// Upper bound on a primary write when served over HTTP.
    #[serde(default = "default_primary_timeout")]
    pub primary_timeout_seconds: u64,
    #[serde(default = "default_followup_note")]
    pub default_followup_note: String,
}

fn default_version() -> u32 {
    1
}

fn default_primary_timeout() -> u64 {
    5
}

fn default_followup_note() -> String {
    "Automatic follow-up: no purchase at first meeting".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            notifier: NotifierConfig::default(),
            default_channel: Channel::default(),
            primary_timeout_seconds: default_primary_timeout(),
            default_followup_note: default_followup_note(),
        }
    }
}

impl EngineConfig {
    pub fn load(root: &Path) -> Result<Self> {
        if !paths::gym_dir(root).is_dir() {
            return Err(GymError::NotInitialized);
        }
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_yaml(&paths::config_path(root), self)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let NotifierConfig::Webhook {
            url,
            timeout_seconds,
        } = &self.notifier
        {
            if url.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "webhook notifier has an empty url".to_string(),
                });
            } else if !(url.starts_with("http://") || url.starts_with("https://")) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("webhook url '{url}' is not http(s)"),
                });
            }
            if *timeout_seconds == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: "webhook timeout_seconds=0 fails every dispatch".to_string(),
                });
            }
        }

        if self.primary_timeout_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "primary_timeout_seconds must be greater than 0".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_config_takes_defaults() {
        let cfg: EngineConfig = serde_yaml::from_str("version: 1\n").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.primary_timeout_seconds, 5);
        assert_eq!(cfg.notifier, NotifierConfig::Log);
    }

    #[test]
    fn webhook_notifier_yaml_tagged() {
        let yaml = "notifier:\n  type: webhook\n  url: https://hooks.example.com/gym\n";
        let cfg: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            cfg.notifier,
            NotifierConfig::Webhook {
                url: "https://hooks.example.com/gym".to_string(),
                timeout_seconds: 3,
            }
        );
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".gym")).unwrap();
        assert_eq!(EngineConfig::load(dir.path()).unwrap(), EngineConfig::default());
    }

    #[test]
    fn load_uninitialized_root_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(EngineConfig::load(dir.path()), Err(GymError::NotInitialized)));
    }

    #[test]
    fn validate_flags_empty_webhook_url() {
        let cfg = EngineConfig {
            notifier: NotifierConfig::Webhook {
                url: "".to_string(),
                timeout_seconds: 0,
            },
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error && w.message.contains("empty url")));
        assert!(warnings.iter().any(|w| w.message.contains("timeout_seconds=0")));
    }
}
