//! Notification dispatch to staff users.
//!
//! Dispatch failures are reported to the lifecycle engine, which turns them
//! into warnings. Nothing in here retries.

use crate::config::NotifierConfig;
use crate::types::Channel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub channel: Channel,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport failed: {0}")]
    Transport(String),

    #[error("notification rejected with status {0}")]
    Rejected(u16),
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// Writes each notification to the tracing log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            user = %n.user_id,
            channel = %n.channel,
            title = %n.title,
            "{}",
            n.message
        );
        Ok(())
    }
}

pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, _: &Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// POSTs the notification as JSON to a fixed URL.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, n: &Notification) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.url)
            .json(n)
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

/// Build the configured notifier.
pub fn from_config(cfg: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    let notifier: Arc<dyn Notifier> = match cfg {
        NotifierConfig::Log => Arc::new(LogNotifier),
        NotifierConfig::Disabled => Arc::new(DisabledNotifier),
        NotifierConfig::Webhook {
            url,
            timeout_seconds,
        } => Arc::new(WebhookNotifier::new(
            url.clone(),
            Duration::from_secs(*timeout_seconds),
        )?),
    };
    Ok(notifier)
}
