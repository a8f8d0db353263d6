//! Best-effort side effects that run after a primary mutation commits.
//!
//! Failures are collected as [`SideEffectWarning`]s on the operation result
//! and never turn into the operation's error.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ActivityLog,
    Notification,
    Followup,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningKind::ActivityLog => "activity_log",
            WarningKind::Notification => "notification",
            WarningKind::Followup => "followup",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffectWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl SideEffectWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SideEffectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Collects the outcome of each side effect in a batch.
#[derive(Debug, Default)]
pub struct SideEffects {
    warnings: Vec<SideEffectWarning>,
}

impl SideEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one side effect, keeping its value on success.
    pub fn absorb<T>(&mut self, result: Result<T, SideEffectWarning>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(warning) => {
                tracing::warn!(kind = %warning.kind, error = %warning.message, "side effect failed");
                self.warnings.push(warning);
                None
            }
        }
    }

    pub fn into_warnings(self) -> Vec<SideEffectWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_collects_failures_only() {
        let mut fx = SideEffects::new();
        assert_eq!(fx.absorb::<u32>(Ok(7)), Some(7));
        assert_eq!(
            fx.absorb::<u32>(Err(SideEffectWarning::new(WarningKind::Notification, "smtp down"))),
            None
        );
        let warnings = fx.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "notification: smtp down");
    }
}
