use crate::error::{GymError, Result};
use crate::types::PurchaseType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A prospective or active gym member, scoped to one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub first_meeting_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_meeting_completed: bool,
    #[serde(default)]
    pub purchase_type: Option<PurchaseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub next_confirmation_due: Option<DateTime<Utc>>,
    /// Bumped on every non-empty patch; callers may pass it back as `expected_version`.
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            name: name.into(),
            email: None,
            phone: None,
            assigned_to: None,
            first_meeting_date: None,
            first_meeting_completed: false,
            purchase_type: None,
            internal_notes: None,
            next_confirmation_due: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(user_id)
    }

    /// Lifecycle invariants that every persisted client must satisfy.
    pub fn check_invariants(&self) -> std::result::Result<(), &'static str> {
        if self.first_meeting_completed && self.first_meeting_date.is_none() {
            return Err("first meeting completed without a meeting date");
        }
        if self.purchase_type.is_some() && !self.first_meeting_completed {
            return Err("purchase outcome recorded before the first meeting was completed");
        }
        if self.next_confirmation_due.is_some() && self.purchase_type.is_none() {
            return Err("confirmation date set without a purchase outcome");
        }
        Ok(())
    }

    /// Apply `patch` in place. Fields left as `None` in the patch are untouched.
    ///
    /// Fails with `Conflict` when the patch carries an `expected_version`
    /// that no longer matches, and with `Store` when the result would break
    /// a lifecycle invariant. On failure `self` is left unchanged. An empty
    /// patch only checks the version.
    pub fn apply(&mut self, patch: &ClientPatch, now: DateTime<Utc>) -> Result<()> {
        if let Some(expected) = patch.expected_version {
            if expected != self.version {
                return Err(GymError::Conflict {
                    id: self.id.clone(),
                    expected,
                    found: self.version,
                });
            }
        }
        if patch.is_empty() {
            return Ok(());
        }

        let mut next = self.clone();
        if let Some(trainer) = &patch.assigned_to {
            next.assigned_to = Some(trainer.clone());
        }
        if let Some(date) = patch.first_meeting_date {
            next.first_meeting_date = Some(date);
        }
        if let Some(completed) = patch.first_meeting_completed {
            next.first_meeting_completed = completed;
        }
        if let Some(purchase) = patch.purchase_type {
            next.purchase_type = Some(purchase);
        }
        if let Some(notes) = &patch.internal_notes {
            next.internal_notes = Some(notes.clone());
        }
        if let Some(due) = patch.next_confirmation_due {
            next.next_confirmation_due = due;
        }

        next.check_invariants()
            .map_err(|reason| GymError::Store(format!("client '{}': {reason}", self.id)))?;

        next.version = self.version + 1;
        next.updated_at = now;
        *self = next;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ClientPatch
// ---------------------------------------------------------------------------

/// Partial update for the lifecycle fields of a [`Client`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPatch {
    pub assigned_to: Option<String>,
    pub first_meeting_date: Option<DateTime<Utc>>,
    pub first_meeting_completed: Option<bool>,
    pub purchase_type: Option<PurchaseType>,
    pub internal_notes: Option<String>,
    /// `Some(None)` clears the confirmation date.
    pub next_confirmation_due: Option<Option<DateTime<Utc>>>,
    pub expected_version: Option<u64>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.assigned_to.is_none()
            && self.first_meeting_date.is_none()
            && self.first_meeting_completed.is_none()
            && self.purchase_type.is_none()
            && self.internal_notes.is_none()
            && self.next_confirmation_due.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
