use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GymError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
    Trainer,
    /// Any non-staff account (front desk kiosks, client logins, ...).
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Trainer => "trainer",
            Role::Member => "member",
        }
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Operator | Role::Trainer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            "trainer" => Ok(Role::Trainer),
            "member" => Ok(Role::Member),
            _ => Err(GymError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PurchaseType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    Package,
    CustomPlan,
    None,
}

impl PurchaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseType::Package => "package",
            PurchaseType::CustomPlan => "custom_plan",
            PurchaseType::None => "none",
        }
    }

    /// Wording used in activity summaries.
    pub fn label(self) -> &'static str {
        match self {
            PurchaseType::Package => "lesson package",
            PurchaseType::CustomPlan => "custom training plan",
            PurchaseType::None => "no purchase",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PurchaseType {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "package" => Ok(PurchaseType::Package),
            "custom_plan" | "custom-plan" => Ok(PurchaseType::CustomPlan),
            "none" => Ok(PurchaseType::None),
            _ => Err(GymError::InvalidPurchaseType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FollowupType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowupType {
    InApp,
    PostFirstMeeting,
    Whatsapp,
    Call,
    Email,
}

impl fmt::Display for FollowupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FollowupType::InApp => "in_app",
            FollowupType::PostFirstMeeting => "post_first_meeting",
            FollowupType::Whatsapp => "whatsapp",
            FollowupType::Call => "call",
            FollowupType::Email => "email",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    InApp,
    Email,
    Whatsapp,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Channel::InApp => "in_app",
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Channel {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_app" | "in-app" => Ok(Channel::InApp),
            "email" => Ok(Channel::Email),
            "whatsapp" => Ok(Channel::Whatsapp),
            _ => Err(GymError::InvalidChannel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActivityAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    TrainerAssigned,
    FirstMeetingDateUpdated,
    FirstMeetingCompleted,
    PurchaseOutcomeRecorded,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::TrainerAssigned => "trainer_assigned",
            ActivityAction::FirstMeetingDateUpdated => "first_meeting_date_updated",
            ActivityAction::FirstMeetingCompleted => "first_meeting_completed",
            ActivityAction::PurchaseOutcomeRecorded => "purchase_outcome_recorded",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TargetType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Client,
    Followup,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Client => f.write_str("client"),
            TargetType::Followup => f.write_str("followup"),
        }
    }
}
