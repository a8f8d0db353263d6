use crate::error::{GymError, Result};
use crate::store::RecordStore;
use crate::types::PurchaseType;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// TenantSettings
// ---------------------------------------------------------------------------

/// Per-tenant lifecycle parameters. Read-only for the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSettings {
    pub tenant_id: String,
    #[serde(default = "default_days_to_first_followup")]
    pub days_to_first_followup: u32,
    #[serde(default = "default_confirmation_days")]
    pub package_confirmation_days: u32,
    #[serde(default = "default_confirmation_days")]
    pub custom_plan_confirmation_days: u32,
    /// Advisory only; surfaced to callers, never enforced here.
    #[serde(default)]
    pub require_default_template_assignment: bool,
}

fn default_days_to_first_followup() -> u32 {
    3
}

fn default_confirmation_days() -> u32 {
    30
}

/// Upper bound for every day window; keeps date arithmetic in range.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// `now + days`, or `Config` when the result leaves chrono's range.
fn add_days(now: DateTime<Utc>, days: u32, field: &str) -> Result<DateTime<Utc>> {
    Duration::try_days(i64::from(days))
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| GymError::Config(format!("{field} of {days} days is out of range")))
}

impl TenantSettings {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            days_to_first_followup: default_days_to_first_followup(),
            package_confirmation_days: default_confirmation_days(),
            custom_plan_confirmation_days: default_confirmation_days(),
            require_default_template_assignment: false,
        }
    }

    /// Reject windows above [`MAX_WINDOW_DAYS`].
    pub fn validate(&self) -> Result<()> {
        for (field, days) in [
            ("days_to_first_followup", self.days_to_first_followup),
            ("package_confirmation_days", self.package_confirmation_days),
            ("custom_plan_confirmation_days", self.custom_plan_confirmation_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(GymError::Config(format!(
                    "tenant '{}': {field} = {days} exceeds {MAX_WINDOW_DAYS}",
                    self.tenant_id
                )));
            }
        }
        Ok(())
    }

    /// Next confirmation check-in for a converted client; `None` for no purchase.
    pub fn confirmation_due(
        &self,
        purchase: PurchaseType,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let days = match purchase {
            PurchaseType::Package => self.package_confirmation_days,
            PurchaseType::CustomPlan => self.custom_plan_confirmation_days,
            PurchaseType::None => return Ok(None),
        };
        add_days(now, days, "confirmation window").map(Some)
    }

    pub fn first_followup_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        add_days(now, self.days_to_first_followup, "days_to_first_followup")
    }
}

// ---------------------------------------------------------------------------
// SettingsSource
// ---------------------------------------------------------------------------

/// Resolves a tenant's settings snapshot for the duration of one operation.
pub trait SettingsSource: Send + Sync {
    fn resolve(&self, tenant_id: &str) -> Result<TenantSettings>;
}

/// Reads settings rows from the record store on every call.
pub struct StoreSettings {
    store: Arc<dyn RecordStore>,
}

impl StoreSettings {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

impl SettingsSource for StoreSettings {
    fn resolve(&self, tenant_id: &str) -> Result<TenantSettings> {
        self.store.load_settings(tenant_id)
    }
}

/// Fixed settings for a single tenant; other tenants resolve to `SettingsNotFound`.
pub struct StaticSettings(pub TenantSettings);

impl SettingsSource for StaticSettings {
    fn resolve(&self, tenant_id: &str) -> Result<TenantSettings> {
        if self.0.tenant_id == tenant_id {
            Ok(self.0.clone())
        } else {
            Err(GymError::SettingsNotFound(tenant_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn confirmation_windows_by_purchase_type() {
        let mut s = TenantSettings::new("gym-a");
        s.package_confirmation_days = 7;
        s.custom_plan_confirmation_days = 14;

        assert_eq!(
            s.confirmation_due(PurchaseType::Package, t0()).unwrap(),
            Some(t0() + Duration::days(7))
        );
        assert_eq!(
            s.confirmation_due(PurchaseType::CustomPlan, t0()).unwrap(),
            Some(t0() + Duration::days(14))
        );
        assert_eq!(s.confirmation_due(PurchaseType::None, t0()).unwrap(), None);
    }

    #[test]
    fn zero_day_followup_is_immediate() {
        let mut s = TenantSettings::new("gym-a");
        s.days_to_first_followup = 0;
        assert_eq!(s.first_followup_at(t0()).unwrap(), t0());
    }

    #[test]
    fn huge_windows_error_instead_of_panicking() {
        let mut s = TenantSettings::new("gym-a");
        s.package_confirmation_days = u32::MAX;
        s.days_to_first_followup = u32::MAX;

        let err = s.confirmation_due(PurchaseType::Package, t0()).unwrap_err();
        assert!(matches!(err, GymError::Config(_)));
        assert!(matches!(s.first_followup_at(t0()), Err(GymError::Config(_))));
        assert!(s.confirmation_due(PurchaseType::None, t0()).unwrap().is_none());
    }

    #[test]
    fn validate_bounds_each_window() {
        let mut s = TenantSettings::new("gym-a");
        s.custom_plan_confirmation_days = MAX_WINDOW_DAYS;
        assert!(s.validate().is_ok());
        s.custom_plan_confirmation_days = MAX_WINDOW_DAYS + 1;
        assert!(matches!(s.validate(), Err(GymError::Config(_))));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: TenantSettings = serde_yaml::from_str("tenant_id: gym-a\n").unwrap();
        assert_eq!(s.days_to_first_followup, 3);
        assert_eq!(s.package_confirmation_days, 30);
        assert!(!s.require_default_template_assignment);
    }

    #[test]
    fn static_settings_scoped_to_tenant() {
        let src = StaticSettings(TenantSettings::new("gym-a"));
        assert!(src.resolve("gym-a").is_ok());
        assert!(matches!(src.resolve("gym-b"), Err(GymError::SettingsNotFound(_))));
    }
}
