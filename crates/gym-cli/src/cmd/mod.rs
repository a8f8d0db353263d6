pub mod client;
pub mod init;
pub mod meeting;
pub mod outcome;
pub mod serve;
pub mod settings;
pub mod staff;

use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use gym_core::identity::ActingUser;
use gym_core::LifecycleEngine;
use std::path::Path;

pub(crate) fn open_engine(root: &Path) -> anyhow::Result<LifecycleEngine> {
    LifecycleEngine::open(root)
        .with_context(|| format!("failed to open gym data at {}", root.display()))
}

/// Resolve `--as` / `GYM_USER` into an acting staff user.
pub(crate) fn acting_user(
    engine: &LifecycleEngine,
    user: Option<&str>,
) -> anyhow::Result<ActingUser> {
    let id = user.ok_or_else(|| anyhow!("no acting user: pass --as <user> or set GYM_USER"))?;
    Ok(engine.resolve_actor(id)?)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` (UTC) or a bare `YYYY-MM-DD`
/// (midnight UTC).
pub(crate) fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        assert_eq!(
            parse_date("2025-03-04").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_date("2025-03-04T18:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 4, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_date_and_minutes() {
        assert_eq!(
            parse_date("2025-03-04 17:30").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 4, 17, 30, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("next tuesday").is_err());
    }
}
