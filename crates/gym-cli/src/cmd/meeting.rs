use super::{acting_user, open_engine, parse_date};
use crate::output::{print_json, print_warnings};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum MeetingSubcommand {
    /// Set or move the first meeting date
    Schedule {
        client: String,
        /// YYYY-MM-DD, "YYYY-MM-DD HH:MM" (UTC) or RFC 3339
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
    },
    /// Mark the first meeting as held
    Complete {
        client: String,
        /// Meeting date, if not already scheduled
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
    },
}

pub fn run(
    root: &Path,
    subcmd: MeetingSubcommand,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;

    let (applied, verb) = match subcmd {
        MeetingSubcommand::Schedule { client, date } => {
            (engine.set_meeting_date(&client, date, &actor)?, "Scheduled")
        }
        MeetingSubcommand::Complete { client, date } => {
            (engine.mark_completed(&client, date, &actor)?, "Completed")
        }
    };

    if json {
        print_json(&serde_json::json!({
            "client": applied.value,
            "warnings": applied.warnings,
        }))?;
    } else {
        let date = applied
            .value
            .first_meeting_date
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();
        println!("{verb} first meeting for '{}': {date}", applied.value.id);
        print_warnings(&applied.warnings);
    }
    Ok(())
}
