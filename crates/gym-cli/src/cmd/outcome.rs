use super::{acting_user, open_engine};
use crate::output::{print_json, print_warnings};
use clap::Subcommand;
use gym_core::types::PurchaseType;
use std::path::Path;

#[derive(Subcommand)]
pub enum OutcomeSubcommand {
    /// Record what the client bought at the first meeting
    Record {
        client: String,
        /// package, custom_plan, or none
        purchase: PurchaseType,
        #[arg(long)]
        notes: Option<String>,
        /// Fail if the client changed since this version was read
        #[arg(long)]
        expected_version: Option<u64>,
    },
}

pub fn run(
    root: &Path,
    subcmd: OutcomeSubcommand,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        OutcomeSubcommand::Record {
            client,
            purchase,
            notes,
            expected_version,
        } => record(
            root,
            &client,
            purchase,
            notes.as_deref(),
            expected_version,
            user,
            json,
        ),
    }
}

fn record(
    root: &Path,
    client_id: &str,
    purchase: PurchaseType,
    notes: Option<&str>,
    expected_version: Option<u64>,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;
    let applied = engine.record_outcome(client_id, purchase, notes, expected_version, &actor)?;
    let record = &applied.value;

    if json {
        print_json(&serde_json::json!({
            "client": record.client,
            "followup": record.followup,
            "require_default_template_assignment": record.require_default_template_assignment,
            "warnings": applied.warnings,
        }))?;
        return Ok(());
    }

    println!("Recorded {} for '{}'", purchase.label(), record.client.id);
    if let Some(due) = record.client.next_confirmation_due {
        println!("  confirm by: {}", due.format("%Y-%m-%d"));
    }
    if let Some(f) = &record.followup {
        println!(
            "  follow-up:  {} ({})",
            f.scheduled_at.format("%Y-%m-%d"),
            f.trainer_id.as_deref().unwrap_or("unassigned")
        );
    }
    if record.require_default_template_assignment && purchase != PurchaseType::None {
        println!("  reminder:   assign the default workout template");
    }
    print_warnings(&applied.warnings);
    Ok(())
}
