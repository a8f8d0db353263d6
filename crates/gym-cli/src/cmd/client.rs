use super::{acting_user, open_engine};
use crate::output::{or_dash, print_json, print_table, print_warnings};
use clap::Subcommand;
use gym_core::client::Client;
use gym_core::intake::{self, Contact};
use std::path::Path;

#[derive(Subcommand)]
pub enum ClientSubcommand {
    /// Register a new, unassigned client
    Create {
        id: String,
        /// Tenant (gym) the client belongs to
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show a client's lifecycle state
    Show { id: String },
    /// Assign (or reassign) a trainer
    Assign {
        id: String,
        trainer: String,
        /// Note for the activity log and the trainer's follow-up
        #[arg(long)]
        notes: Option<String>,
    },
    /// List follow-ups scheduled for a client
    Followups { id: String },
    /// Show the activity log for a client
    Activity { id: String },
}

pub fn run(
    root: &Path,
    subcmd: ClientSubcommand,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ClientSubcommand::Create {
            id,
            tenant,
            name,
            email,
            phone,
        } => create(root, &id, &tenant, &name, Contact { email, phone }, json),
        ClientSubcommand::Show { id } => show(root, &id, user, json),
        ClientSubcommand::Assign { id, trainer, notes } => {
            assign(root, &id, &trainer, notes.as_deref(), user, json)
        }
        ClientSubcommand::Followups { id } => followups(root, &id, user, json),
        ClientSubcommand::Activity { id } => activity(root, &id, user, json),
    }
}

fn create(
    root: &Path,
    id: &str,
    tenant: &str,
    name: &str,
    contact: Contact,
    json: bool,
) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let client =
        intake::create_client(engine.store().as_ref(), id, tenant, name, contact, engine.now())?;

    if json {
        print_json(&client)?;
    } else {
        println!("Created client '{}' ({}) in {}", client.id, client.name, client.tenant_id);
    }
    Ok(())
}

fn show(root: &Path, id: &str, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;
    let client = engine.get_client(id, &actor)?;

    if json {
        print_json(&client)?;
    } else {
        print_client(&client);
    }
    Ok(())
}

fn assign(
    root: &Path,
    id: &str,
    trainer: &str,
    notes: Option<&str>,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;
    let applied = engine.assign_trainer(id, trainer, notes, &actor)?;

    if json {
        print_json(&serde_json::json!({
            "client": applied.value,
            "warnings": applied.warnings,
        }))?;
    } else {
        println!("Assigned '{}' to trainer '{trainer}'", applied.value.id);
        print_warnings(&applied.warnings);
    }
    Ok(())
}

fn followups(root: &Path, id: &str, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;
    let followups = engine.list_followups(id, &actor)?;

    if json {
        print_json(&followups)?;
        return Ok(());
    }
    if followups.is_empty() {
        println!("No follow-ups for '{id}'.");
        return Ok(());
    }
    let rows = followups
        .iter()
        .map(|f| {
            vec![
                f.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
                f.followup_type.to_string(),
                or_dash(f.trainer_id.as_deref()),
                f.notes.clone(),
            ]
        })
        .collect();
    print_table(&["SCHEDULED", "TYPE", "TRAINER", "NOTES"], rows);
    Ok(())
}

fn activity(root: &Path, id: &str, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let actor = acting_user(&engine, user)?;
    let entries = engine.list_activity(id, &actor)?;

    if json {
        print_json(&entries)?;
        return Ok(());
    }
    if entries.is_empty() {
        println!("No activity for '{id}'.");
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.created_at.format("%Y-%m-%d %H:%M").to_string(),
                e.action.to_string(),
                e.user_id.clone(),
                e.notes.clone(),
            ]
        })
        .collect();
    print_table(&["WHEN", "ACTION", "BY", "NOTES"], rows);
    Ok(())
}

pub(crate) fn print_client(c: &Client) {
    println!("Client:        {} ({})", c.name, c.id);
    println!("Tenant:        {}", c.tenant_id);
    println!("Trainer:       {}", or_dash(c.assigned_to.as_deref()));
    println!(
        "First meeting: {}{}",
        or_dash(c.first_meeting_date.map(|d| d.format("%Y-%m-%d %H:%M UTC"))),
        if c.first_meeting_completed { " (held)" } else { "" }
    );
    println!("Outcome:       {}", or_dash(c.purchase_type.map(|p| p.label())));
    println!(
        "Confirm by:    {}",
        or_dash(c.next_confirmation_due.map(|d| d.format("%Y-%m-%d")))
    );
    if let Some(notes) = &c.internal_notes {
        println!("Notes:         {notes}");
    }
    println!("Version:       {}", c.version);
}
