use super::open_engine;
use crate::output::{print_json, print_table};
use clap::Subcommand;
use gym_core::intake;
use gym_core::types::Role;
use std::path::Path;

#[derive(Subcommand)]
pub enum StaffSubcommand {
    /// Add a staff user
    Add {
        id: String,
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        name: String,
        /// admin, operator, trainer, or member
        #[arg(long)]
        role: Role,
    },
    /// List staff users
    List {
        /// Only users of this tenant
        #[arg(long)]
        tenant: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: StaffSubcommand, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    match subcmd {
        StaffSubcommand::Add {
            id,
            tenant,
            name,
            role,
        } => {
            let user =
                intake::add_staff(engine.store().as_ref(), &id, &tenant, &name, role, engine.now())?;
            if json {
                print_json(&user)?;
            } else {
                println!("Added {} '{}' ({}) to {}", user.role, user.id, user.name, user.tenant_id);
            }
        }
        StaffSubcommand::List { tenant } => {
            let mut users = engine.store().list_users()?;
            if let Some(t) = tenant.as_deref() {
                users.retain(|u| u.tenant_id == t);
            }
            if json {
                print_json(&users)?;
            } else if users.is_empty() {
                println!("No staff users.");
            } else {
                let rows = users
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.clone(),
                            u.name.clone(),
                            u.role.to_string(),
                            u.tenant_id.clone(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "NAME", "ROLE", "TENANT"], rows);
            }
        }
    }
    Ok(())
}
