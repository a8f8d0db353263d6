use super::{acting_user, open_engine};
use crate::output::print_json;
use clap::Subcommand;
use gym_core::intake;
use gym_core::settings::TenantSettings;
use gym_core::GymError;
use std::path::Path;

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show a tenant's lifecycle settings
    Show { tenant: String },
    /// Change a tenant's lifecycle settings (admin or operator)
    Set {
        tenant: String,
        /// Days from a no-purchase outcome to the follow-up
        #[arg(long)]
        followup_days: Option<u32>,
        /// Days from a package purchase to its confirmation
        #[arg(long)]
        package_days: Option<u32>,
        /// Days from a custom-plan purchase to its confirmation
        #[arg(long)]
        custom_plan_days: Option<u32>,
        /// Ask for a default workout template on conversion
        #[arg(long)]
        require_template: Option<bool>,
    },
}

pub fn run(
    root: &Path,
    subcmd: SettingsSubcommand,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    match subcmd {
        SettingsSubcommand::Show { tenant } => {
            let settings = engine.store().load_settings(&tenant)?;
            if json {
                print_json(&settings)?;
            } else {
                print_settings(&settings);
            }
        }
        SettingsSubcommand::Set {
            tenant,
            followup_days,
            package_days,
            custom_plan_days,
            require_template,
        } => {
            let actor = acting_user(&engine, user)?;
            let mut settings = match engine.store().load_settings(&tenant) {
                Ok(s) => s,
                Err(GymError::SettingsNotFound(_)) => TenantSettings::new(&tenant),
                Err(e) => return Err(e.into()),
            };
            if let Some(d) = followup_days {
                settings.days_to_first_followup = d;
            }
            if let Some(d) = package_days {
                settings.package_confirmation_days = d;
            }
            if let Some(d) = custom_plan_days {
                settings.custom_plan_confirmation_days = d;
            }
            if let Some(r) = require_template {
                settings.require_default_template_assignment = r;
            }
            intake::set_settings(engine.store().as_ref(), &settings, &actor)?;
            if json {
                print_json(&settings)?;
            } else {
                println!("Saved settings for '{tenant}'");
                print_settings(&settings);
            }
        }
    }
    Ok(())
}

fn print_settings(s: &TenantSettings) {
    println!("Tenant:                    {}", s.tenant_id);
    println!("Days to first follow-up:   {}", s.days_to_first_followup);
    println!("Package confirmation:      {} days", s.package_confirmation_days);
    println!("Custom plan confirmation:  {} days", s.custom_plan_confirmation_days);
    println!(
        "Default template required: {}",
        if s.require_default_template_assignment { "yes" } else { "no" }
    );
}
