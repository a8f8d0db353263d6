mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    client::ClientSubcommand, meeting::MeetingSubcommand, outcome::OutcomeSubcommand,
    settings::SettingsSubcommand, staff::StaffSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gym",
    about = "Gym client lifecycle: trainer assignment, first meetings, purchase outcomes and follow-ups",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: auto-detect from .gym/)
    #[arg(long, global = true, env = "GYM_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Staff user id to act as
    #[arg(long = "as", global = true, env = "GYM_USER")]
    as_user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a gym data root
    Init,

    /// Create, inspect and assign clients
    Client {
        #[command(subcommand)]
        subcommand: ClientSubcommand,
    },

    /// Schedule and complete first meetings
    Meeting {
        #[command(subcommand)]
        subcommand: MeetingSubcommand,
    },

    /// Record first-meeting purchase outcomes
    Outcome {
        #[command(subcommand)]
        subcommand: OutcomeSubcommand,
    },

    /// Manage staff users
    Staff {
        #[command(subcommand)]
        subcommand: StaffSubcommand,
    },

    /// Show and change tenant settings
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },

    /// Serve the lifecycle HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "7410")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let actor = cli.as_user.as_deref();

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Client { subcommand } => cmd::client::run(&root, subcommand, actor, cli.json),
        Commands::Meeting { subcommand } => cmd::meeting::run(&root, subcommand, actor, cli.json),
        Commands::Outcome { subcommand } => cmd::outcome::run(&root, subcommand, actor, cli.json),
        Commands::Staff { subcommand } => cmd::staff::run(&root, subcommand, cli.json),
        Commands::Settings { subcommand } => {
            cmd::settings::run(&root, subcommand, actor, cli.json)
        }
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
