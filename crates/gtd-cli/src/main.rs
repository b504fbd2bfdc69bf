mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    action::ActionSubcommand,
    group::{GroupKind, GroupSubcommand},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gtd",
    about = "Getting Things Done: capture actions, file them into lists and projects",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .gtd/)
    #[arg(long, global = true, env = "GTD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a GTD workspace in the current directory
    Init {
        /// Keep everything in memory instead of a database file
        #[arg(long)]
        memory: bool,
        /// Reject invalid changes (blank titles, bad dates, edits to done actions)
        #[arg(long)]
        enforce_rules: bool,
    },

    /// Manage actions
    Action {
        #[command(subcommand)]
        subcommand: ActionSubcommand,
    },

    /// Manage action lists
    List {
        #[command(subcommand)]
        subcommand: GroupSubcommand,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        subcommand: GroupSubcommand,
    },

    /// Serve the HTTP API
    Serve {
        /// Port to listen on (default: server.port from config, 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,
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

    let result = match cli.command {
        Commands::Init {
            memory,
            enforce_rules,
        } => cmd::init::run(&root, memory, enforce_rules),
        Commands::Action { subcommand } => cmd::action::run(&root, subcommand, cli.json),
        Commands::List { subcommand } => {
            cmd::group::run(&root, GroupKind::List, subcommand, cli.json)
        }
        Commands::Project { subcommand } => {
            cmd::group::run(&root, GroupKind::Project, subcommand, cli.json)
        }
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
