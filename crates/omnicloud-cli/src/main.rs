//! `omnicloud` command line client

mod commands;
mod logging;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use omnicloud_client::{FileStore, LocalStore, OmniCloudClient, PlatformId};
use tracing::debug;

use commands::Session;
use commands::actions::{AlertCommand, BuildCommand, InstanceCommand};
use commands::platforms::PlatformsCommand;
use commands::resources::{ListArgs, ResourceKind};
use commands::watch::WatchTarget;
use settings::{Overrides, Settings};

#[derive(Debug, Parser)]
#[command(name = "omnicloud")]
#[command(about = "Command line client for the OmniCloud platform API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API root, e.g. http://localhost:8002/api/v1
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Platform for scoped commands; defaults to the persisted selection
    #[arg(short, long, global = true)]
    platform: Option<String>,

    /// Configuration file, defaults to ./omnicloud.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// File holding the token and platform selection
    #[arg(long, global = true, env = "OMNICLOUD_STATE_FILE")]
    state_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List or select platforms
    Platforms {
        #[command(subcommand)]
        command: PlatformsCommand,
    },
    /// List a platform-scoped resource
    List(ListArgs),
    /// Show a single record
    Get { resource: ResourceKind, id: String },
    Alert {
        #[command(subcommand)]
        command: AlertCommand,
    },
    Build {
        #[command(subcommand)]
        command: BuildCommand,
    },
    Instance {
        #[command(subcommand)]
        command: InstanceCommand,
    },
    /// Poll a resource until interrupted
    Watch {
        #[command(subcommand)]
        target: WatchTarget,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&Overrides {
        config_file: cli.config.clone(),
        api_url: cli.api_url.clone(),
        log_level: cli.log_level.clone(),
        state_path: cli.state_file.clone(),
    })?;
    logging::init_logging(&settings.log_level());

    let state_path = settings.state_path();
    debug!("Using state file {}", state_path.display());
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(&state_path)?);

    let client = OmniCloudClient::new(settings.client_config(), store.clone())?;
    let session = Session::new(client, store, cli.platform.map(PlatformId::from));

    match cli.command {
        Commands::Platforms { command } => commands::platforms::run(&session, command).await,
        Commands::List(args) => commands::resources::list(&session, args).await,
        Commands::Get { resource, id } => commands::resources::get(&session, resource, id).await,
        Commands::Alert { command } => commands::actions::alert(&session, command).await,
        Commands::Build { command } => commands::actions::build(&session, command).await,
        Commands::Instance { command } => commands::actions::instance(&session, command).await,
        Commands::Watch { target } => commands::watch::run(&session, target).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::parse_from([
            "omnicloud",
            "--platform",
            "3",
            "list",
            "audit-logs",
            "--page",
            "1",
            "--severity",
            "critical",
        ]);
        assert_eq!(cli.platform.as_deref(), Some("3"));
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.resource, ResourceKind::AuditLogs);
                assert_eq!(args.page, 1);
                assert_eq!(args.per_page, 10);
                assert_eq!(args.severity.as_deref(), Some("critical"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_watch_command() {
        let cli = Cli::parse_from(["omnicloud", "watch", "instances", "--interval-secs", "5"]);
        match cli.command {
            Commands::Watch {
                target: WatchTarget::Instances { interval_secs },
            } => assert_eq!(interval_secs, 5),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
