use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voteroom_server::config::{AppConfig, CliConfig, FileConfig};
use voteroom_server::directory::{InMemoryItemDirectory, ItemDirectory};
use voteroom_server::playback::LoggingPlaybackHandoff;
use voteroom_server::room::{RoomDefaults, RoomRegistry, VotingCoordinator};
use voteroom_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use voteroom_server::user::PassthroughIdentity;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML configuration file. Values in the file override CLI
    /// arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to a JSON library file providing items and collections for the
    /// in-memory item directory.
    #[clap(long)]
    pub library_file: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Voting time limit in minutes applied to rooms that do not set one.
    #[clap(long, default_value_t = 5)]
    pub default_time_limit_minutes: i64,

    /// Candidate sort order applied to rooms that do not set one.
    #[clap(long, default_value = "Random")]
    pub default_sort_by: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(
        &CliConfig {
            port: cli_args.port,
            logging_level: cli_args.logging_level,
            frontend_dir_path: cli_args.frontend_dir_path,
            library_file: cli_args.library_file,
            default_time_limit_minutes: cli_args.default_time_limit_minutes,
            default_sort_by: cli_args.default_sort_by,
        },
        file_config,
    );

    let directory: Arc<dyn ItemDirectory> = match &config.library_file {
        Some(path) => {
            info!("Loading library from {:?}...", path);
            Arc::new(InMemoryItemDirectory::from_json_file(path)?)
        }
        None => {
            info!("No library file configured, starting with an empty item directory.");
            Arc::new(InMemoryItemDirectory::empty())
        }
    };

    let registry = Arc::new(Mutex::new(RoomRegistry::new()));
    let coordinator = Arc::new(VotingCoordinator::new(
        registry,
        directory.clone(),
        RoomDefaults {
            time_limit_minutes: config.default_time_limit_minutes,
            sort_by: config.default_sort_by,
        },
    ));

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        frontend_dir_path: config.frontend_dir_path,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(
        server_config,
        coordinator,
        directory,
        Arc::new(LoggingPlaybackHandoff),
        Arc::new(PassthroughIdentity),
    )
    .await
}
