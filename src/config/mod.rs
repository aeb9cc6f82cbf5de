mod file_config;

pub use file_config::FileConfig;

use crate::room::SortPreference;
use crate::server::RequestsLoggingLevel;
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be overridden by the TOML config file.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub library_file: Option<PathBuf>,
    pub default_time_limit_minutes: i64,
    pub default_sort_by: String,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub library_file: Option<PathBuf>,
    pub default_time_limit_minutes: i64,
    pub default_sort_by: SortPreference,
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let library_file = file
            .library_file
            .map(PathBuf::from)
            .or_else(|| cli.library_file.clone());

        let default_time_limit_minutes = file
            .default_time_limit_minutes
            .unwrap_or(cli.default_time_limit_minutes);

        // Unknown sort names fall back to Random, same as room specs do.
        let default_sort_by =
            SortPreference::parse(&file.default_sort_by.unwrap_or_else(|| cli.default_sort_by.clone()));

        Self {
            port,
            logging_level,
            frontend_dir_path,
            library_file,
            default_time_limit_minutes,
            default_sort_by,
        }
    }
}
