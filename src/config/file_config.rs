use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration file. Every field may be omitted; present
/// fields override their CLI counterparts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
    pub library_file: Option<String>,
    pub default_time_limit_minutes: Option<i64>,
    pub default_sort_by: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading config file {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Error parsing config file {:?}", path))
    }
}
