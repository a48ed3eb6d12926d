use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable naming the settings file (without extension).
pub const CONFIG_PATH_ENV: &str = "PRESPLIT_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub split: SplitConfig,
    pub status: StatusConfig,
    pub mysql: MysqlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

/// Planner and writer tunables shared by every table pipeline of a run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SplitConfig {
    pub region_size_mb: u64,
    /// Rows a new table should hold per region, for sampling and reckon.
    pub rows_per_region: u64,
    /// Distinct tuples per keyset page in reckon.
    pub reckon_page_size: usize,
    /// Maximum tuples per `SPLIT TABLE` statement.
    pub statement_batch_size: usize,
    pub concurrency: usize,
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MysqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

/// Loads settings from built-in defaults, then the file named by
/// `PRESPLIT_CONFIG` (default `config`, optional), then `PRESPLIT__*`
/// environment variables such as `PRESPLIT__SPLIT__CONCURRENCY`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = with_defaults(Config::builder())?
        .add_source(File::with_name(config_path).required(false))
        .add_source(
            Environment::with_prefix("PRESPLIT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("split.region_size_mb", 96_i64)?
        .set_default("split.rows_per_region", 1_000_000_i64)?
        .set_default("split.reckon_page_size", 10_000_i64)?
        .set_default("split.statement_batch_size", 1_000_i64)?
        .set_default("split.concurrency", 4_i64)?
        .set_default("split.output_dir", "/tmp/split")?
        .set_default("status.port", 10080_i64)?
        .set_default("mysql.host", "127.0.0.1")?
        .set_default("mysql.port", 4000_i64)?
        .set_default("mysql.user", "root")?
        .set_default("mysql.password", "")
}
