use crate::models::error::{Result, StatusError};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use log::{info, warn, LevelFilter};
use std::net::IpAddr;
use std::path::Path;

/// Process settings, from command-line flags or the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "backup-status")]
#[command(about = "Per-host mount point backup status dashboard", long_about = None)]
pub struct Settings {
    #[arg(long = "host", default_value = "0.0.0.0", env = "HOST")]
    pub host: IpAddr,

    #[arg(short = 'p', long = "port", default_value_t = 8000, env = "PORT")]
    pub port: u16,

    /// Any non-falsey value turns debug logging on
    #[arg(
        long = "debug",
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,

    #[arg(
        long = "use-reloader",
        env = "USE_RELOADER",
        default_value = "1",
        action = ArgAction::Set,
        value_parser = FalseyValueParser::new()
    )]
    pub use_reloader: bool,

    #[arg(
        short = 'd',
        long = "database-file",
        default_value = "tsm.db",
        env = "DATABASE_FILE"
    )]
    pub database_file: String,

    #[arg(
        short = 'l',
        long = "log-level",
        default_value = "info",
        env = "LOG_LEVEL"
    )]
    pub log_level: String,
}

impl Settings {
    /// Effective log filter; `debug` wins over `log_level`.
    pub fn log_filter(&self) -> LevelFilter {
        if self.debug {
            return LevelFilter::Debug;
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    }

    pub fn is_in_memory_database(&self) -> bool {
        is_in_memory(&self.database_file)
    }

    /// Validates the settings once at startup
    pub fn validate(&self) -> Result<()> {
        info!("Validating settings...");

        if self.port == 0 {
            return Err(StatusError::InvalidSetting(
                "port must be greater than 0".to_string(),
            ));
        }

        validate_database_path(&self.database_file)?;

        if self.use_reloader && !cfg!(debug_assertions) {
            warn!("Template reloading is only available in debug builds; ignoring USE_RELOADER");
        }

        info!("Settings validation passed");
        Ok(())
    }
}

pub fn is_in_memory(db_file: &str) -> bool {
    db_file == ":memory:" || db_file.starts_with("file::memory:")
}

fn validate_database_path(db_file: &str) -> Result<()> {
    if db_file.trim().is_empty() {
        return Err(StatusError::InvalidSetting(
            "Database file path cannot be empty. Provide a valid path or use ':memory:' for an in-memory database.".to_string(),
        ));
    }

    if is_in_memory(db_file) {
        warn!("Using an in-memory database; status reports will not survive a restart");
        return Ok(());
    }

    if let Some(parent) = Path::new(db_file).parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(StatusError::InvalidSetting(format!(
                "Database directory does not exist: {}",
                parent.display()
            )));
        }
    }

    Ok(())
}
