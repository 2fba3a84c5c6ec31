use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::Config;

/// Sends logs to a file; the terminal belongs to the UI. `RUST_LOG` takes
/// precedence over the configured level.
pub fn init_logger(config: &Config) -> Result<()> {
    let path = config
        .log_path()
        .ok_or(anyhow::anyhow!("No data directory found for the log file"))?;
    let file = open_log_file(&path)?;

    let mut builder = if std::env::var("RUST_LOG").is_ok() {
        Builder::from_env(Env::default())
    } else {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("cinematch", parse_level(&config.log_level));
        builder
    };

    builder
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;

    log::info!("Logging to {}", path.display());
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/cinematch.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
