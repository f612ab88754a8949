use std::path::Path;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogConfig;

const LOG_FILE_PREFIX: &str = "dental-careers-backend";

/// Owns the non-blocking writer guards; dropping it flushes and stops file logging.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new(config: &LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging(config)?;
        Ok(Logger { guards })
    }

    pub fn setup_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let root = Path::new(&config.directory);
        let error_dir = root.join("error");
        let json_dir = root.join("json");
        std::fs::create_dir_all(&error_dir)?;
        std::fs::create_dir_all(&json_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,dental_careers_backend=debug"));

        let general_file = rolling::daily(root, format!("{}.log", LOG_FILE_PREFIX));
        let (non_blocking_general, general_guard) = non_blocking(general_file);

        let error_file = rolling::daily(&error_dir, format!("{}-error.log", LOG_FILE_PREFIX));
        let (non_blocking_error, error_guard) = non_blocking(error_file);

        let json_file = rolling::daily(&json_dir, format!("{}.json", LOG_FILE_PREFIX));
        let (non_blocking_json, json_guard) = non_blocking(json_file);

        tracing_subscriber::registry()
            .with(
                // Console output - pretty format for development
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&config.file_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_error)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&config.error_file_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&config.file_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, error_guard, json_guard])
    }
}
