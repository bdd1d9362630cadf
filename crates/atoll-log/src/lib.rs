//! Structured logging for the Atoll terrain streamer.
//!
//! Provides span-based, filterable logging via the `tracing` ecosystem:
//! console output with an uptime timer and module paths, optional plain-text
//! file logging for post-mortem analysis, and integration with the world
//! config's `log_level` override.

use std::path::Path;

use atoll_config::WorldConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the Atoll driver.
///
/// Filter precedence: `RUST_LOG` environment variable, then the config's
/// `debug.log_level`, then `"info"`. Generation worker threads are named, so
/// thread names are included in console output.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for a plain-text log file
/// * `config` - Optional configuration to use for log level override
pub fn init_logging(log_dir: Option<&Path>, config: Option<&WorldConfig>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => "info".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("atoll.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime());

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,atoll_terrain=trace",
            "warn,atoll_lod=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_config_log_level_is_used() {
        let mut config = WorldConfig::default();
        config.debug.log_level = "atoll_world=debug".to_string();
        // init_logging can only run once per process; validate the filter
        // string construction path instead.
        let filter = EnvFilter::new(&config.debug.log_level);
        assert!(format!("{filter}").contains("atoll_world=debug"));
    }

    #[test]
    fn test_log_file_path_construction() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("atoll.log");
        assert_eq!(log_file_path.file_name().unwrap(), "atoll.log");
    }
}
