//! Command-line argument parsing for the Atoll driver.

use std::path::PathBuf;

use clap::Parser;

use crate::{DebugLayer, WorldConfig};

/// Atoll command-line arguments.
///
/// CLI values override settings loaded from `world.ron`.
#[derive(Parser, Debug)]
#[command(name = "atoll", about = "Atoll island terrain streamer")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vertices per tile side.
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Total map side length in world units.
    #[arg(long)]
    pub map_size: Option<u32>,

    /// Maximum quadtree subdivision depth.
    #[arg(long)]
    pub max_depth: Option<u8>,

    /// Debug layer to render instead of meshing.
    #[arg(long, value_enum)]
    pub debug_layer: Option<DebugLayer>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of driver ticks to run.
    #[arg(long, default_value_t = 64)]
    pub ticks: u32,
}

impl WorldConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.general.seed = seed;
        }
        if let Some(res) = args.resolution {
            self.general.resolution = res;
        }
        if let Some(size) = args.map_size {
            self.streamer.map_size = size;
        }
        if let Some(depth) = args.max_depth {
            self.streamer.max_depth = depth;
        }
        if let Some(layer) = args.debug_layer {
            self.debug.layer = Some(layer);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            seed: None,
            resolution: None,
            map_size: None,
            max_depth: None,
            debug_layer: None,
            log_level: None,
            config: None,
            ticks: 64,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = WorldConfig::default();
        let args = CliArgs {
            seed: Some(777),
            map_size: Some(1024),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.general.seed, 777);
        assert_eq!(config.streamer.map_size, 1024);
        // Non-overridden fields retain defaults
        assert_eq!(config.general.resolution, 64);
        assert_eq!(config.streamer.max_depth, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = WorldConfig::default();
        let mut config = WorldConfig::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }
}
