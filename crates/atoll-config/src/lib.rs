//! Configuration system for the Atoll terrain generator.
//!
//! World and biome settings persist to disk as RON files and are read-only at
//! runtime. Supports CLI overrides via clap and forward/backward compatible
//! serialization.

mod biome;
mod cli;
mod config;
mod curve;
mod error;

pub use biome::BiomeConfig;
pub use cli::CliArgs;
pub use config::{
    BiomeGridConfig, DebugConfig, DebugLayer, GeneralConfig, IslandConfig, MeshConfig,
    RiverConfig, StreamerConfig, WorldConfig,
};
pub use curve::{Curve, CurveKey, CurveLut, LUT_SAMPLES};
pub use error::ConfigError;
