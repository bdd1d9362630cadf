//! Terrain generation error types.

use crate::passes::GROUP_SIZE;

/// Configuration errors caught at world or generator initialization.
///
/// These are fatal: the pipeline never attempts to generate with an invalid
/// configuration, and there is no recovery path beyond fixing the config.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// No biomes were supplied to the generator.
    #[error("no biomes set in terrain generator")]
    EmptyBiomeList,

    /// Two biomes share the same name.
    #[error("duplicate biome name: {0}")]
    DuplicateBiomeName(String),

    /// A resolution was zero.
    #[error("{what} must be positive")]
    ZeroResolution {
        /// Which resolution field was invalid.
        what: &'static str,
    },

    /// A resolution is not dispatchable in whole thread groups.
    #[error("{what} {got} must be a multiple of the {GROUP_SIZE}-lane group size")]
    ResolutionNotGroupAligned {
        /// Which resolution field was invalid.
        what: &'static str,
        /// The offending value.
        got: usize,
    },
}
