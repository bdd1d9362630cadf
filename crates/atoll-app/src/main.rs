//! Headless driver that streams an island world along a scripted flight path.
//!
//! Configuration is loaded from `world.ron` in the config directory (created
//! with defaults on first run) and can be overridden via CLI flags. Biome
//! assets are read from `biomes.ron` next to it when present. Run with
//! `cargo run -p atoll-app -- --ticks 128 --seed 7`.

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec3;
use tracing::{error, info};

use atoll_config::{BiomeConfig, CliArgs, Curve, WorldConfig};
use atoll_world::{HeadlessBackend, World};

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut config = match WorldConfig::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load world config: {err}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    atoll_log::init_logging(None, Some(&config));

    let (biomes, beach) = load_biomes(&config_dir);
    info!(
        seed = config.general.seed,
        resolution = config.general.resolution,
        map_size = config.streamer.map_size,
        max_depth = config.streamer.max_depth,
        biomes = biomes.len(),
        "starting streamer flight"
    );

    let map_size = config.streamer.map_size as f32;
    let mut world = match World::initialize(config, biomes, beach, HeadlessBackend::new()) {
        Ok(world) => world,
        Err(err) => {
            error!("world initialization failed: {err}");
            std::process::exit(1);
        }
    };

    // Fly a shrinking orbit: approach from outside the map, spiral into the
    // center, so the stream exercises spawning, subdivision, and collapse.
    for tick in 0..args.ticks {
        let t = tick as f32 / args.ticks.max(1) as f32;
        let radius = map_size * (1.2 - t);
        let angle = t * 12.0;
        let target = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);

        let stats = world.tick(target);
        if stats.subdivided + stats.collapsed + stats.reused + stats.spawned_new > 0 {
            info!(
                tick,
                x = target.x,
                z = target.z,
                subdivided = stats.subdivided,
                collapsed = stats.collapsed,
                reused = stats.reused,
                spawned_new = stats.spawned_new,
                active = world.streamer().active_tiles(),
                "streamed"
            );
        }
    }

    let backend = world.backend();
    let backend = backend.lock().expect("render backend poisoned");
    info!(
        ticks = world.ticks(),
        tiles_instantiated = world.streamer().total_tiles(),
        tiles_active = world.streamer().active_tiles(),
        tiles_pooled = world.streamer().pooled_tiles(),
        mesh_uploads = backend.upload_count(),
        debug_uploads = backend.debug_upload_count(),
        "flight complete"
    );
}

/// Load the biome list from `biomes.ron`, falling back to a built-in set.
///
/// The last entry of the file is the beach biome, matching how the assets
/// are authored; the built-in set mirrors those defaults.
fn load_biomes(config_dir: &Path) -> (Vec<BiomeConfig>, BiomeConfig) {
    let path = config_dir.join("biomes.ron");
    if let Ok(contents) = std::fs::read_to_string(&path) {
        match ron::from_str::<Vec<BiomeConfig>>(&contents) {
            Ok(mut biomes) if biomes.len() >= 2 => {
                let beach = biomes.pop().expect("length checked");
                info!(path = %path.display(), biomes = biomes.len(), "loaded biome assets");
                return (biomes, beach);
            }
            Ok(_) => error!(path = %path.display(), "biomes.ron needs at least two entries"),
            Err(err) => error!(path = %path.display(), "ignoring unparsable biomes.ron: {err}"),
        }
    }

    (default_biomes(), default_beach())
}

fn default_biomes() -> Vec<BiomeConfig> {
    vec![
        BiomeConfig {
            name: "lowlands".to_string(),
            scale: 5.0,
            octaves: 8,
            lacunarity: 2.0,
            persistence: 0.5,
            height_curve: Curve::identity(),
        },
        BiomeConfig {
            name: "highlands".to_string(),
            scale: 3.0,
            octaves: 6,
            lacunarity: 2.2,
            persistence: 0.55,
            // Push midtones upward for a plateaued profile.
            height_curve: Curve::linear(0.0, 0.2, 1.0, 1.0),
        },
        BiomeConfig {
            name: "mesas".to_string(),
            scale: 7.0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.35,
            height_curve: Curve::identity(),
        },
    ]
}

fn default_beach() -> BiomeConfig {
    BiomeConfig {
        name: "beach".to_string(),
        scale: 9.0,
        octaves: 3,
        lacunarity: 2.0,
        persistence: 0.5,
        // Beaches stay low regardless of raw noise.
        height_curve: Curve::linear(0.0, 0.0, 1.0, 0.15),
    }
}
