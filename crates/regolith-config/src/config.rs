//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level terrain tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain extent, resolution and generator selection.
    pub terrain: TerrainConfig,
    /// Rock scatter settings.
    pub rocks: RockConfig,
    /// Gaussian bump settings.
    pub gaussian: GaussianConfig,
    /// Mesh conversion and placement.
    pub mesh: MeshConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which features the generator stamps onto the heightfield.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    Flat,
    #[default]
    Rocks,
    Gaussian,
    GaussianWithRocks,
}

/// Terrain patch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Tag carried by the generated terrain.
    pub name: String,
    /// Extent along the column axis, in meters.
    pub length: f64,
    /// Extent along the row axis, in meters.
    pub width: f64,
    /// Meters between adjacent grid samples.
    pub horizontal_scale: f64,
    /// Meters per raw height unit.
    pub vertical_scale: f64,
    /// Seed for the height RNG.
    pub seed: u64,
    /// Generator to run.
    pub kind: GeneratorKind,
}

/// Rock scatter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RockConfig {
    /// Total fractional area covered by rocks, in (0, 1].
    pub coverage: f64,
    /// Smallest rock diameter counted, in meters.
    pub min_diameter: f64,
    /// Rock height range, in meters.
    pub min_height: f64,
    pub max_height: f64,
    /// Draw one height per rock instead of one per terrain.
    pub per_rock_height: bool,
}

/// Gaussian bump configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GaussianConfig {
    /// Bump radius in meters.
    pub radius: f64,
    /// Largest bump amplitude (either sign) in meters.
    pub max_height: f64,
    /// Spread of the bump profile.
    pub sigma: f64,
}

/// Mesh conversion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Rise-over-run above which edges become vertical. `None` disables the
    /// correction.
    pub slope_threshold: Option<f64>,
    /// World-space translation of the finished mesh.
    pub translation: [f32; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Truncate the synthesised field to 16-bit raw heights before meshing.
    pub quantize: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            name: "terrain".to_string(),
            length: 40.0,
            width: 40.0,
            horizontal_scale: 0.1,
            vertical_scale: 0.005,
            seed: 0,
            kind: GeneratorKind::default(),
        }
    }
}

impl Default for RockConfig {
    fn default() -> Self {
        Self {
            coverage: 0.15,
            min_diameter: 0.1,
            min_height: 0.1,
            max_height: 0.2,
            per_rock_height: false,
        }
    }
}

impl Default for GaussianConfig {
    fn default() -> Self {
        Self {
            radius: 15.0,
            max_height: 5.0,
            sigma: 0.4,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            slope_threshold: Some(0.15),
            translation: [-1.0, -1.0, 0.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quantize: true,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Pick the config directory: an explicit override, else the platform
    /// config dir joined with `regolith`.
    pub fn resolve_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(dir) => Ok(dir.to_path_buf()),
            None => dirs::config_dir()
                .map(|dir| dir.join("regolith"))
                .ok_or(ConfigError::NoConfigDir),
        }
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
