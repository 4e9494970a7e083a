//! Configuration for the terrain tools.
//!
//! Settings persist to disk as RON files, can be overridden from the command
//! line via clap, and deserialize with defaults for any missing field.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GaussianConfig, GeneratorKind, MeshConfig, RockConfig, TerrainConfig,
};
pub use error::ConfigError;
