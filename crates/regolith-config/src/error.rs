//! Errors raised while locating, reading or writing `config.ron`.

/// Configuration I/O and parse failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither `--config` nor a platform config directory is available.
    #[error("no config directory: pass --config or set a platform config dir")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file exists but is not valid RON for [`crate::Config`].
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
