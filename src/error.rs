//! Scene configuration errors

/// Why a scene config could not be loaded, saved or accepted
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file missing or unreadable
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Config file or its directory could not be written
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Not valid scene JSON
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A parameter outside its physical domain (NaN, zero mass, damping > 1, ...)
    #[error("invalid value for `{field}`: {value} ({reason})")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}
