use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON5 config: {0}")]
    Json5(#[from] json5::Error),
    #[error("unknown theme `{0}` (expected `light` or `dark`)")]
    UnknownTheme(String),
    #[error("bounds minimum {min} must be below maximum {max}")]
    InvalidBounds { min: f64, max: f64 },
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("view window is empty or surface size is not positive")]
    InvalidView,
}
