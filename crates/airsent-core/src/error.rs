//! Error types for airsent-core.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirsentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<AirsentError>,
    },

    #[error("Column '{column}' missing from {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Unknown sentiment label: {0}")]
    UnknownSentiment(String),

    #[error("Review text must not be empty")]
    EmptyReview,

    #[error("Review log writer closed")]
    ChannelClosed,

    #[error("{0}")]
    Other(String),
}

impl AirsentError {
    /// Wrap an error with the path of the file that was being read.
    pub fn load(path: impl Into<PathBuf>, source: AirsentError) -> Self {
        AirsentError::Load {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, AirsentError>;
