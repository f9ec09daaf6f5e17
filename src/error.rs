use thiserror::Error;

use crate::domain::error::{DomainError, LadderError};
use crate::domain::{CycleIndex, ProjectId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Persistence errors raised by book stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    #[error("cycle conflict for project {project}: expected {expected}, stored {stored}")]
    Conflict {
        project: ProjectId,
        expected: CycleIndex,
        stored: CycleIndex,
    },

    #[error("refusing to move project {project} back from cycle {stored} to {incoming}")]
    CycleRegression {
        project: ProjectId,
        stored: CycleIndex,
        incoming: CycleIndex,
    },

    #[error("book file is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ladder(#[from] LadderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
