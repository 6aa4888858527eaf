use std::path::PathBuf;
use thiserror::Error;

use crate::core::logging::LoggingError;
use crate::core::settings::SettingsError;
use crate::records::Kind;

/// Errors raised while turning a document into a record or back.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Front matter block is missing its closing delimiter")]
    Unterminated,

    #[error("Failed to parse front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Front matter must be a mapping")]
    NotAMapping,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

impl CodecError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        CodecError::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// Errors surfaced by a record store to its callers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("No {kind} record with id {id}")]
    NotFound { kind: Kind, id: String },

    #[error("A {kind} record with id {id} already exists")]
    Conflict { kind: Kind, id: String },

    #[error("Invalid record: {0}")]
    Invalid(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn not_found(kind: Kind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn conflict(kind: Kind, id: impl Into<String>) -> Self {
        StoreError::Conflict {
            kind,
            id: id.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Top-level failure of the service entry point.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
