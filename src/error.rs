use std::path::PathBuf;

use thiserror::Error;

use crate::ir::Provider;

pub type Result<T> = std::result::Result<T, ProvenanceError>;

#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("Package database unavailable ({provider}): {message}")]
    CollaboratorUnavailable { provider: Provider, message: String },

    #[error("Package {package} is missing field '{field}'")]
    MissingField {
        package: String,
        field: &'static str,
    },

    #[error("Package {package} has invalid {field}: {value:?}")]
    InvalidField {
        package: String,
        field: &'static str,
        value: String,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProvenanceError {
    pub fn exit_code(&self) -> i32 {
        2
    }

    pub(crate) fn unavailable(provider: Provider, message: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable {
            provider,
            message: message.into(),
        }
    }
}
