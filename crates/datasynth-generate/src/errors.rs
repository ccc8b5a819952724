use thiserror::Error;

/// Errors emitted by the synthesis engine, the writers and the facade.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write {format} export: {source}")]
    Export {
        format: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl From<datasynth_core::Error> for GenerationError {
    fn from(value: datasynth_core::Error) -> Self {
        GenerationError::InvalidArgument(value.to_string())
    }
}
