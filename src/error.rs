use std::path::PathBuf;
use thiserror::Error;

/// Failures of the data provider. Any of these aborts the current request.
#[derive(Debug, Error)]
pub enum WebstatusError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Status data has no metadata section")]
    MissingMetadata,

    #[error("Invalid creation date in metadata: '{0}'")]
    InvalidCreationDate(String),

    #[error("Invalid record for {product} in {locale}: {reason}")]
    InvalidRecord {
        locale: String,
        product: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, WebstatusError>;
