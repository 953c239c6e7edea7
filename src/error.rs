use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    /// A field the resume cannot be rendered without was absent from the record
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// The drawing surface could not write the finished document
    #[error("failed to write document to {}: {source}", path.display())]
    SurfaceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The surface was asked to finalize a document it had already finalized
    #[error("document has already been finalized")]
    AlreadyFinalized,

    /// Page dimensions that leave no room for content
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// A page's content stream could not be rendered
    #[error("failed to render page contents: {0}")]
    Render(#[source] std::io::Error),

    #[error(transparent)]
    /// An I/O error occurred while reading input
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [serde_json] failed to parse a resume or configuration file
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing<S: ToString>(field: S) -> Error {
        Error::MissingField(field.to_string())
    }
}
