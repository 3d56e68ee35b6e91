//! Error taxonomy for catalog access and record normalization.

use thiserror::Error;

/// Failure while talking to the catalog or interpreting one of its records.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure or a non-success HTTP status other than 404.
    #[error("vgmdb request failed url={url}: {message}")]
    Transport { url: String, message: String },

    /// The catalog answered 404 for the requested resource.
    #[error("vgmdb resource not found url={url}")]
    NotFound { url: String },

    /// Response body is not JSON or lacks the expected envelope.
    #[error("vgmdb response decode failed url={url}: {message}")]
    Decode { url: String, message: String },

    /// A fetched record is missing a field or has an unsupported shape.
    #[error("malformed vgmdb record: {0}")]
    MalformedRecord(String),
}

impl CatalogError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        CatalogError::MalformedRecord(message.into())
    }

    /// `true` for failures that mean "no usable answer from the catalog"
    /// rather than a record the catalog served but we could not interpret.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, CatalogError::MalformedRecord(_))
    }
}
