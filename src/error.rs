//! Crate-level error type returned by the generation pipeline.

use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;
use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures of a generation run.
///
/// Content-level problems (malformed markup, unreachable or undecodable
/// images) never surface here; they degrade inside the document instead.
#[derive(Error, Debug)]
pub enum Error {
    /// XML part generation failed
    #[error(transparent)]
    Ooxml(OoxmlError),

    /// The package could not be assembled
    #[error(transparent)]
    Opc(#[from] OpcError),

    /// The output sink rejected the finished document
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Options could not be loaded
    #[error("Invalid options: {0}")]
    Config(String),
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Opc(e) => Error::Opc(e),
            other => Error::Ooxml(other),
        }
    }
}
