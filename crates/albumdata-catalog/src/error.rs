use thiserror::Error;

use crate::library::Producer;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("album data is not a dictionary")]
    NotADictionary,

    #[error("{producer} version {version:?} not supported")]
    UnsupportedVersion { producer: Producer, version: String },
}
