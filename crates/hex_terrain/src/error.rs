//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, unresolved first-tile settings, catalog contract
//! violations and generic errors. Recoverable conditions during generation (malformed rules,
//! selection fallbacks) are reported as warnings, never through this type.
use thiserror::Error;

use crate::hex::Position;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("first tile type is not set")]
    MissingFirstTileType,

    #[error("unknown tile type id {id}")]
    UnknownTileType { id: usize },

    #[error("first tile position ({}, {}) is outside the grid bounds", position.x, position.y)]
    FirstTileOutOfBounds { position: Position },

    #[error("tile catalog is empty")]
    EmptyCatalog,

    #[error("catalog query needs a climate, a terrain type, or both")]
    InvalidCatalogQuery,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
