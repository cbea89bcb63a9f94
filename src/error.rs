//! Crate-level error type.

use thiserror::Error;

use crate::announcements::StoreError;
use crate::config::ConfigError;
use crate::press::{ArticleError, PressError};
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("generation failed: {0}")]
    Press(#[from] PressError),

    #[error("unusable reply: {0}")]
    Article(#[from] ArticleError),

    #[error("no article could be written for this turn")]
    EmptyEdition,

    #[error("failed to write {path}: {source}")]
    Output {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
