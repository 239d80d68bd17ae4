//! Error types for vizplay.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the library intake and the audio backend.
///
/// None of these are fatal to the player: the controller logs them and
/// leaves its state unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The default output device could not be opened.
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    /// A track file could not be opened.
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A track file could not be decoded.
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// Seeking inside the current source failed.
    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),

    /// Play/seek was requested with nothing loaded.
    #[error("no track loaded")]
    NothingLoaded,

    /// Configuration could not be read.
    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration was read but is not usable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vizplay operations.
pub type Result<T> = std::result::Result<T, Error>;
