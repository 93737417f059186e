use std::io;

use interleave_io::ReadError;
use thiserror::Error;

/// Errors that may occur while interleaving inputs.
#[derive(Debug, Error)]
pub enum InterleaveError {
    /// An input could not be opened by its reader thread.
    #[error("failed to open input '{name}': {error}")]
    Open {
        name: String,
        #[source]
        error: io::Error,
    },

    /// Reading a character from an input failed.
    #[error("failed to read input '{name}': {error}")]
    Read {
        name: String,
        #[source]
        error: ReadError,
    },

    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// The OS refused to spawn a reader thread.
    #[error("failed to spawn reader thread: {0}")]
    Spawn(#[source] io::Error),

    /// A reader thread panicked.
    #[error("reader thread for '{name}' panicked")]
    ReaderPanicked { name: String },
}

/// A failure recorded by a reader thread, before the coordinator
/// attaches the input name to it.
#[derive(Debug)]
pub(crate) enum Failure {
    Open(io::Error),
    Read(ReadError),
    Panicked,
}

impl Failure {
    pub(crate) fn into_error(self, name: String) -> InterleaveError {
        match self {
            Self::Open(error) => InterleaveError::Open { name, error },
            Self::Read(error) => InterleaveError::Read { name, error },
            Self::Panicked => InterleaveError::ReaderPanicked { name },
        }
    }
}
