//! Error types for txt2pdf.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that can occur while converting a directory of text files.
///
/// Only [`ConversionError::ListDirectory`] stops a batch; every other variant is scoped to one
/// file and reported before the next file is processed.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The working directory could not be enumerated.
    #[error("Unable to list directory {}: {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file could not be read.
    #[error("Unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// The document renderer failed to produce the PDF.
    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },
}

impl ConversionError {
    /// Returns the path the error relates to.
    pub fn path(&self) -> &Path {
        match self {
            Self::ListDirectory { path, .. }
            | Self::Read { path, .. }
            | Self::Decode { path, .. }
            | Self::Render { path, .. } => path,
        }
    }

    /// Returns whether the error aborts the whole batch rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ListDirectory { .. })
    }
}
