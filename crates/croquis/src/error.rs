//! Error types for Croquis operations.
//!
//! Editing a scene never fails. Errors only surface at the boundaries:
//! reading files, loading configuration, parsing scene files and names, and
//! handing a finished document to a host.

use std::{io, ops::Range};

use thiserror::Error;

use crate::scene::ParseLayoutError;

/// The main error type for Croquis operations.
///
/// # Diagnostic Variants
///
/// The `SceneFile` variant keeps the scene file text and, when known, the
/// byte span of the offending value, so callers can point at the exact spot.
#[derive(Debug, Error)]
pub enum CroquisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    SceneFile {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error(transparent)]
    UnknownLayout(#[from] ParseLayoutError),

    #[error("Export error: {0}")]
    Export(String),
}

impl CroquisError {
    /// Create a new `SceneFile` error with the associated source text.
    pub fn new_scene_file_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::SceneFile {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
