//! Crate-level error types.

use std::fmt;

/// Errors produced by the troupe crate.
#[derive(Debug)]
pub enum TroupeError {
    /// Alignment sources carry different numbers of points.
    PointCountMismatch {
        /// Index of the offending source.
        index: usize,
        /// Point count of the first source.
        expected: usize,
        /// Point count actually found.
        found: usize,
    },
    /// An alignment source is not a point-bearing prop.
    AlignmentSource {
        /// Index of the offending source.
        index: usize,
    },
    /// A symbolic 2D placement keyword names a vertical edge without a
    /// horizontal qualifier, or is not recognized at all.
    IncompletePosition(String),
    /// Archive descriptor parsing/serialization failure.
    ArchiveParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for TroupeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointCountMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "alignment source {index} has {found} points, expected {expected}"
            ),
            Self::AlignmentSource { index } => {
                write!(f, "alignment source {index} is not point-bearing")
            }
            Self::IncompletePosition(pos) => {
                write!(f, "incomplete position pos='{pos}'")
            }
            Self::ArchiveParse(msg) => {
                write!(f, "archive parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TroupeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TroupeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TroupeError {
    fn from(e: serde_json::Error) -> Self {
        Self::ArchiveParse(e.to_string())
    }
}
