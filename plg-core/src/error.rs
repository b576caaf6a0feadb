/// Errors raised while importing a PLG object
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which record list ran dry before the header's count was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Vertices,
    Polygons,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Vertices => write!(f, "vertices"),
            Section::Polygons => write!(f, "polygons"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlgError {
    #[error("couldn't open file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed header (line {line}): {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("truncated input: expected {expected} {section}, found {found}")]
    TruncatedInput {
        section: Section,
        expected: usize,
        found: usize,
    },

    #[error("invalid token {} on line {line}, expected {expected}", .token.as_deref().map_or("<missing>".to_string(), |t| format!("{t:?}")))]
    InvalidToken {
        line: usize,
        expected: &'static str,
        token: Option<String>,
    },

    #[error("invalid polygon vertex count {count} on line {line}")]
    InvalidPolygonVertexCount { line: usize, count: i64 },

    #[error("vertex index {index} on line {line} is out of range for {num_vertices} vertices")]
    VertexIndexOutOfRange {
        line: usize,
        index: i64,
        num_vertices: usize,
    },

    #[error("{what} capacity exceeded: {requested} requested, {capacity} allowed")]
    CapacityExceeded {
        what: &'static str,
        requested: usize,
        capacity: usize,
    },

    #[error("error with PLG file {}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<PlgError>,
    },
}

impl PlgError {
    /// The underlying error, looking through any file context
    pub fn root(&self) -> &PlgError {
        match self {
            PlgError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            PlgError::FileOpen { .. } | PlgError::InFile { .. } => self,
            other => PlgError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
