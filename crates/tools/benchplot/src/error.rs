//! Error types for the benchmark plotting pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort the pipeline.
#[derive(Debug)]
pub enum Error {
    /// A record was routed to a series with a different label.
    LabelMismatch {
        /// Label of the series being extended.
        expected: String,
        /// Label carried by the offending record.
        found: String,
    },
    /// Reading or writing a file failed.
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A font could not be loaded or registered.
    Font(String),
    /// The drawing backend reported an error.
    Draw(String),
    /// A configuration value is out of range.
    Config(String),
}

impl Error {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelMismatch { expected, found } => {
                write!(f, "record labelled '{found}' added to series '{expected}'")
            }
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Font(msg) => write!(f, "font error: {msg}"),
            Self::Draw(msg) => write!(f, "drawing error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why a linear trend could not be fitted to a series.
///
/// Recoverable: the renderer still plots the points and omits the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// Fewer than two samples.
    TooFewPoints {
        /// Series label.
        label: String,
        /// Number of samples available.
        count: usize,
    },
    /// Every sample shares the same size, so the slope is undefined.
    DegenerateSizes {
        /// Series label.
        label: String,
        /// The single size value present.
        size: u64,
    },
}

impl FitError {
    /// Label of the series the fit was attempted on.
    pub fn label(&self) -> &str {
        match self {
            Self::TooFewPoints { label, .. } | Self::DegenerateSizes { label, .. } => label,
        }
    }
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { label, count } => {
                write!(f, "series '{label}' has {count} point(s), need at least 2")
            }
            Self::DegenerateSizes { label, size } => {
                write!(f, "series '{label}' has every sample at size {size}")
            }
        }
    }
}

impl std::error::Error for FitError {}
