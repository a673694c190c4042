//! Error types for shapeyard operations.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use crate::ShapeKind;

/// Errors raised while parsing, validating, constructing, or ingesting shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Raw text does not match the record grammar for the shape kind.
    Format {
        /// The kind of shape the text was meant to describe.
        kind: ShapeKind,
        /// The offending text.
        data: String,
    },
    /// Well-formed data violates a domain rule.
    Invariant {
        /// The kind of shape whose invariant failed.
        kind: ShapeKind,
        /// The violated rule.
        message: String,
    },
    /// A factory could not build a shape; wraps the format or invariant failure.
    Construction {
        /// The kind of shape the factory builds.
        kind: ShapeKind,
        /// The underlying failure.
        source: Box<GeometryError>,
    },
    /// An ingestion source does not exist.
    FileNotFound(PathBuf),
    /// An ingestion source exists but could not be read.
    Io(String),
    /// A coordinate plane name other than `xy`, `xz`, or `yz`.
    InvalidPlane(String),
    /// A shape kind name other than `point`, `triangle`, or `sphere`.
    UnknownKind(String),
    /// A metric name other than `area`, `perimeter`, or `volume`.
    UnknownMetric(String),
}

impl GeometryError {
    /// Creates a format error for `kind` carrying the offending `data`.
    pub fn format(kind: ShapeKind, data: impl Into<String>) -> Self {
        Self::Format {
            kind,
            data: data.into(),
        }
    }

    /// Creates an invariant error for `kind`.
    pub fn invariant(kind: ShapeKind, message: impl Into<String>) -> Self {
        Self::Invariant {
            kind,
            message: message.into(),
        }
    }

    /// Wraps `source` as a construction failure for `kind`.
    pub fn construction(kind: ShapeKind, source: GeometryError) -> Self {
        Self::Construction {
            kind,
            source: Box::new(source),
        }
    }

    /// Returns the shape kind this error concerns, if any.
    pub fn kind(&self) -> Option<ShapeKind> {
        match self {
            Self::Format { kind, .. }
            | Self::Invariant { kind, .. }
            | Self::Construction { kind, .. } => Some(*kind),
            Self::FileNotFound(_)
            | Self::Io(_)
            | Self::InvalidPlane(_)
            | Self::UnknownKind(_)
            | Self::UnknownMetric(_) => None,
        }
    }
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Format { kind, data } => write!(f, "Invalid {} data format: {}", kind, data),
            Self::Invariant { message, .. } => write!(f, "{}", message),
            Self::Construction { kind, source } => {
                write!(f, "Failed to create {}: {}", kind, source)
            }
            Self::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::InvalidPlane(plane) => write!(f, "Invalid coordinate plane: {}", plane),
            Self::UnknownKind(kind) => write!(f, "Unknown shape kind: '{}'", kind),
            Self::UnknownMetric(metric) => write!(f, "Unknown metric: '{}'", metric),
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Construction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration file is neither valid JSON nor valid YAML.
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(msg) => write!(f, "Failed to read config: {}", msg),
            Self::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
