//! Error types for protgraph-core

use std::fmt;
use thiserror::Error;

/// Graph error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed parameter (empty interaction id, bundle without aliases, ...)
    InvalidArgument,
    /// Identifier or handle does not resolve to a live node
    NotFound,
    /// Graph handed to `union` is internally inconsistent
    InvalidGraph,
    /// Configuration errors
    Config,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidGraph => "invalid_graph",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Graph error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct GraphError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl GraphError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn not_found(identifier: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("Node not found: {}", identifier),
        )
    }

    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGraph, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<serde_yaml::Error> for GraphError {
    fn from(err: serde_yaml::Error) -> Self {
        GraphError::config(format!("YAML error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::new(ErrorKind::IO, format!("IO error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
