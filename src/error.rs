//! Error types for poem parsing and loading.

use core::fmt;

/// Coarse classification of a [`PoemError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoemErrorKind {
    /// Filesystem access failed.
    Io,
    /// Payload was not valid JSON or had an unexpected shape.
    Json,
    /// Input directory is missing or not a directory.
    Root,
}

impl fmt::Display for PoemErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::Json => write!(f, "json"),
            Self::Root => write!(f, "root"),
        }
    }
}

/// Structured error for poem loading operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemError {
    /// Error classification.
    pub kind: PoemErrorKind,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional file or directory path context.
    pub path: Option<Box<str>>,
}

impl PoemError {
    pub(crate) fn new(kind: PoemErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into().into_boxed_str(),
            path: None,
        }
    }

    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into().into_boxed_str());
        self
    }
}

impl fmt::Display for PoemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.kind, self.code, self.message)?;
        if let Some(path) = self.path.as_deref() {
            write!(f, " [path={}]", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for PoemError {}

impl From<serde_json::Error> for PoemError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(PoemErrorKind::Json, "POEM_JSON_INVALID", err.to_string())
    }
}

impl From<std::io::Error> for PoemError {
    fn from(err: std::io::Error) -> Self {
        Self::new(PoemErrorKind::Io, "POEM_IO", err.to_string())
    }
}
