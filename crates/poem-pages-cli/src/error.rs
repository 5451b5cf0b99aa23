use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use poem_pages::PoemError;
use poem_pages_render::LayoutError;

/// Batch generation error.
#[derive(Debug)]
pub enum GenerateError {
    /// Filesystem operation failed on `path`.
    Io { path: PathBuf, source: io::Error },
    /// Settings file could not be read or parsed.
    Settings { path: PathBuf, message: String },
    /// Poem corpus could not be loaded.
    Load(PoemError),
    /// Page formatting failed.
    Layout(LayoutError),
}

impl GenerateError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {}: {}", path.display(), source),
            Self::Settings { path, message } => {
                write!(f, "invalid settings file {}: {}", path.display(), message)
            }
            Self::Load(err) => write!(f, "poem load failed: {}", err),
            Self::Layout(err) => write!(f, "layout failed: {}", err),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Load(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Settings { .. } => None,
        }
    }
}

impl From<LayoutError> for GenerateError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<PoemError> for GenerateError {
    fn from(value: PoemError) -> Self {
        Self::Load(value)
    }
}
