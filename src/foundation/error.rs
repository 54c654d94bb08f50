use std::path::PathBuf;

/// Convenience result type used across heartline.
pub type HeartResult<T> = Result<T, HeartError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum HeartError {
    /// Precondition violation: bad sample count, unknown display style, invalid settings.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A file could not be opened, read, written, or flushed.
    #[error("io error on '{}': {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A coordinate row did not hold exactly two finite numbers.
    #[error("parse error in '{}' at line {line}: {message}", path.display())]
    Parse {
        /// File (or source label) being read.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// Failures while rasterizing or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeartError {
    /// Build a [`HeartError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`HeartError::Io`] value for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`HeartError::Parse`] value for `line` (1-based) of `path`.
    pub fn parse(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: msg.into(),
        }
    }

    /// Build a [`HeartError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
