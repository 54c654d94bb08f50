//! Frame output: single PNG files and PNG sequences.

use std::path::Path;

use crate::foundation::error::{HeartError, HeartResult};

/// PNG writer and PNG-sequence sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> HeartResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| HeartError::io(parent, e))?;
    }
    Ok(())
}
