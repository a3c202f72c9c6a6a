use crate::{Error, Result};

const MAX_PATH_BYTES: usize = 4096;

/// Check that `path` can be used as a file key.
///
/// Paths are opaque: nothing is normalised and separators are kept as given.
/// `label` names the argument in error messages (`"source"`, `"destination"`, ...).
pub fn validate_path(path: &str, label: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{label} path cannot be empty")));
    }
    if path.len() > MAX_PATH_BYTES {
        return Err(Error::InvalidArgument(format!(
            "{label} path is too large ({} bytes; max {} bytes)",
            path.len(),
            MAX_PATH_BYTES
        )));
    }
    if path.contains('\0') {
        return Err(Error::InvalidArgument(format!(
            "{label} path must not contain NUL bytes"
        )));
    }
    Ok(())
}
