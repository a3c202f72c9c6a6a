use filesys_db_core::path::validate_path;
use filesys_db_core::{Error, Result};

use super::FileSysDb;

pub(super) fn move_file<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    source: &str,
    dest: &str,
    overwrite: bool,
) -> Result<()> {
    validate_path(source, "source")?;
    validate_path(dest, "destination")?;

    if source == dest {
        if fs.store.get_meta(source)?.is_none() {
            return Err(Error::NotFound(format!("source file does not exist: {source}")));
        }
        if !overwrite {
            return Err(Error::AlreadyExists(format!(
                "destination file already exists: {dest}"
            )));
        }
        return Ok(());
    }

    fs.store.rename_file(source, dest, overwrite)?;
    tracing::debug!(source, dest, overwrite, "file moved");
    Ok(())
}
