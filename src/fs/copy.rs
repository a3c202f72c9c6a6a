use filesys_db_core::Result;
use filesys_db_core::path::validate_path;

use super::FileSysDb;

pub(super) fn copy<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    source: &str,
    dest: &str,
) -> Result<()> {
    validate_path(source, "source")?;
    validate_path(dest, "destination")?;

    fs.store.copy_file(source, dest)?;
    tracing::debug!(source, dest, "file copied");
    Ok(())
}
