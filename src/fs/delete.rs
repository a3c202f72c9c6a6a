use filesys_db_core::Result;

use crate::store::DeleteOutcome;

use super::FileSysDb;

pub(super) fn delete<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
) -> Result<DeleteOutcome> {
    let outcome = fs.store.delete_file(path)?;
    match outcome {
        DeleteOutcome::Deleted => tracing::debug!(path, "file deleted"),
        DeleteOutcome::NotFound => tracing::info!(path, "no file found to delete"),
    }
    Ok(outcome)
}
