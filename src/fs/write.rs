use filesys_db_core::Result;
use filesys_db_core::path::validate_path;

use super::FileSysDb;

pub(super) fn write_text<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
    content: &str,
) -> Result<()> {
    upsert(fs, path, false, content.as_bytes())
}

pub(super) fn write_bytes<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
    content: &[u8],
) -> Result<()> {
    upsert(fs, path, true, content)
}

fn upsert<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
    is_binary: bool,
    data: &[u8],
) -> Result<()> {
    validate_path(path, "file")?;
    fs.store.upsert_file(path, is_binary, data)?;
    tracing::debug!(path, is_binary, bytes = data.len(), "file written");
    Ok(())
}
