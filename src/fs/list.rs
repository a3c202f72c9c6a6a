use filesys_db_core::Result;
use filesys_db_core::pattern::LikeFilter;

use super::FileSysDb;

pub(super) fn list<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    dir_prefix: &str,
    pattern: &str,
) -> Result<Vec<String>> {
    let filter = LikeFilter::new(dir_prefix, pattern);
    let paths = fs.store.list_paths(&filter)?;
    tracing::debug!(dir_prefix, pattern, matches = paths.len(), "listed files");
    Ok(paths)
}
