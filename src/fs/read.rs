use filesys_db_core::{Error, Result};

use super::FileSysDb;

pub(super) fn read_bytes<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
) -> Result<Vec<u8>> {
    let Some(record) = fs.store.get_record(path)? else {
        return Err(Error::NotFound(format!("file not found: {path}")));
    };
    Ok(record.data)
}

/// Decode the stored bytes as UTF-8, whichever API wrote them.
pub(super) fn read_text<S: crate::store::Store>(
    fs: &mut FileSysDb<S>,
    path: &str,
) -> Result<String> {
    let data = read_bytes(fs, path)?;
    if data.is_empty() {
        return Ok(String::new());
    }
    String::from_utf8(data).map_err(|source| Error::InvalidEncoding {
        path: path.to_string(),
        source,
    })
}
