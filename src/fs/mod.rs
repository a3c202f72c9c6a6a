mod copy;
mod delete;
mod list;
mod read;
mod rename;
mod write;

use filesys_db_core::Result;

use crate::store::{DeleteOutcome, FileMeta, Store};

/// Filesystem-like operations over a [`Store`].
///
/// The handle is only reachable once the backing store is open. Dropping it releases
/// the connection; [`FileSysDb::close`] does the same but reports close errors.
#[derive(Debug)]
pub struct FileSysDb<S> {
    store: S,
}

impl<S: Store> FileSysDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_open {
    use std::path::Path;

    use filesys_db_core::Result;
    use filesys_db_core::config::StoreConfig;

    use super::FileSysDb;
    use crate::store::sqlite::SqliteStore;

    impl FileSysDb<SqliteStore> {
        /// Open the database at `location`, creating the file and schema when missing.
        pub fn open_or_create(location: impl AsRef<Path>) -> Result<Self> {
            Ok(Self::new(SqliteStore::open(location)?))
        }

        pub fn open_or_create_with_config(
            location: impl AsRef<Path>,
            config: &StoreConfig,
        ) -> Result<Self> {
            Ok(Self::new(SqliteStore::open_with_config(location, config)?))
        }

        pub fn open_in_memory() -> Result<Self> {
            Ok(Self::new(SqliteStore::open_in_memory()?))
        }
    }
}

impl<S: Store> FileSysDb<S> {
    pub fn write_text(&mut self, path: &str, content: &str) -> Result<()> {
        write::write_text(self, path, content)
    }

    pub fn write_bytes(&mut self, path: &str, content: &[u8]) -> Result<()> {
        write::write_bytes(self, path, content)
    }

    pub fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        read::read_bytes(self, path)
    }

    pub fn read_text(&mut self, path: &str) -> Result<String> {
        read::read_text(self, path)
    }

    /// Paths starting with `dir_prefix` that match `pattern`.
    ///
    /// `pattern` is a glob when it contains `*` or `?` and a plain substring otherwise;
    /// see [`filesys_db_core::pattern`] for the exact rules. Results are sorted.
    pub fn list(&mut self, dir_prefix: &str, pattern: &str) -> Result<Vec<String>> {
        list::list(self, dir_prefix, pattern)
    }

    pub fn list_all(&mut self, dir_prefix: &str) -> Result<Vec<String>> {
        list::list(self, dir_prefix, "")
    }

    pub fn copy(&mut self, source: &str, dest: &str) -> Result<()> {
        copy::copy(self, source, dest)
    }

    pub fn move_file(&mut self, source: &str, dest: &str, overwrite: bool) -> Result<()> {
        rename::move_file(self, source, dest, overwrite)
    }

    /// Remove `path`. A missing path is not an error.
    pub fn delete(&mut self, path: &str) -> Result<DeleteOutcome> {
        delete::delete(self, path)
    }

    pub fn exists(&mut self, path: &str) -> Result<bool> {
        Ok(self.store.get_meta(path)?.is_some())
    }

    pub fn stat(&mut self, path: &str) -> Result<Option<FileMeta>> {
        self.store.get_meta(path)
    }
}
