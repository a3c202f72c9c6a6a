use filesys_db_core::pattern::LikeFilter;
use filesys_db_core::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub is_binary: bool,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    pub path: String,
    pub is_binary: bool,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub trait Store {
    fn get_meta(&mut self, path: &str) -> Result<Option<FileMeta>>;

    fn get_record(&mut self, path: &str) -> Result<Option<FileRecord>>;

    /// Insert or fully replace the record at `path`.
    fn upsert_file(&mut self, path: &str, is_binary: bool, data: &[u8]) -> Result<()>;

    /// Duplicate `source` (content and binary flag) under `dest`.
    ///
    /// Fails with `NotFound` if `source` is missing and `AlreadyExists` if `dest` is taken.
    fn copy_file(&mut self, source: &str, dest: &str) -> Result<()>;

    /// Rename `source` to `dest` in a single transaction.
    ///
    /// Precondition failures are reported as `NotFound`/`AlreadyExists`; anything that
    /// goes wrong after the first mutation is rolled back and reported as `MoveFailed`.
    fn rename_file(&mut self, source: &str, dest: &str, overwrite: bool) -> Result<()>;

    fn delete_file(&mut self, path: &str) -> Result<DeleteOutcome>;

    fn list_paths(&mut self, filter: &LikeFilter) -> Result<Vec<String>>;

    fn close(self) -> Result<()>
    where
        Self: Sized;
}

fn db_err(err: impl std::fmt::Display) -> Error {
    Error::Backend(err.to_string())
}

fn move_failed(source: &str, dest: &str, cause: Error) -> Error {
    Error::MoveFailed {
        from: source.to_string(),
        to: dest.to_string(),
        source: Box::new(cause),
    }
}

#[cfg(feature = "sqlite")]
pub mod sqlite;
