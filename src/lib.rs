#![forbid(unsafe_code)]

//! `filesys-db` stores a virtual filesystem as rows of a single SQL table.
//!
//! - `store`: backend trait + SQLite implementation
//! - `fs`: write/read/list/copy/move/delete keyed by path
//! - `migrations`: schema bootstrap for supported backends

pub mod fs;
pub mod migrations;
pub mod store;

pub use filesys_db_core::{Error, Result};
pub use fs::FileSysDb;
pub use store::{DeleteOutcome, FileMeta, FileRecord, Store};
