use std::path::Path;
use std::time::Duration;

use rusqlite::{OptionalExtension, TransactionBehavior};

use filesys_db_core::config::StoreConfig;
use filesys_db_core::pattern::LikeFilter;
use filesys_db_core::{Error, Result};

use super::{DeleteOutcome, FileMeta, FileRecord, Store, db_err, move_failed};

pub struct SqliteStore {
    conn: rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteStore {
    pub fn new(conn: rusqlite::Connection) -> Result<Self> {
        Self::new_with_config(conn, &StoreConfig::default())
    }

    pub fn new_with_config(conn: rusqlite::Connection, config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(db_err)?;

        let requested = config.journal_mode.as_pragma_value();
        let granted: String = conn
            .pragma_update_and_check(None, "journal_mode", requested, |row| row.get(0))
            .map_err(db_err)?;
        // In-memory databases cannot use WAL; SQLite answers with the mode it kept.
        if !granted.eq_ignore_ascii_case(requested) {
            tracing::debug!(requested, granted = %granted, "journal mode not applied");
        }

        conn.pragma_update(None, "case_sensitive_like", config.case_sensitive_like)
            .map_err(db_err)?;

        crate::migrations::migrate_sqlite(&conn).map_err(db_err)?;
        Ok(Self { conn })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &StoreConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self> {
        let conn = rusqlite::Connection::open(path).map_err(db_err)?;
        Self::new_with_config(conn, config)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(db_err)?;
        Self::new(conn)
    }

    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn get_meta(&mut self, path: &str) -> Result<Option<FileMeta>> {
        self.conn
            .query_row(
                "SELECT is_binary, length(data) FROM files WHERE path = ?1",
                rusqlite::params![path],
                |row| {
                    Ok(FileMeta {
                        path: path.to_string(),
                        is_binary: row.get::<_, bool>(0)?,
                        size_bytes: i64_to_u64_sql(row.get::<_, i64>(1)?, "size_bytes")?,
                    })
                },
            )
            .optional()
            .map_err(db_err)
    }

    fn get_record(&mut self, path: &str) -> Result<Option<FileRecord>> {
        self.conn
            .query_row(
                "SELECT is_binary, data FROM files WHERE path = ?1",
                rusqlite::params![path],
                |row| {
                    Ok(FileRecord {
                        path: path.to_string(),
                        is_binary: row.get::<_, bool>(0)?,
                        data: row.get::<_, Vec<u8>>(1)?,
                    })
                },
            )
            .optional()
            .map_err(db_err)
    }

    fn upsert_file(&mut self, path: &str, is_binary: bool, data: &[u8]) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO files (path, is_binary, data) VALUES (?1, ?2, ?3)",
                rusqlite::params![path, is_binary, data],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn copy_file(&mut self, source: &str, dest: &str) -> Result<()> {
        if !path_exists(&self.conn, source)? {
            return Err(Error::NotFound(format!("source file does not exist: {source}")));
        }
        if path_exists(&self.conn, dest)? {
            return Err(already_exists(dest));
        }

        let res = self.conn.execute(
            "INSERT INTO files (path, is_binary, data)
             SELECT ?1, is_binary, data FROM files WHERE path = ?2",
            rusqlite::params![dest, source],
        );
        match res {
            Ok(1) => Ok(()),
            Ok(_) => Err(Error::NotFound(format!("source file does not exist: {source}"))),
            Err(err) if is_unique_constraint_violation(&err) => Err(already_exists(dest)),
            Err(err) => Err(db_err(err)),
        }
    }

    fn rename_file(&mut self, source: &str, dest: &str, overwrite: bool) -> Result<()> {
        // IMMEDIATE takes the write lock up front so the checks below stay valid.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        if !path_exists(&tx, source)? {
            return Err(Error::NotFound(format!("source file does not exist: {source}")));
        }
        if !overwrite && path_exists(&tx, dest)? {
            return Err(already_exists(dest));
        }

        match apply_rename(&tx, source, dest, overwrite) {
            Ok(()) => tx
                .commit()
                .map_err(|err| move_failed(source, dest, db_err(err))),
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!(err = %rollback_err, source, dest, "move rollback failed");
                }
                Err(move_failed(source, dest, err))
            }
        }
    }

    fn delete_file(&mut self, path: &str) -> Result<DeleteOutcome> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM files WHERE path = ?1",
                rusqlite::params![path],
            )
            .map_err(db_err)?;
        if deleted == 0 {
            return Ok(DeleteOutcome::NotFound);
        }
        Ok(DeleteOutcome::Deleted)
    }

    fn list_paths(&mut self, filter: &LikeFilter) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT path
                 FROM files
                 WHERE path LIKE ?1 ESCAPE '\\' AND path LIKE ?2 ESCAPE '\\'
                 ORDER BY path",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(rusqlite::params![filter.prefix, filter.pattern], |row| {
                row.get::<_, String>(0)
            })
            .map_err(db_err)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(db_err)?);
        }
        Ok(out)
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| db_err(err))
    }
}

fn apply_rename(
    conn: &rusqlite::Connection,
    source: &str,
    dest: &str,
    overwrite: bool,
) -> Result<()> {
    if overwrite {
        conn.execute(
            "DELETE FROM files WHERE path = ?1",
            rusqlite::params![dest],
        )
        .map_err(db_err)?;
    }

    let updated = conn
        .execute(
            "UPDATE files SET path = ?1 WHERE path = ?2",
            rusqlite::params![dest, source],
        )
        .map_err(db_err)?;
    if updated != 1 {
        return Err(Error::Backend(format!(
            "expected to rename 1 row, renamed {updated}"
        )));
    }
    Ok(())
}

fn path_exists(conn: &rusqlite::Connection, path: &str) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM files WHERE path = ?1",
        rusqlite::params![path],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|row| row.is_some())
    .map_err(db_err)
}

fn already_exists(dest: &str) -> Error {
    Error::AlreadyExists(format!("destination file already exists: {dest}"))
}

fn i64_to_u64_sql(value: i64, field: &'static str) -> rusqlite::Result<u64> {
    u64::try_from(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid negative {field} value: {value}"),
            )),
        )
    })
}

fn is_unique_constraint_violation(err: &rusqlite::Error) -> bool {
    use rusqlite::Error::SqliteFailure;
    match err {
        SqliteFailure(code, _) => {
            matches!(code.code, rusqlite::ErrorCode::ConstraintViolation)
        }
        _ => false,
    }
}
