#![cfg(feature = "sqlite")]

use filesys_db::store::Store;
use filesys_db::store::sqlite::SqliteStore;
use filesys_db::{DeleteOutcome, FileSysDb};
use filesys_db_core::config::StoreConfig;

fn open_fs() -> FileSysDb<SqliteStore> {
    FileSysDb::open_in_memory().expect("open sqlite")
}

fn sorted(mut paths: Vec<String>) -> Vec<String> {
    paths.sort();
    paths
}

#[test]
fn bytes_roundtrip() {
    let mut fs = open_fs();
    let data = vec![0u8, 1, 2, 255, 254, 0, 10];
    fs.write_bytes("bin/blob", &data).expect("write");
    assert_eq!(fs.read_bytes("bin/blob").expect("read"), data);

    fs.write_bytes("bin/empty", &[]).expect("write empty");
    assert!(fs.read_bytes("bin/empty").expect("read empty").is_empty());
}

#[test]
fn text_roundtrip() {
    let mut fs = open_fs();
    fs.write_text("docs/a.txt", "héllo\nwörld ✓").expect("write");
    assert_eq!(fs.read_text("docs/a.txt").expect("read"), "héllo\nwörld ✓");

    fs.write_text("docs/empty.txt", "").expect("write empty");
    assert_eq!(fs.read_text("docs/empty.txt").expect("read empty"), "");
}

#[test]
fn write_replaces_content_and_binary_flag() {
    let mut fs = open_fs();
    fs.write_bytes("a", b"binary").unwrap();
    assert!(fs.stat("a").unwrap().expect("meta").is_binary);

    fs.write_text("a", "text again").unwrap();
    let meta = fs.stat("a").unwrap().expect("meta");
    assert!(!meta.is_binary);
    assert_eq!(meta.size_bytes, 10);
    assert_eq!(fs.read_text("a").unwrap(), "text again");
    assert_eq!(fs.list_all("").unwrap(), vec!["a".to_string()]);
}

#[test]
fn write_rejects_blank_path() {
    let mut fs = open_fs();
    let err = fs.write_text("  ", "x").expect_err("blank path");
    assert_eq!(err.code(), "invalid_argument");
}

#[test]
fn read_missing_is_not_found() {
    let mut fs = open_fs();
    assert_eq!(fs.read_bytes("nope").expect_err("missing").code(), "not_found");
    assert_eq!(fs.read_text("nope").expect_err("missing").code(), "not_found");
}

#[test]
fn read_text_of_invalid_utf8_is_invalid_encoding() {
    let mut fs = open_fs();
    fs.write_bytes("bin/blob", &[0xff, 0xfe, 0xfd]).unwrap();
    let err = fs.read_text("bin/blob").expect_err("invalid utf-8");
    assert_eq!(err.code(), "invalid_encoding");
    assert_eq!(fs.read_bytes("bin/blob").unwrap(), vec![0xff, 0xfe, 0xfd]);
}

#[test]
fn read_text_decodes_bytes_written_as_binary() {
    let mut fs = open_fs();
    fs.write_bytes("root/folder1/file2.bin", b"hello DB").unwrap();
    assert_eq!(fs.read_text("root/folder1/file2.bin").unwrap(), "hello DB");
}

#[test]
fn delete_missing_is_a_noop() {
    let mut fs = open_fs();
    fs.write_text("keep", "x").unwrap();

    let outcome = fs.delete("nope").expect("delete missing");
    assert_eq!(outcome, DeleteOutcome::NotFound);
    assert_eq!(fs.list_all("").unwrap(), vec!["keep".to_string()]);

    assert_eq!(fs.delete("keep").unwrap(), DeleteOutcome::Deleted);
    assert!(!fs.exists("keep").unwrap());
    assert_eq!(fs.delete("keep").unwrap(), DeleteOutcome::NotFound);
}

#[test]
fn list_glob_and_substring() {
    let mut fs = open_fs();
    fs.write_text("root/f1.txt", "hello").unwrap();
    fs.write_text("root/f2.txt", "world").unwrap();
    fs.write_text("root/sub/f10.bin", "x").unwrap();
    fs.write_text("other/f1.txt", "elsewhere").unwrap();

    let txt = sorted(fs.list("root", "*.txt").unwrap());
    assert_eq!(txt, vec!["root/f1.txt".to_string(), "root/f2.txt".to_string()]);

    let f1 = sorted(fs.list("root", "f1").unwrap());
    assert_eq!(
        f1,
        vec!["root/f1.txt".to_string(), "root/sub/f10.bin".to_string()]
    );
    assert!(f1.iter().all(|path| path.contains("f1")));

    let one_char = sorted(fs.list("root", "f?.txt").unwrap());
    assert_eq!(
        one_char,
        vec!["root/f1.txt".to_string(), "root/f2.txt".to_string()]
    );

    assert_eq!(fs.list_all("root").unwrap().len(), 3);
    assert_eq!(fs.list_all("").unwrap().len(), 4);
    assert!(fs.list("missing", "*").unwrap().is_empty());
}

#[test]
fn list_dot_matches_any_single_character_in_globs() {
    let mut fs = open_fs();
    fs.write_text("root/f1.txt", "a").unwrap();
    fs.write_text("root/f1xtxt", "b").unwrap();

    let glob = sorted(fs.list("root", "*.txt").unwrap());
    assert_eq!(
        glob,
        vec!["root/f1.txt".to_string(), "root/f1xtxt".to_string()]
    );

    // Without a wildcard the dot is literal.
    assert_eq!(fs.list("root", ".txt").unwrap(), vec!["root/f1.txt".to_string()]);
}

#[test]
fn list_treats_like_metacharacters_literally() {
    let mut fs = open_fs();
    fs.write_text("a_dir/x", "1").unwrap();
    fs.write_text("abdir/x", "2").unwrap();
    fs.write_text("c/100%", "3").unwrap();
    fs.write_text("c/1000", "4").unwrap();

    assert_eq!(fs.list_all("a_").unwrap(), vec!["a_dir/x".to_string()]);
    assert_eq!(fs.list("c", "0%").unwrap(), vec!["c/100%".to_string()]);
}

#[test]
fn list_is_case_insensitive_unless_configured() {
    let mut fs = open_fs();
    fs.write_text("Root/F1.txt", "x").unwrap();
    assert_eq!(fs.list("root", "f1").unwrap(), vec!["Root/F1.txt".to_string()]);

    let config = StoreConfig {
        case_sensitive_like: true,
        ..StoreConfig::default()
    };
    let conn = rusqlite::Connection::open_in_memory().expect("open");
    let mut fs = FileSysDb::new(SqliteStore::new_with_config(conn, &config).expect("store"));
    fs.write_text("Root/F1.txt", "x").unwrap();
    assert!(fs.list("root", "f1").unwrap().is_empty());
    assert_eq!(fs.list("Root", "F1").unwrap(), vec!["Root/F1.txt".to_string()]);
}

#[test]
fn copy_duplicates_content_and_binary_flag() {
    let mut fs = open_fs();
    fs.write_bytes("a.bin", &[1, 2, 3]).unwrap();
    fs.write_text("a.txt", "text").unwrap();

    fs.copy("a.bin", "b.bin").expect("copy binary");
    fs.copy("a.txt", "b.txt").expect("copy text");

    assert_eq!(fs.read_bytes("a.bin").unwrap(), vec![1, 2, 3]);
    assert_eq!(fs.read_bytes("b.bin").unwrap(), vec![1, 2, 3]);
    assert!(fs.stat("b.bin").unwrap().expect("meta").is_binary);
    assert!(!fs.stat("b.txt").unwrap().expect("meta").is_binary);
    assert_eq!(fs.read_text("b.txt").unwrap(), "text");
}

#[test]
fn copy_errors_leave_store_unchanged() {
    let mut fs = open_fs();
    fs.write_text("a", "one").unwrap();
    fs.write_text("b", "two").unwrap();

    let err = fs.copy("a", "b").expect_err("destination exists");
    assert_eq!(err.code(), "already_exists");
    assert_eq!(fs.read_text("a").unwrap(), "one");
    assert_eq!(fs.read_text("b").unwrap(), "two");

    let err = fs.copy("missing", "c").expect_err("source missing");
    assert_eq!(err.code(), "not_found");
    assert!(!fs.exists("c").unwrap());

    let err = fs.copy("", "c").expect_err("blank source");
    assert_eq!(err.code(), "invalid_argument");
    let err = fs.copy("a", " ").expect_err("blank destination");
    assert_eq!(err.code(), "invalid_argument");
}

#[test]
fn move_without_overwrite_refuses_existing_destination() {
    let mut fs = open_fs();
    fs.write_text("a", "one").unwrap();
    fs.write_text("b", "two").unwrap();

    let err = fs.move_file("a", "b", false).expect_err("destination exists");
    assert_eq!(err.code(), "already_exists");
    assert_eq!(fs.read_text("a").unwrap(), "one");
    assert_eq!(fs.read_text("b").unwrap(), "two");
}

#[test]
fn move_with_overwrite_replaces_destination() {
    let mut fs = open_fs();
    fs.write_text("root/a.txt", "from a").unwrap();
    fs.write_bytes("root/b.txt", &[9, 9, 9]).unwrap();

    fs.move_file("root/a.txt", "root/b.txt", true).expect("move");

    let err = fs.read_text("root/a.txt").expect_err("source gone");
    assert_eq!(err.code(), "not_found");
    assert_eq!(fs.read_text("root/b.txt").unwrap(), "from a");
    assert!(!fs.stat("root/b.txt").unwrap().expect("meta").is_binary);
    assert_eq!(fs.list_all("root").unwrap(), vec!["root/b.txt".to_string()]);
}

#[test]
fn move_to_free_destination_keeps_binary_flag() {
    let mut fs = open_fs();
    fs.write_bytes("root/folder1/file2.bin", b"hello DB").unwrap();

    fs.move_file("root/folder1/file2.bin", "root/folderX/moved.bin", false)
        .expect("move");

    assert!(!fs.exists("root/folder1/file2.bin").unwrap());
    let meta = fs.stat("root/folderX/moved.bin").unwrap().expect("meta");
    assert!(meta.is_binary);
    assert_eq!(meta.size_bytes, 8);
}

#[test]
fn move_validates_arguments_and_source() {
    let mut fs = open_fs();
    fs.write_text("a", "one").unwrap();

    let err = fs.move_file("missing", "b", true).expect_err("source missing");
    assert_eq!(err.code(), "not_found");
    let err = fs.move_file("", "b", true).expect_err("blank source");
    assert_eq!(err.code(), "invalid_argument");
    let err = fs.move_file("a", "\t", true).expect_err("blank destination");
    assert_eq!(err.code(), "invalid_argument");
    assert_eq!(fs.read_text("a").unwrap(), "one");
}

#[test]
fn move_onto_itself() {
    let mut fs = open_fs();
    fs.write_text("a", "one").unwrap();

    fs.move_file("a", "a", true).expect("self move with overwrite");
    assert_eq!(fs.read_text("a").unwrap(), "one");

    let err = fs.move_file("a", "a", false).expect_err("self move without overwrite");
    assert_eq!(err.code(), "already_exists");

    let err = fs.move_file("missing", "missing", true).expect_err("missing");
    assert_eq!(err.code(), "not_found");
}

#[test]
fn failed_move_rolls_back_overwrite_delete() {
    let conn = rusqlite::Connection::open_in_memory().expect("open");
    let mut fs = FileSysDb::new(SqliteStore::new(conn).expect("store"));
    fs.write_text("a", "one").unwrap();
    fs.write_text("b", "two").unwrap();

    fs.store_mut()
        .connection()
        .execute_batch(
            "CREATE TRIGGER block_rename BEFORE UPDATE OF path ON files
             BEGIN
                 SELECT RAISE(ABORT, 'rename blocked');
             END;",
        )
        .expect("create trigger");

    let err = fs.move_file("a", "b", true).expect_err("rename blocked");
    assert_eq!(err.code(), "move_failed");
    let cause = std::error::Error::source(&err).expect("cause");
    assert!(cause.to_string().contains("rename blocked"));

    assert_eq!(fs.read_text("a").unwrap(), "one");
    assert_eq!(fs.read_text("b").unwrap(), "two");
}

#[test]
fn open_or_create_is_idempotent_and_durable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db = dir.path().join("filesys.db");

    let mut fs = FileSysDb::open_or_create(&db).expect("create");
    fs.write_text("root/folder1/file.txt", "persisted").unwrap();
    fs.close().expect("close");

    let mut fs = FileSysDb::open_or_create(&db).expect("reopen");
    assert_eq!(fs.read_text("root/folder1/file.txt").unwrap(), "persisted");

    let journal_mode: String = fs
        .store_mut()
        .connection()
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .expect("journal mode");
    assert_eq!(journal_mode.to_ascii_lowercase(), "wal");
}

#[test]
fn store_trait_exposes_records() {
    let mut store = SqliteStore::open_in_memory().expect("open");
    store.upsert_file("x", true, &[7, 8]).expect("upsert");

    let record = store.get_record("x").expect("get").expect("record");
    assert_eq!(record.path, "x");
    assert!(record.is_binary);
    assert_eq!(record.data, vec![7, 8]);
    assert!(store.get_record("y").expect("get").is_none());

    store.close().expect("close");
}
