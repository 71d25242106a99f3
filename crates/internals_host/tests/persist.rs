use std::fs;
use std::sync::Arc;

use internals_host::{ensure_dump_dir, DumpWriter};
use tempfile::TempDir;

fn fixed_clock(ms: i64) -> internals_host::Clock {
    Arc::new(move || ms)
}

#[test]
fn creates_missing_dump_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("dumps");
    assert!(!new_dir.exists());
    ensure_dump_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn dump_file_is_named_after_the_clock() {
    let temp = TempDir::new().unwrap();
    let writer = DumpWriter::new(temp.path().to_path_buf(), fixed_clock(1_700_000_000_123));
    assert_eq!(
        writer.file_name(),
        "offline_internals_20231114T221320123Z.json"
    );

    let path = writer.write("{}").unwrap();
    assert_eq!(path.parent().unwrap(), temp.path());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn same_timestamp_replaces_previous_dump() {
    let temp = TempDir::new().unwrap();
    let writer = DumpWriter::new(temp.path().to_path_buf(), fixed_clock(0));

    let first = writer.write("first").unwrap();
    let second = writer.write("second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_dump_written_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = DumpWriter::new(file_path.clone(), fixed_clock(0));
    assert!(writer.write("data").is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
