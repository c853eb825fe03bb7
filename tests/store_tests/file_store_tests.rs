//! Tests for FileStore
//!
//! These tests verify:
//! - Loading missing, empty and populated files
//! - Strict vs lenient handling of wrong field counts
//! - Full rewrites under both strategies, including failure and file mode
//! - Appends preserving existing content

use std::fs;
use std::path::PathBuf;

use flatdb::codec::Record;
use flatdb::config::{Config, RewriteStrategy};
use flatdb::store::{FileStore, RecordStore};
use flatdb::FlatError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    (temp_dir, path)
}

fn pairs(items: &[(&str, &str)]) -> Vec<Record> {
    items.iter().map(|(k, v)| Record::from([*k, *v])).collect()
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp, path) = setup_temp_file("missing.csv");
    let store = FileStore::new(&path, 2);

    assert!(store.load().unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_load_empty_file_is_empty() {
    let (_temp, path) = setup_temp_file("empty.csv");
    fs::write(&path, "").unwrap();

    let store = FileStore::new(&path, 2);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_preserves_file_order() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "b,2\na,1\nb,3\n").unwrap();

    let store = FileStore::new(&path, 2);
    let records = store.load().unwrap();

    assert_eq!(records, pairs(&[("b", "2"), ("a", "1"), ("b", "3")]));
}

#[test]
fn test_load_wrong_field_count_aborts() {
    let (_temp, path) = setup_temp_file("bad.csv");
    fs::write(&path, "a,1\nb,2,extra\nc,3\n").unwrap();

    let store = FileStore::new(&path, 2);
    let err = store.load().unwrap_err();

    assert!(matches!(err, FlatError::Format { line: 2, .. }));
}

#[test]
fn test_load_lenient_skips_wrong_field_count() {
    let (_temp, path) = setup_temp_file("contacts.csv");
    fs::write(
        &path,
        "Alice,01234567890,alice@gmail.com\nbroken row\nBob,09876543210,bob@gmail.com\n",
    )
    .unwrap();

    let store = FileStore::new(&path, 3);
    let records = store.load_lenient().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].key(), Some("Alice"));
    assert_eq!(records[1].key(), Some("Bob"));
}

#[test]
fn test_load_lenient_still_aborts_on_bad_quoting() {
    let (_temp, path) = setup_temp_file("contacts.csv");
    fs::write(&path, "\"Alice\"x,1,2\n").unwrap();

    let store = FileStore::new(&path, 3);
    assert!(matches!(store.load_lenient(), Err(FlatError::Format { .. })));
}

#[test]
fn test_load_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path(), 2);

    assert!(matches!(store.load(), Err(FlatError::Io(_))));
}

// =============================================================================
// Rewrite Tests
// =============================================================================

#[test]
fn test_rewrite_replaces_contents() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "old,1\nold,2\n").unwrap();

    let store = FileStore::new(&path, 2);
    store.rewrite(&pairs(&[("new", "x")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new,x\n");
}

#[test]
fn test_rewrite_empty_sequence_empties_file() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1\n").unwrap();

    let store = FileStore::new(&path, 2);
    store.rewrite(&[]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_rewrite_truncate_strategy() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1\nb,2\nc,3\n").unwrap();

    let store = FileStore::new(&path, 2).with_strategy(RewriteStrategy::Truncate);
    store.rewrite(&pairs(&[("z", "26")])).unwrap();

    assert_eq!(store.load().unwrap(), pairs(&[("z", "26")]));
}

#[test]
fn test_rewrite_atomic_leaves_no_temp_files() {
    let (temp, path) = setup_temp_file("rows.csv");

    let store = FileStore::new(&path, 2).with_strategy(RewriteStrategy::AtomicRename);
    store.rewrite(&pairs(&[("a", "1"), ("b", "2")])).unwrap();
    store.rewrite(&pairs(&[("c", "3")])).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(store.load().unwrap(), pairs(&[("c", "3")]));
}

#[test]
fn test_rewrite_atomic_missing_parent_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    // The parent directory does not exist, so the temp file cannot be made
    let path = temp_dir.path().join("no_such_dir").join("rows.csv");

    let store = FileStore::new(&path, 2);
    let err = store.rewrite(&pairs(&[("a", "1")])).unwrap_err();

    assert!(matches!(err, FlatError::Io(_)));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_rewrite_atomic_failure_keeps_old_contents() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("locked");
    fs::create_dir(&dir).unwrap();
    let path = dir.join("rows.csv");
    fs::write(&path, "a,1\nb,2\n").unwrap();

    // No new entries can be created next to the table
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();
    if fs::File::create(dir.join("writable_check")).is_ok() {
        // Privileged users ignore directory permissions
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        eprintln!("skipping: directory permissions are not enforced for this user");
        return;
    }

    let store = FileStore::new(&path, 2);
    let result = store.rewrite(&pairs(&[("z", "26")]));
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(FlatError::Io(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\nb,2\n");
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn test_rewrite_atomic_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileStore::new(&path, 2).with_strategy(RewriteStrategy::AtomicRename);
    store.rewrite(&pairs(&[("a", "2")])).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,2\n");
}

#[cfg(unix)]
#[test]
fn test_rewrite_atomic_follows_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real.csv");
    let link = temp_dir.path().join("link.csv");
    fs::write(&real, "a,1\n").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let store = FileStore::new(&link, 2);
    store.rewrite(&pairs(&[("b", "2")])).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real).unwrap(), "b,2\n");
}

#[test]
fn test_rewrite_then_load_round_trip() {
    let (_temp, path) = setup_temp_file("contacts.csv");
    let records = vec![
        Record::from(["Smith, John", "01234567890", "john@gmail.com"]),
        Record::from(["O\"Brien", "09876543210", "ob@gmail.com"]),
    ];

    let store = FileStore::new(&path, 3);
    store.rewrite(&records).unwrap();

    assert_eq!(store.load().unwrap(), records);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_creates_missing_file() {
    let (_temp, path) = setup_temp_file("rows.csv");

    let store = FileStore::new(&path, 2);
    store.append(&pairs(&[("a", "1")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\n");
}

#[test]
fn test_append_preserves_existing_records() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1\n").unwrap();

    let store = FileStore::new(&path, 2);
    store.append(&pairs(&[("b", "2"), ("a", "3")])).unwrap();

    assert_eq!(
        store.load().unwrap(),
        pairs(&[("a", "1"), ("b", "2"), ("a", "3")])
    );
}

#[test]
fn test_append_terminates_unterminated_last_line() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1").unwrap();

    let store = FileStore::new(&path, 2);
    store.append(&pairs(&[("b", "2")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\nb,2\n");
    assert_eq!(store.load().unwrap(), pairs(&[("a", "1"), ("b", "2")]));
}

// =============================================================================
// Lifecycle / Config Tests
// =============================================================================

#[test]
fn test_ensure_exists_creates_empty_file() {
    let (_temp, path) = setup_temp_file("new.csv");

    let store = FileStore::new(&path, 2);
    store.ensure_exists().unwrap();

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_ensure_exists_keeps_existing_content() {
    let (_temp, path) = setup_temp_file("rows.csv");
    fs::write(&path, "a,1\n").unwrap();

    let store = FileStore::new(&path, 2);
    store.ensure_exists().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\n");
}

#[test]
fn test_from_config() {
    let (_temp, path) = setup_temp_file("contacts.csv");
    let config = Config::builder()
        .data_file(&path)
        .rewrite_strategy(RewriteStrategy::Truncate)
        .build();

    let store = FileStore::from_config(&config, 3).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.arity(), 3);
    assert_eq!(store.strategy(), RewriteStrategy::Truncate);
}

#[test]
fn test_from_config_rejects_zero_arity() {
    let (_temp, path) = setup_temp_file("rows.csv");
    let config = Config::builder().data_file(&path).build();

    assert!(matches!(
        FileStore::from_config(&config, 0),
        Err(FlatError::Config(_))
    ));
}
