use dupefinder::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupefinder::scanner::{FileEntry, ScanError};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_detect_continues_when_files_vanish() {
    let finder = DuplicateFinder::with_defaults();
    let file1 = FileEntry::new(PathBuf::from("nonexistent_1.txt"), 100);
    let file2 = FileEntry::new(PathBuf::from("nonexistent_2.txt"), 100);

    let (groups, summary) = finder.detect(vec![file1, file2]).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.skipped.len(), 2);
    assert!(summary
        .skipped
        .iter()
        .all(|s| s.reason == "file not found"));
    assert_eq!(summary.processed_files, 2);
}

#[test]
fn test_file_removed_between_walk_and_hash() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"same")
            .unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (files, errors) = finder.enumerate(dir.path()).unwrap();
    assert!(errors.is_empty());
    assert_eq!(files.len(), 3);

    fs::remove_file(dir.path().join("b")).unwrap();
    let (groups, summary) = finder.detect(files).unwrap();

    assert_eq!(groups.len(), 1);
    let names: Vec<String> = groups[0].files.iter().map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].path.file_name().unwrap(), "b");
}

#[test]
fn test_invalid_target_is_fatal() {
    let finder = DuplicateFinder::with_defaults();
    let result = finder.find_duplicates(&PathBuf::from("/definitely/not/here"));
    match result {
        Err(FinderError::Scan(ScanError::InvalidTarget(path))) => {
            assert_eq!(path, PathBuf::from("/definitely/not/here"));
        }
        other => panic!("Expected InvalidTarget, got: {:?}", other.map(|(g, _)| g)),
    }
}

#[test]
fn test_file_as_target_is_invalid() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    File::create(&file).unwrap();

    let result = DuplicateFinder::with_defaults().find_duplicates(&file);
    assert!(matches!(
        result,
        Err(FinderError::Scan(ScanError::InvalidTarget(_)))
    ));
}

/// Returns false when the current user can read the directory anyway (root).
#[cfg(unix)]
fn make_unreadable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    fs::read_dir(path).is_err()
}

#[cfg(unix)]
fn restore(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_skipped_by_default() {
    let dir = tempdir().unwrap();
    for name in ["a.txt", "b.txt"] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"dup")
            .unwrap();
    }
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    File::create(locked.join("hidden.txt"))
        .unwrap()
        .write_all(b"dup")
        .unwrap();

    if !make_unreadable(&locked) {
        restore(&locked);
        eprintln!("Skipping: directory permissions are not enforced for this user");
        return;
    }

    let result = DuplicateFinder::with_defaults().find_duplicates(dir.path());
    restore(&locked);

    let (groups, summary) = result.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.scan_errors.len(), 1);
    assert!(summary.scan_errors[0].path().ends_with("locked"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_fatal_in_strict_mode() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a.txt")).unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();

    if !make_unreadable(&locked) {
        restore(&locked);
        eprintln!("Skipping: directory permissions are not enforced for this user");
        return;
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_strict(true));
    let result = finder.find_duplicates(dir.path());
    restore(&locked);

    match result {
        Err(err) => assert!(err.is_traversal()),
        Ok(_) => panic!("strict mode should abort on an unreadable directory"),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempdir().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"dup")
            .unwrap();
    }
    let locked = dir.path().join("c.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if File::open(&locked).is_ok() {
        eprintln!("Skipping: file permissions are not enforced for this user");
        return;
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].reason, "permission denied");
    assert_eq!(summary.processed_files, 3);
}
