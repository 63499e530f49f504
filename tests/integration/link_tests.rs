use dupefinder::duplicates::DuplicateFinder;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[cfg(unix)]
#[test]
fn test_symlink_to_duplicate_is_never_enumerated() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let copy = dir.path().join("copy.txt");
    let symlink = dir.path().join("symlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();
    fs::copy(&original, &copy).unwrap();
    std::os::unix::fs::symlink(&original, &symlink).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0]
        .files
        .iter()
        .all(|f| f.file_name() != "symlink.txt"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_not_followed() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    File::create(real.join("a.txt"))
        .unwrap()
        .write_all(b"only one")
        .unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_does_not_hang() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();

    let (_, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 0);
}

#[test]
fn test_hardlinks_are_reported_as_duplicates() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let hardlink = dir.path().join("hardlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();
    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    // Hard links are distinct paths with identical content.
    assert_eq!(summary.total_files, 2);
    assert_eq!(groups.len(), 1);
}
