use dupefinder::duplicates::{DuplicateFinder, FinderConfig};
use dupefinder::scanner::{hash_to_hex, EMPTY_HASH};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.processed_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_basic_duplicates() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"X");
    write(&dir.path().join("b.txt"), b"X");
    write(&dir.path().join("c.txt"), b"Y");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 1);
    let names: Vec<String> = groups[0].files.iter().map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(summary.wasted_space, 1);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.processed_files, 3);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content bb");
    write(&dir.path().join("c.txt"), b"content ccc");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.eliminated_by_size, 3);
    assert_eq!(summary.hashed_files, 0);
}

#[test]
fn test_scan_all_empty_files() {
    let dir = tempdir().unwrap();
    for name in ["e1", "e2", "e3"] {
        File::create(dir.path().join(name)).unwrap();
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[0].hash, EMPTY_HASH);
    assert_eq!(summary.wasted_space, 0);
    assert_eq!(summary.hashed_files, 0);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    write(&dir.path().join("a.txt"), b"dup");
    write(&sub.join("b.txt"), b"dup");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert!(groups[0].files.iter().all(|f| f.path.is_absolute()));
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_multiple_groups() {
    let dir = tempdir().unwrap();
    for name in ["1a.txt", "1b.txt", "1c.txt"] {
        write(&dir.path().join(name), b"group1");
    }
    for name in ["2a.txt", "2b.txt"] {
        write(&dir.path().join(name), b"group2");
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(summary.duplicate_groups, 2);
    assert_eq!(summary.duplicate_files, 5);
    // (3 - 1) * 6 + (2 - 1) * 6
    assert_eq!(summary.wasted_space, 18);
    assert!(groups.iter().all(|g| g.len() >= 2));
}

#[test]
fn test_scan_larger_than_one_chunk() {
    let dir = tempdir().unwrap();
    let big = vec![0xABu8; 3 * 8 * 1024 + 17];
    let mut other = big.clone();
    *other.last_mut().unwrap() = 0xCD;

    write(&dir.path().join("big1.bin"), &big);
    write(&dir.path().join("big2.bin"), &big);
    write(&dir.path().join("big3.bin"), &other);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0].size, big.len() as u64);
    assert_eq!(groups[0].hash_hex().len(), 64);
}

#[test]
fn test_scan_results_independent_of_thread_count() {
    let dir = tempdir().unwrap();
    for i in 0..20u8 {
        let content = vec![i % 4; usize::from(i % 3) + 5];
        write(&dir.path().join(format!("f{i:02}")), &content);
    }

    let sequential = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(dir.path())
        .unwrap()
        .0;
    let parallel = DuplicateFinder::new(FinderConfig::default().with_io_threads(8))
        .find_duplicates(dir.path())
        .unwrap()
        .0;

    assert!(!sequential.is_empty());
    assert_eq!(sequential, parallel);
}

#[test]
fn test_scan_hash_is_sha256() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"abc");
    write(&dir.path().join("b"), b"abc");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(
        hash_to_hex(&groups[0].hash),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
