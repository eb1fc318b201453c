use std::fs;
use std::path::PathBuf;

use blueshift::background::{
    backup_path_for, strip_background, strip_backgrounds, BackgroundRemover,
};
use blueshift::{Error, Result};

const ORIGINAL_BYTES: &[u8] = b"original image bytes";
const STRIPPED_BYTES: &[u8] = b"stripped image bytes";

struct StubRemover;

impl BackgroundRemover for StubRemover {
    fn remove(&self, _input: &[u8]) -> Result<Vec<u8>> {
        Ok(STRIPPED_BYTES.to_vec())
    }
}

struct FailingRemover;

impl BackgroundRemover for FailingRemover {
    fn remove(&self, _input: &[u8]) -> Result<Vec<u8>> {
        Err(Error::BackgroundRemovalFailed("stub failure".to_owned()))
    }
}

fn create_test_directory(test_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "blueshift-strip-{}-{}",
        test_name,
        std::process::id()
    ));
    if path.exists() {
        fs::remove_dir_all(&path).expect("Cleanup of stale test directory failed");
    }
    fs::create_dir_all(&path).expect("Creation of test directory failed");
    path
}

#[test]
fn first_run_creates_backup_and_overwrites_original() {
    let directory = create_test_directory("backup");
    let image_path = directory.join("image.png");
    fs::write(&image_path, ORIGINAL_BYTES).expect("Writing of test file failed");

    strip_background(&StubRemover, &image_path).expect("Stripping failed");

    let backup_path = backup_path_for(&image_path);
    assert_eq!(
        fs::read(&backup_path).expect("Backup file missing"),
        ORIGINAL_BYTES,
        "backup must hold the original bytes"
    );
    assert_eq!(
        fs::read(&image_path).expect("Original file missing"),
        STRIPPED_BYTES,
        "original must be overwritten with the remover output"
    );

    fs::remove_dir_all(&directory).expect("Cleanup of test directory failed");
}

#[test]
fn existing_backup_is_never_overwritten() {
    let directory = create_test_directory("lazy-backup");
    let image_path = directory.join("image.png");
    fs::write(&image_path, ORIGINAL_BYTES).expect("Writing of test file failed");

    strip_background(&StubRemover, &image_path).expect("First stripping failed");
    strip_background(&StubRemover, &image_path).expect("Second stripping failed");

    let backup_path = backup_path_for(&image_path);
    assert_eq!(
        fs::read(&backup_path).expect("Backup file missing"),
        ORIGINAL_BYTES,
        "a repeated run must not capture a second before state"
    );

    fs::remove_dir_all(&directory).expect("Cleanup of test directory failed");
}

#[test]
fn missing_file_is_reported_without_backup() {
    let directory = create_test_directory("missing");
    let image_path = directory.join("does-not-exist.png");

    let result = strip_background(&StubRemover, &image_path);
    assert!(
        matches!(result, Err(Error::InputFileNotFound(_))),
        "missing file must be reported as not found"
    );
    assert!(
        !backup_path_for(&image_path).exists(),
        "no backup must be created for a missing file"
    );

    fs::remove_dir_all(&directory).expect("Cleanup of test directory failed");
}

#[test]
fn failing_remover_leaves_original_and_backup_intact() {
    let directory = create_test_directory("failure");
    let image_path = directory.join("image.png");
    fs::write(&image_path, ORIGINAL_BYTES).expect("Writing of test file failed");

    let result = strip_background(&FailingRemover, &image_path);
    assert!(result.is_err(), "failing remover must surface an error");
    assert_eq!(
        fs::read(&image_path).expect("Original file missing"),
        ORIGINAL_BYTES,
        "original must stay intact when the remover fails"
    );
    assert_eq!(
        fs::read(backup_path_for(&image_path)).expect("Backup file missing"),
        ORIGINAL_BYTES,
        "backup is created before the remover runs"
    );

    fs::remove_dir_all(&directory).expect("Cleanup of test directory failed");
}

#[test]
fn batch_continues_past_failing_files() {
    let directory = create_test_directory("batch");
    let missing_path = directory.join("missing.png");
    let image_path = directory.join("image.png");
    fs::write(&image_path, ORIGINAL_BYTES).expect("Writing of test file failed");

    strip_backgrounds(&StubRemover, &[missing_path, image_path.clone()]);

    assert_eq!(
        fs::read(&image_path).expect("Original file missing"),
        STRIPPED_BYTES,
        "a failure earlier in the batch must not block later files"
    );

    fs::remove_dir_all(&directory).expect("Cleanup of test directory failed");
}
