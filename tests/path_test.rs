//! Integration tests for the path validators against a real filesystem.

use std::fs;
use std::path::PathBuf;

use argcheck::{Checker, Domain, Kind, Mode, NewPathOptions, PathKind, PathOptions, Value};

#[test]
fn test_path_coerces_strings_and_resolves() {
    let checker = Checker::new();
    let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();

    let path = checker.path("data/./raw/..", "input", PathOptions::default()).unwrap();
    assert_eq!(path, cwd.join("data"));

    let path = checker
        .path(PathBuf::from("data"), "input", PathOptions::default().unresolved())
        .unwrap();
    assert_eq!(path, PathBuf::from("data"));
}

#[test]
fn test_path_round_trip_is_stable() {
    let checker = Checker::new();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let input = dir.path().join("a/../b/./c");

    let once = checker.path(input, "input", PathOptions::default()).unwrap();
    let twice = checker.path(once.clone(), "input", PathOptions::default()).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, root.join("b/c"));
}

#[test]
fn test_existing_file_and_folder() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let file = root.join("config.toml");
    fs::write(&file, "x = 1").unwrap();
    let checker = Checker::new();

    assert_eq!(checker.existing_file(&file, "config", Mode::Loose).unwrap(), file);
    assert_eq!(
        checker.existing_folder(dir.path(), "dir", Mode::Loose).unwrap(),
        root
    );

    let error = checker.existing_folder(&file, "dir", Mode::Loose).unwrap_err();
    assert!(error.matches(Kind::ValueMismatch, Domain::Path));
    assert_eq!(error.code(), "wrong_kind");
    assert_eq!(error.path(), Some(file.as_path()));
    assert_eq!(error.value, Value::Path(file.clone()));
    assert_eq!(
        error.message,
        format!("dir does not point to a folder\nPath: {}", file.display())
    );
}

#[test]
fn test_missing_path_is_not_found_for_either_kind() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().canonicalize().unwrap().join("missing");
    let checker = Checker::new();

    for error in [
        checker.existing_file(&missing, "input", Mode::Loose).unwrap_err(),
        checker.existing_folder(&missing, "input", Mode::Loose).unwrap_err(),
    ] {
        assert_eq!(error.code(), "not_found");
        assert_eq!(error.path(), Some(missing.as_path()));
        assert!(error.message.ends_with(&format!("\nPath: {}", missing.display())));
    }
}

#[test]
fn test_strict_mode_requires_a_path_value() {
    let dir = tempfile::tempdir().unwrap();
    let as_text = dir.path().to_str().unwrap();
    let checker = Checker::new();

    let error = checker.existing_folder(as_text, "dir", Mode::Strict).unwrap_err();
    assert!(error.matches(Kind::TypeMismatch, Domain::Path));
    assert!(checker.existing_folder(as_text, "dir", Mode::Loose).is_ok());
}

#[test]
fn test_new_file_rules() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().canonicalize().unwrap().join("out.csv");
    let checker = Checker::new();
    let options = NewPathOptions::default();

    assert_eq!(checker.new_file(&file, "out", options).unwrap(), file);

    fs::write(&file, "").unwrap();
    let error = checker.new_file(&file, "out", options).unwrap_err();
    assert_eq!(error.code(), "already_exists");
    assert_eq!(error.expected_kind(), Some(PathKind::File));
    assert_eq!(
        error.message,
        format!("out already exists\nPath: {}", file.display())
    );

    assert!(checker.new_file(&file, "out", options.exist_ok()).is_ok());

    let error = checker
        .new_file(dir.path(), "out", options.exist_ok())
        .unwrap_err();
    assert_eq!(error.code(), "wrong_kind");
}

#[test]
fn test_new_folder_rules() {
    let dir = tempfile::tempdir().unwrap();
    let checker = Checker::new();
    let options = NewPathOptions::default().exist_ok();

    let target = dir.path().join("results");
    assert!(checker.new_folder(&target, "out", NewPathOptions::default()).is_ok());

    fs::create_dir(&target).unwrap();
    assert!(checker.new_folder(&target, "out", options).is_ok());

    fs::write(target.join("run.log"), "done").unwrap();
    let error = checker.new_folder(&target, "out", options).unwrap_err();
    assert_eq!(error.code(), "not_empty");
    assert!(error.matches(Kind::ValueMismatch, Domain::Path));

    assert!(checker
        .new_folder(&target, "out", options.allow_non_empty())
        .is_ok());
}

#[test]
fn test_new_folder_rejects_existing_file_before_emptiness() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results");
    fs::write(&file, "").unwrap();
    let checker = Checker::new();

    let error = checker
        .new_folder(&file, "out", NewPathOptions::default().exist_ok())
        .unwrap_err();
    assert_eq!(error.code(), "wrong_kind");
    assert_eq!(error.expected_kind(), Some(PathKind::Folder));
}

#[cfg(unix)]
#[test]
fn test_resolution_follows_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::write(root.join("a/target.txt"), "x").unwrap();
    std::os::unix::fs::symlink(root.join("a/b"), root.join("link")).unwrap();
    let checker = Checker::new();

    // The OS resolves `link` before `..`, so this names a/target.txt
    let input = root.join("link/../target.txt");
    assert!(input.exists());
    assert_eq!(
        checker.existing_file(&input, "x", Mode::Loose).unwrap(),
        root.join("a/target.txt")
    );

    assert_eq!(
        checker.existing_folder(root.join("link"), "x", Mode::Loose).unwrap(),
        root.join("a/b")
    );

    let once = checker
        .path(root.join("link/missing/../new"), "x", PathOptions::default())
        .unwrap();
    assert_eq!(once, root.join("a/b/new"));
    assert_eq!(
        checker.path(once.clone(), "x", PathOptions::default()).unwrap(),
        once
    );
}
