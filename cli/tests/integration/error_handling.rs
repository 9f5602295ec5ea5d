//! Error handling integration tests for mycp CLI.
//!
//! These tests verify proper error handling behaviors:
//! - Guard rails for `-r` versus plain copies
//! - Source validation
//! - Usage errors
//! - Permission errors

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A directory source without `-r` is rejected before anything is created.
#[test]
fn test_directory_without_recursive_fails() {
    let fixture = TestFixture::new();
    fixture.write("inside.txt", "content");
    let target = fixture.dst_path("copy");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(fixture.src.path())
        .arg(&target)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("without -r"));

    assert!(!target.exists(), "No destination should be created");
}

/// `-r` on a plain file is rejected before anything is created.
#[test]
fn test_recursive_on_file_fails() {
    let fixture = TestFixture::new();
    fixture.write("file.txt", "content");
    let target = fixture.dst_path("copy");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path().join("file.txt"))
        .arg(&target)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("is not a directory"));

    assert!(!target.exists(), "No destination should be created");
}

#[test]
fn test_nonexistent_source() {
    let dst = TempDir::new().unwrap();
    let target = dst.path().join("dest.txt");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("/nonexistent/path/to/file.txt")
        .arg(&target)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No such file or directory"))
        .stderr(predicate::str::contains("source_not_found"));

    assert!(!target.exists());
}

#[test]
fn test_nonexistent_source_recursive() {
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg("/nonexistent/dir")
        .arg(dst.path().join("copy"))
        .assert()
        .failure()
        .code(1);

    assert!(!dst.path().join("copy").exists());
}

#[test]
fn test_missing_destination_operand() {
    let fixture = TestFixture::new();
    fixture.write("file.txt", "content");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(fixture.src.path().join("file.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_too_many_operands() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");
    fixture.write("b.txt", "b");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(fixture.src.path().join("a.txt"))
        .arg(fixture.src.path().join("b.txt"))
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .code(2);

    assert!(fs::read_dir(fixture.dst.path()).unwrap().next().is_none());
}

#[test]
fn test_unknown_flag() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-x")
        .arg(fixture.src.path().join("a.txt"))
        .arg(fixture.dst_path("a.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));

    assert!(!fixture.dst_path("a.txt").exists());
}

#[test]
fn test_missing_destination_parent() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(fixture.src.path().join("a.txt"))
        .arg(fixture.dst_path("no/such/dir/a.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to open destination file"));
}

#[test]
fn test_copy_directory_into_itself() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path())
        .arg(fixture.src.path().join("inner"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("into itself"));

    assert!(!fixture.src.path().join("inner").exists());
}

/// Test copying from a source without read permissions.
#[cfg(unix)]
#[test]
fn test_permission_denied_source() {
    use std::os::unix::fs::PermissionsExt;

    if common::has_root_privileges() {
        eprintln!("Skipping: root ignores file permissions");
        return;
    }

    let fixture = TestFixture::new();
    fixture.write("secret.txt", "secret");
    let secret = fixture.src.path().join("secret.txt");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
    let _guard = scopeguard::guard(&secret, |path| {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o644));
    });

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(&secret)
        .arg(fixture.dst_path("secret.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("permission_denied"))
        .stderr(predicate::str::contains("Failed to open source file"));

    assert!(!fixture.dst_path("secret.txt").exists());
}

/// An unreadable subdirectory aborts the traversal; earlier copies remain.
#[cfg(unix)]
#[test]
fn test_permission_denied_subdirectory() {
    use std::os::unix::fs::PermissionsExt;

    if common::has_root_privileges() {
        eprintln!("Skipping: root ignores directory permissions");
        return;
    }

    let fixture = TestFixture::new();
    fixture.write("a_first.txt", "first");
    fixture.write("locked/inside.txt", "inside");
    let locked = fixture.src.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let _guard = scopeguard::guard(&locked, |path| {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
    });

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path())
        .arg(fixture.dst_path("copy"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to open source directory"));

    // No rollback: files copied before the failure stay
    fixture.assert_file_content(&fixture.dst_path("copy/a_first.txt"), "first");
    assert!(!fixture.dst_path("copy/locked").exists());
}

/// A read-only destination directory cannot receive new files.
#[cfg(unix)]
#[test]
fn test_permission_denied_destination() {
    use std::os::unix::fs::PermissionsExt;

    if common::has_root_privileges() {
        eprintln!("Skipping: root ignores directory permissions");
        return;
    }

    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");
    let readonly = fixture.dst_path("readonly");
    fs::create_dir(&readonly).unwrap();
    fs::set_permissions(&readonly, fs::Permissions::from_mode(0o555)).unwrap();
    let _guard = scopeguard::guard(&readonly, |path| {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
    });

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(fixture.src.path().join("a.txt"))
        .arg(readonly.join("a.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("permission_denied"));
}
