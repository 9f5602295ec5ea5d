//! Basic functionality integration tests for mycp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, tree_snapshot};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_basic_file_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg(src.path().join("test.txt"))
        .arg(dst.path().join("test.txt"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(dst.path().join("test.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_file_copy_is_byte_exact() {
    let fixture = TestFixture::new();
    let data: Vec<u8> = (0..=255u8).cycle().take(300_000).collect();
    fixture.write("blob.bin", &data);

    for extra in [None, Some("--streaming")] {
        let mut cmd = cargo_bin_cmd!("mycp");
        if let Some(flag) = extra {
            cmd.arg(flag);
        }
        cmd.arg(fixture.src.path().join("blob.bin"))
            .arg(fixture.dst_path("blob.bin"))
            .assert()
            .success();

        assert_eq!(fs::read(fixture.dst_path("blob.bin")).unwrap(), data);
    }
}

#[test]
fn test_overwrite_existing_file() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "new content").unwrap();
    fs::write(dst.path().join("test.txt"), "old, much longer content").unwrap();

    // Running twice must succeed both times and leave identical content
    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("mycp");
        cmd.arg(src.path().join("test.txt"))
            .arg(dst.path().join("test.txt"))
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(dst.path().join("test.txt")).unwrap(),
        "new content"
    );
}

#[test]
fn test_copy_file_onto_itself() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("data.bin");
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 239) as u8).collect();
    fs::write(&file, &data).unwrap();

    for flags in [&[][..], &["--streaming"][..]] {
        let mut cmd = cargo_bin_cmd!("mycp");
        cmd.args(flags).arg(&file).arg(&file).assert().success();
        assert_eq!(fs::read(&file).unwrap(), data);
    }
}

#[test]
fn test_recursive_directory_copy() {
    let fixture = TestFixture::new();
    fixture.write("file1.txt", "content1");
    fixture.write("subdir/file2.txt", "content2");
    fixture.write("subdir/nested/file3.txt", "content3");
    fixture.mkdir("empty");
    fixture.mkdir("subdir/also_empty");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path())
        .arg(fixture.dst_path("copied"))
        .assert()
        .success();

    assert_eq!(
        tree_snapshot(fixture.src.path()),
        tree_snapshot(&fixture.dst_path("copied"))
    );
    fixture.assert_file_content(&fixture.dst_path("copied/subdir/nested/file3.txt"), "content3");
}

#[test]
fn test_recursive_copy_deep_nesting() {
    let fixture = TestFixture::new();
    fixture.create_nested_structure(20, 2);

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path())
        .arg(fixture.dst_path("deep"))
        .assert()
        .success();

    assert_eq!(
        tree_snapshot(fixture.src.path()),
        tree_snapshot(&fixture.dst_path("deep"))
    );
}

#[test]
fn test_recursive_copy_with_jobs() {
    let fixture = TestFixture::new();
    for i in 0..50 {
        fixture.write(&format!("bulk/file{i}.txt"), format!("content {i}"));
    }
    fixture.create_nested_structure(3, 5);

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.args(["-r", "-j", "8"])
        .arg(fixture.src.path())
        .arg(fixture.dst_path("out"))
        .assert()
        .success();

    assert_eq!(
        tree_snapshot(fixture.src.path()),
        tree_snapshot(&fixture.dst_path("out"))
    );
}

#[test]
fn test_recursive_copy_onto_itself() {
    let fixture = TestFixture::new();
    fixture.create_nested_structure(3, 2);
    let before = tree_snapshot(fixture.src.path());

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.args(["-r", "--streaming"])
        .arg(fixture.src.path())
        .arg(fixture.src.path())
        .assert()
        .success();

    assert_eq!(tree_snapshot(fixture.src.path()), before);
}

#[test]
fn test_recursive_copy_into_existing_directory() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "from source");
    fs::write(fixture.dst_path("a.txt"), "stale").unwrap();
    fs::write(fixture.dst_path("unrelated.txt"), "keep").unwrap();

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.arg("-r")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst_path("a.txt"), "from source");
    fixture.assert_file_content(&fixture.dst_path("unrelated.txt"), "keep");
}

#[test]
fn test_verbose_output() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "aaaa");
    fixture.write("sub/b.txt", "bb");

    let mut cmd = cargo_bin_cmd!("mycp");
    cmd.args(["-r", "-v"])
        .arg(fixture.src.path())
        .arg(fixture.dst_path("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 2 files, 2 dirs (6 B)"))
        .stderr(predicate::str::contains("created directory"))
        .stderr(predicate::str::contains("a.txt"));
}

#[test]
fn test_help_and_version() {
    cargo_bin_cmd!("mycp")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Copy directories recursively"));

    cargo_bin_cmd!("mycp")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mycp"));
}
