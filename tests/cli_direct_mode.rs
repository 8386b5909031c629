use std::fs;
use std::process::Command;

use assert_cmd::cargo;
use tempfile::tempdir;

#[test]
fn direct_mode_moves_matching_files() {
    let td = tempdir().unwrap();
    let source = td.path().join("incoming");
    let target = td.path().join("sorted");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("image001.jpg"), b"jpg").unwrap();
    fs::write(source.join("doc123.pdf"), b"pdf").unwrap();

    let me = cargo::cargo_bin!("file_mover");
    let out = Command::new(me)
        .env("FILE_MOVER_CONFIG", td.path().join("no_config.xml"))
        .arg(&source)
        .arg(r"\.jpg$")
        .arg(&target)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Moved: image001.jpg"), "stdout: {stdout}");
    assert!(stdout.contains("1 moved, 0 skipped, 0 failed"), "stdout: {stdout}");

    assert!(!source.join("image001.jpg").exists());
    assert!(source.join("doc123.pdf").exists());
    assert_eq!(fs::read(target.join("image001.jpg")).unwrap(), b"jpg");
}

#[test]
fn direct_mode_creates_missing_target() {
    let td = tempdir().unwrap();
    let source = td.path().join("incoming");
    let target = td.path().join("brand").join("new");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("note.txt"), b"n").unwrap();

    let me = cargo::cargo_bin!("file_mover");
    let out = Command::new(me)
        .env("FILE_MOVER_CONFIG", td.path().join("no_config.xml"))
        .arg(&source)
        .arg("note")
        .arg(&target)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(target.join("note.txt").exists());
}

#[test]
fn skip_exists_leaves_both_files_and_exits_zero() {
    let td = tempdir().unwrap();
    let source = td.path().join("incoming");
    let target = td.path().join("sorted");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(source.join("report.txt"), b"fresh").unwrap();
    fs::write(target.join("report.txt"), b"original").unwrap();

    let me = cargo::cargo_bin!("file_mover");
    let out = Command::new(me)
        .env("FILE_MOVER_CONFIG", td.path().join("no_config.xml"))
        .arg(&source)
        .arg("report")
        .arg(&target)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Skipped (exists): report.txt"), "stdout: {stdout}");
    assert_eq!(fs::read(source.join("report.txt")).unwrap(), b"fresh");
    assert_eq!(fs::read(target.join("report.txt")).unwrap(), b"original");
}

#[test]
fn no_match_is_a_terminal_error() {
    let td = tempdir().unwrap();
    let source = td.path().join("incoming");
    let target = td.path().join("sorted");
    fs::create_dir_all(&source).unwrap();

    let me = cargo::cargo_bin!("file_mover");
    let out = Command::new(me)
        .env("FILE_MOVER_CONFIG", td.path().join("no_config.xml"))
        .arg(&source)
        .arg(".*")
        .arg(&target)
        .output()
        .expect("spawn binary");

    assert!(!out.status.success(), "empty source + .* should report no match");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no files matched"), "stderr: {stderr}");
}
