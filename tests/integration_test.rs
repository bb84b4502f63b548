use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_find_in_empty_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("osfind")?;
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_find_all_regular_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("file1.txt"))?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("file2.txt"))?;

    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd.arg(dir.path()).assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("file1.txt"));
    assert!(stdout.contains("file2.txt"));

    Ok(())
}

#[test]
fn test_directories_not_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("only_dirs"))?;

    let mut cmd = Command::cargo_bin("osfind")?;
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_name_filter_is_exact() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("report.txt"))?;
    File::create(dir.path().join("report.txt.old"))?;

    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd
        .arg(dir.path())
        .arg("--name")
        .arg("report.txt")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("report.txt"));
    assert!(!stdout.contains("report.txt.old"));

    Ok(())
}

#[test]
fn test_size_range_filter() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("tiny"))?.write_all(&vec![0u8; 50])?;
    File::create(dir.path().join("medium"))?.write_all(&vec![0u8; 500])?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("huge"))?.write_all(&vec![0u8; 5000])?;

    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd
        .arg(dir.path())
        .arg("--size")
        .arg("+100")
        .arg("--size")
        .arg("-1000")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("medium"));
    assert!(!stdout.contains("tiny"));
    assert!(!stdout.contains("huge"));

    Ok(())
}

#[test]
fn test_inum_filter() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::MetadataExt;

    let dir = tempdir()?;
    let wanted = dir.path().join("wanted");
    File::create(&wanted)?;
    File::create(dir.path().join("other"))?;

    let ino = fs::metadata(&wanted)?.ino();

    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd
        .arg(dir.path())
        .arg("--inum")
        .arg(ino.to_string())
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("wanted"));
    assert!(!stdout.contains("other"));

    Ok(())
}

#[test]
fn test_nlinks_filter() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let original = dir.path().join("original");
    File::create(&original)?.write_all(b"data")?;
    fs::hard_link(&original, dir.path().join("twin"))?;
    File::create(dir.path().join("loner"))?;

    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd
        .arg(dir.path())
        .arg("--nlinks")
        .arg("2")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("original"));
    assert!(stdout.contains("twin"));
    assert!(!stdout.contains("loner"));

    Ok(())
}

#[test]
fn test_missing_root_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("osfind")?;
    cmd.arg("/definitely/not/a/real/path/osfind")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_invalid_size_token_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("osfind")?;
    cmd.arg(".").arg("--size").arg("100").assert().failure();

    Ok(())
}

#[test]
fn test_exec_replaces_process() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("payload.txt"))?;

    // exec 成功后进程映像变成 echo，匹配路径成为它的参数
    let mut cmd = Command::cargo_bin("osfind")?;
    let output = cmd
        .arg(dir.path())
        .arg("--exec")
        .arg("/bin/echo")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.contains("payload.txt"));

    Ok(())
}

#[test]
fn test_exec_failure_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("payload.txt"))?;

    let mut cmd = Command::cargo_bin("osfind")?;
    cmd.arg(dir.path())
        .arg("--exec")
        .arg("/definitely/not/an/executable")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_unreadable_subdir_aborts_by_default() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        // root 不受权限位限制，此时无法模拟不可读目录
        if unsafe { libc::geteuid() } == 0 {
            return Ok(());
        }

        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        File::create(dir.path().join("visible.txt"))?;
        let locked = dir.path().join("locked");
        fs::create_dir(&locked)?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        let mut cmd = Command::cargo_bin("osfind")?;
        let assert = cmd.arg(dir.path()).assert();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        assert.failure();
    }
    Ok(())
}

#[test]
fn test_skip_errors_continues_past_unreadable_subdir() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        if unsafe { libc::geteuid() } == 0 {
            return Ok(());
        }

        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        File::create(dir.path().join("visible.txt"))?;
        let locked = dir.path().join("locked");
        fs::create_dir(&locked)?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        let mut cmd = Command::cargo_bin("osfind")?;
        let assert = cmd.arg(dir.path()).arg("--skip-errors").assert();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        let output = assert.success();

        let stdout = String::from_utf8(output.get_output().stdout.clone())?;
        assert!(stdout.contains("visible.txt"));
    }
    Ok(())
}
