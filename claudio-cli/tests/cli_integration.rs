use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn claudio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("claudio").expect("Failed to find claudio binary");
    cmd.env_remove("CLAUDIO_FFMPEG");
    cmd
}

/// Writes a stand-in for ffmpeg that records its arguments and exits with `exit_code`.
#[cfg(unix)]
fn fake_ffmpeg(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ffmpeg");
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\nexit {exit_code}\n"
    );
    fs::write(&script, body).expect("write fake ffmpeg");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake ffmpeg");
    script
}

#[test]
fn test_convert_rejects_non_flac_input() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("song.mp3");
    fs::write(&input, "dummy content")?;

    claudio_cmd()
        .arg("convert")
        .arg(&input)
        .arg("--ffmpeg")
        .arg(dir.path().join("never-run"))
        .assert()
        .failure()
        .stdout(contains("Expected FLAC file"));

    Ok(())
}

#[test]
fn test_convert_reports_missing_ffmpeg() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("song.flac");
    fs::write(&input, "dummy content")?;

    claudio_cmd()
        .arg("convert")
        .arg(&input)
        .arg("--ffmpeg")
        .arg(dir.path().join("no-such-ffmpeg"))
        .assert()
        .failure()
        .stdout(contains("Converting song.flac"))
        .stdout(contains("ffmpeg could not be started"));

    Ok(())
}

#[test]
fn test_convert_requires_a_file_argument() {
    claudio_cmd().arg("convert").assert().failure();
}

#[test]
fn test_check_reports_missing_ffmpeg() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    claudio_cmd()
        .arg("check")
        .arg("--ffmpeg")
        .arg(dir.path().join("no-such-ffmpeg"))
        .assert()
        .failure()
        .stderr(contains("not found"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_convert_with_spaces_in_path() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("my song.flac");
    fs::write(&input, "dummy content")?;
    let ffmpeg = fake_ffmpeg(dir.path(), 0);

    claudio_cmd()
        .arg("convert")
        .arg(&input)
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(contains("Converting my song.flac"))
        .stdout(contains("Done"));

    let args = fs::read_to_string(dir.path().join("args.txt"))?;
    let expected_output = dir.path().join("my song.m4a");
    assert!(args.lines().any(|l| Path::new(l) == input));
    assert!(args.lines().any(|l| Path::new(l) == expected_output));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_convert_failure_exit_code() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("broken.flac");
    fs::write(&input, "dummy content")?;
    let ffmpeg = fake_ffmpeg(dir.path(), 1);

    claudio_cmd()
        .env("CLAUDIO_FFMPEG", &ffmpeg)
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stdout(contains("ffmpeg exited with error"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_convert_json_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("song.flac");
    fs::write(&input, "dummy content")?;
    let ffmpeg = fake_ffmpeg(dir.path(), 0);

    claudio_cmd()
        .arg("--json")
        .arg("convert")
        .arg(&input)
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(contains(r#"{"state":"in_progress","filename":"song.flac"}"#))
        .stdout(contains(r#"{"state":"completed"}"#));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_watch_converts_each_dropped_line() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("dropped song.flac");
    fs::write(&input, "dummy content")?;
    let ffmpeg = fake_ffmpeg(dir.path(), 0);

    let stdin = format!("'{}'\n\n", input.display());
    claudio_cmd()
        .arg("watch")
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(contains("Drop FLAC here"))
        .stdout(contains("Converting dropped song.flac"))
        .stdout(contains("Done"));

    Ok(())
}

#[test]
fn test_watch_reports_wrong_filetype() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    claudio_cmd()
        .arg("watch")
        .arg("--ffmpeg")
        .arg(dir.path().join("never-run"))
        .write_stdin("/music/cover.jpg\n")
        .assert()
        .success()
        .stdout(contains("Expected FLAC file"));

    Ok(())
}

#[test]
fn test_log_file_receives_debug_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let log_file = dir.path().join("claudio.log");

    claudio_cmd()
        .arg("convert")
        .arg(dir.path().join("song.ogg"))
        .arg("--ffmpeg")
        .arg(dir.path().join("never-run"))
        .arg("--log-file")
        .arg(&log_file)
        .assert()
        .failure();

    let log = fs::read_to_string(&log_file)?;
    assert!(log.contains("not a .flac file"));

    Ok(())
}
