// claudio-core/tests/sidecar_tests.rs
//
// Drives the real ffmpeg-sidecar spawner against a stand-in shell script, so
// the argument vector and exit-code handling are exercised without ffmpeg.

#![cfg(unix)]

use claudio_core::{ConversionError, ConversionRunner, ConversionStatus, CoreConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_fake_ffmpeg(dir: &Path, name: &str, exit_code: i32) -> PathBuf {
    let script = dir.join(name);
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/{name}.args\"\necho converted\nexit {exit_code}\n"
    );
    fs::write(&script, body).expect("write fake ffmpeg");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake ffmpeg");
    script
}

fn run_with(ffmpeg: PathBuf, input: &Path) -> ConversionStatus {
    let runner = ConversionRunner::new(CoreConfig::new(ffmpeg)).expect("valid config");
    runner.convert(input).expect("runner is idle");
    runner.status()
}

#[test]
fn sidecar_spawner_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("my song.flac");
    fs::write(&input, b"not really flac")?;

    // Exit 0: completed, and the script saw the literal paths.
    let ok = write_fake_ffmpeg(dir.path(), "ffmpeg-ok", 0);
    assert_eq!(run_with(ok, &input), ConversionStatus::Completed);

    let args = fs::read_to_string(dir.path().join("ffmpeg-ok.args"))?;
    let lines: Vec<&str> = args.lines().collect();
    let input_str = input.to_string_lossy();
    let output_str = dir.path().join("my song.m4a").to_string_lossy().into_owned();
    assert!(lines.windows(2).any(|w| w[0] == "-i" && w[1] == input_str));
    assert!(lines.windows(4).any(|w| w == ["-acodec", "alac", output_str.as_str(), "-y"]));

    // Non-zero exit: task failed.
    let failing = write_fake_ffmpeg(dir.path(), "ffmpeg-fail", 3);
    assert_eq!(
        run_with(failing, &input),
        ConversionStatus::failed(ConversionError::TaskFailed)
    );

    // Missing binary: launch failed instead of a crash.
    assert_eq!(
        run_with(dir.path().join("no-such-ffmpeg"), &input),
        ConversionStatus::failed(ConversionError::LaunchFailed)
    );

    Ok(())
}
