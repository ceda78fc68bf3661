// End-to-end runs of the binary against shell scripts standing in for ffmpeg.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::str::contains;
use serial_test::serial;
use std::error::Error;
use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tempfile::tempdir;

fn framelapse_cmd() -> Command {
    let mut cmd = Command::cargo_bin("framelapse").expect("Failed to find framelapse binary");
    for var in [
        "FRAMELAPSE_BASE_DIR",
        "FRAMELAPSE_OUTPUT_DIR",
        "FRAMELAPSE_FFMPEG",
        "FRAMELAPSE_EXTENSION",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn capture(dir: &Path, name: &str, contents: &[u8], mtime_secs: u64) {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .unwrap();
}

const COPYING_ENCODER: &str = r#"
if [ "$1" = "-version" ]; then exit 0; fi
for last; do :; done
cat > "$last"
"#;

const FAILING_ENCODER: &str = r#"
if [ "$1" = "-version" ]; then exit 0; fi
cat > /dev/null
echo "Unknown encoder 'libx264'" >&2
exit 1
"#;

#[test]
#[serial]
fn test_interactive_run_writes_video_in_capture_order() -> Result<(), Box<dyn Error>> {
    let tools = tempdir()?;
    let base = tempdir()?;
    let output = tempdir()?;
    let profile = base.path().join("p1");
    fs::create_dir(&profile)?;
    capture(&profile, "a.png", b"[T2]", 2_000);
    capture(&profile, "b.png", b"[T1]", 1_000);
    capture(&profile, "c.png", b"[T3]", 3_000);

    let ffmpeg = write_script(tools.path(), COPYING_ENCODER);

    framelapse_cmd()
        .arg("--no-pause")
        .arg("--base-dir")
        .arg(base.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .write_stdin("1\n\n")
        .assert()
        .success()
        .stderr(contains("1  p1"))
        .stderr(contains("Leave empty for a default of 5."))
        .stdout(contains("Found 3 screenshots"))
        .stdout(contains("Timelapse complete"));

    assert_eq!(fs::read(output.path().join("p1.mp4"))?, b"[T1][T2][T3]");
    Ok(())
}

#[test]
#[serial]
fn test_unreadable_capture_is_skipped_and_counted() -> Result<(), Box<dyn Error>> {
    let tools = tempdir()?;
    let base = tempdir()?;
    let output = tempdir()?;
    let profile = base.path().join("p1");
    fs::create_dir(&profile)?;
    capture(&profile, "a.png", b"[A]", 1);
    capture(&profile, "b.png", b"[B]", 2);
    capture(&profile, "c.png", b"[C]", 3);

    let locked = profile.join("b.png");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::read(&locked).is_ok() {
        // Running with privileges that ignore permission bits.
        return Ok(());
    }

    let ffmpeg = write_script(tools.path(), COPYING_ENCODER);

    framelapse_cmd()
        .args(["timelapse", "--no-pause", "--profile", "p1", "--framerate", "5"])
        .arg("--base-dir")
        .arg(base.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(contains("Found 3 screenshots"))
        .stdout(contains("Skipped 1 screenshots"))
        .stderr(contains("b.png"));

    assert_eq!(fs::read(output.path().join("p1.mp4"))?, b"[A][C]");
    Ok(())
}

#[test]
#[serial]
fn test_json_run_emits_events() -> Result<(), Box<dyn Error>> {
    let tools = tempdir()?;
    let base = tempdir()?;
    let output = tempdir()?;
    let profile = base.path().join("main");
    fs::create_dir(&profile)?;
    capture(&profile, "a.png", b"A", 1);

    let ffmpeg = write_script(tools.path(), COPYING_ENCODER);

    let result = framelapse_cmd()
        .args(["timelapse", "--json", "--profile", "main", "--framerate", "12"])
        .arg("--base-dir")
        .arg(base.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .output()?;
    assert!(result.status.success());

    let events: Vec<serde_json::Value> = String::from_utf8(result.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    let kinds: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(kinds.first(), Some(&"profile_selected"));
    assert!(kinds.contains(&"catalog_scanned"));
    assert!(kinds.contains(&"stream_finished"));
    assert_eq!(kinds.last(), Some(&"timelapse_complete"));
    Ok(())
}

#[test]
#[serial]
fn test_encoder_failure_shows_output_and_exits_1() -> Result<(), Box<dyn Error>> {
    let tools = tempdir()?;
    let base = tempdir()?;
    let output = tempdir()?;
    let profile = base.path().join("p1");
    fs::create_dir(&profile)?;
    capture(&profile, "a.png", b"A", 1);

    let ffmpeg = write_script(tools.path(), FAILING_ENCODER);

    framelapse_cmd()
        .args(["timelapse", "--no-pause", "--profile", "p1", "--framerate", "5"])
        .arg("--base-dir")
        .arg(base.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .code(1)
        .stderr(contains("Unknown encoder 'libx264'"))
        .stderr(contains("Error: ffmpeg failed with exit status: 1"));

    Ok(())
}
