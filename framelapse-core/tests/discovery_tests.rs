// framelapse-core/tests/discovery_tests.rs

use framelapse_core::discovery::scan_frames;
use framelapse_core::error::CoreError;
use framelapse_core::sequence::FrameSequence;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::tempdir;

fn capture(dir: &Path, relative: &str, contents: &[u8], mtime_secs: u64) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    let file = File::options().write(true).open(&path).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .unwrap();
    path
}

#[test]
fn test_scan_finds_nested_captures() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    capture(root, "Level Ups/a.png", b"aa", 100);
    capture(root, "Clue Scroll Rewards/2024/b.png", b"bbb", 200);
    capture(root, "c.png", b"c", 300);
    capture(root, "notes.txt", b"ignored", 400);
    fs::create_dir_all(root.join("empty.png"))?; // directories never qualify

    let catalog = scan_frames(root, "png")?;
    let mut names: Vec<_> = catalog
        .frames
        .iter()
        .map(|frame| frame.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(catalog.total_bytes(), 6);
    assert_eq!(catalog.skipped_entries, 0);

    dir.close()?;
    Ok(())
}

#[test]
fn test_scan_extension_is_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    capture(root, "lower.png", b"x", 1);
    capture(root, "upper.PNG", b"x", 2);
    capture(root, "jpeg.jpg", b"x", 3);

    let catalog = scan_frames(root, "png")?;
    assert_eq!(catalog.frames.len(), 1);
    assert_eq!(catalog.frames[0].path.file_name().unwrap(), "lower.png");

    let catalog = scan_frames(root, "jpg")?;
    assert_eq!(catalog.frames.len(), 1);

    Ok(())
}

#[test]
fn test_scan_records_modification_time_and_size() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = capture(dir.path(), "shot.png", b"12345", 1_700_000_000);

    let catalog = scan_frames(dir.path(), "png")?;
    let frame = &catalog.frames[0];
    assert_eq!(frame.path, path);
    assert_eq!(frame.size, 5);
    assert_eq!(
        frame.captured_at,
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    );

    Ok(())
}

#[test]
fn test_scan_then_order_by_capture_time() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    // Names and folders deliberately disagree with capture order.
    capture(root, "z/first.png", b"1", 10);
    capture(root, "a/third.png", b"3", 30);
    capture(root, "m/second.png", b"2", 20);

    let sequence = FrameSequence::from_frames(scan_frames(root, "png")?.frames);
    let names: Vec<_> = sequence
        .iter()
        .map(|frame| frame.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["first.png", "second.png", "third.png"]);

    let times: Vec<SystemTime> = sequence.iter().map(|frame| frame.captured_at).collect();
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));

    Ok(())
}

#[test]
fn test_scan_empty_profile_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("nothing here"))?;

    let catalog = scan_frames(dir.path(), "png")?;
    assert!(catalog.frames.is_empty());
    assert_eq!(catalog.total_bytes(), 0);

    Ok(())
}

#[test]
fn test_scan_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_profile_does_not_exist_42");
    let result = scan_frames(&non_existent_path, "png");
    match result {
        Err(CoreError::PathError(_)) => {}
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_scan_does_not_follow_symlinks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let outside = tempdir()?;
    capture(outside.path(), "elsewhere.png", b"x", 1);
    capture(dir.path(), "own.png", b"x", 2);
    std::os::unix::fs::symlink(outside.path(), dir.path().join("linked"))?;

    let catalog = scan_frames(dir.path(), "png")?;
    assert_eq!(catalog.frames.len(), 1);
    assert_eq!(catalog.frames[0].path.file_name().unwrap(), "own.png");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_scan_skips_unreadable_directories() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let root = dir.path();
    capture(root, "a.png", b"a", 100);
    capture(root, "open/b.png", b"b", 200);
    capture(root, "locked/hidden.png", b"h", 300);

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::read_dir(&locked).is_ok() {
        // Running with privileges that ignore permission bits.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let result = scan_frames(root, "png");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
    let catalog = result?;

    let mut names: Vec<_> = catalog
        .frames
        .iter()
        .map(|frame| frame.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names, vec!["a.png", "b.png"]);
    assert!(catalog.skipped_entries >= 1);
    Ok(())
}
