//! Integration tests for the tracksplit binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use tracksplit::audio::{DecodedAudio, EncoderSettings, encode_mp3};
use tracksplit::splitter::TimeRangeMs;

fn write_mix(path: &Path, seconds: usize) {
    let rate = 44_100;
    let channel: Vec<i16> = (0..seconds * rate)
        .map(|i| ((i as f32 * 0.04).sin() * 4000.0) as i16)
        .collect();
    let audio = DecodedAudio::new(vec![channel], rate as u32);
    let range = TimeRangeMs::new(0, audio.duration_ms());
    let bytes = encode_mp3(&audio.slice(range), EncoderSettings::default()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn setup(tracklist: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_mix(&dir.path().join("mix.mp3"), 3);
    fs::write(dir.path().join("tracklist.txt"), tracklist).unwrap();
    dir
}

#[test]
fn test_requires_input_tracklist_and_output() {
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.arg("-i").arg("mix.mp3");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--tracklist").and(predicate::str::contains("--output")));
}

#[test]
fn test_rejects_unsupported_bitrate() {
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.args(["-i", "a.mp3", "-t", "b.txt", "-o", "c", "--bitrate", "100"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("bitrate must be one of"));
}

#[test]
fn test_config_path_prints_toml_path() {
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.args(["config", "path"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = setup("00:00 A\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path())
        .args(["-i", "missing.mp3", "-t", "tracklist.txt", "-o", "out", "-y"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input file does not exist"));
}

#[test]
fn test_interactive_exclusion_from_stdin() {
    let dir = setup("00:00 A\n00:01 B\n00:02 C\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path())
        .args(["-i", "mix.mp3", "-t", "tracklist.txt", "-o", "out", "--no-progress"])
        .write_stdin("2\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Here is a list of all track names:"))
        .stdout(predicate::str::contains("1: A"))
        .stdout(predicate::str::contains("Skipping B."))
        .stdout(predicate::str::contains("Saved 01 - A.mp3"))
        .stdout(predicate::str::contains("Saved 03 - C.mp3"))
        .stdout(predicate::str::contains("Splitting complete."));

    let out = dir.path().join("out");
    assert!(out.join("01 - A.mp3").exists());
    assert!(!out.join("02 - B.mp3").exists());
    assert!(out.join("03 - C.mp3").exists());
}

#[test]
fn test_exclude_flag_skips_prompt() {
    let dir = setup("00:00 A\n00:01 B\n00:02 C\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path()).args([
        "-i",
        "mix.mp3",
        "-t",
        "tracklist.txt",
        "-o",
        "out",
        "-x",
        "1-2",
        "--no-progress",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Here is a list").not())
        .stdout(predicate::str::contains("Saved 03 - C.mp3"));

    assert!(!dir.path().join("out").join("01 - A.mp3").exists());
}

#[test]
fn test_rejected_exclusion_tokens_are_reported() {
    let dir = setup("00:00 A\n00:01 B\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path())
        .args(["-i", "mix.mp3", "-t", "tracklist.txt", "-o", "out", "--no-progress"])
        .write_stdin("x-2, foo, 2\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Invalid range format: x-2"))
        .stdout(predicate::str::contains("Not a track number or range: foo"))
        .stdout(predicate::str::contains("Skipping B."));
}

#[test]
fn test_malformed_timestamp_aborts() {
    let dir = setup("00:00 A\n2:60:00 X\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path())
        .args(["-i", "mix.mp3", "-t", "tracklist.txt", "-o", "out", "-y"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid timestamp '2:60:00'"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_dry_run_prints_plan() {
    let dir = setup("00:00 A\n00:01 B\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path())
        .args(["-i", "mix.mp3", "-t", "tracklist.txt", "-o", "out", "-x", "1", "--dry-run"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("01 - A.mp3 0:00-0:01 (skipped)"))
        .stdout(predicate::str::contains("02 - B.mp3 0:01-"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_exclude_range_with_huge_bound() {
    let dir = setup("00:00 A\n00:01 B\n00:02 C\n");
    let mut cmd = cargo_bin_cmd!("tracksplit");
    cmd.current_dir(dir.path()).args([
        "-i",
        "mix.mp3",
        "-t",
        "tracklist.txt",
        "-o",
        "out",
        "-x",
        "2-18446744073709551615",
        "--dry-run",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("01 - A.mp3 0:00-0:01\n"))
        .stdout(predicate::str::contains("02 - B.mp3 0:01-0:02 (skipped)"))
        .stdout(predicate::str::contains("03 - C.mp3 0:02-"));
}
