// Headless `run` exit codes and JSON output, driven through the binary
#![cfg(unix)]

use crate::common::helpers::*;
use ffbatch::config::EncoderConfig;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_ffbatch(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ffbatch"))
        .arg("run")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to launch ffbatch")
}

/// Inputs in one temp dir, an empty output dir in another
fn run_with(encoder: impl Fn(&Path) -> EncoderConfig, extra: &[&str]) -> (Output, TempDir) {
    let work = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let config = write_config(work.path(), &encoder(work.path()));
    let files = touch_inputs(work.path(), &["a.mp4", "b.mov"]);

    let mut args: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    args.push("-o".to_string());
    args.push(out_dir.path().display().to_string());
    args.extend(extra.iter().map(|s| s.to_string()));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    (run_ffbatch(&config, &args), out_dir)
}

#[test]
fn test_run_exits_zero_when_every_file_succeeds() {
    let (output, out_dir) = run_with(succeeding_encoder, &[]);

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert!(out_dir.path().join("a_compressed.mp4").exists());
    assert!(out_dir.path().join("b_compressed.mov").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ffmpeg: frame=2"));
    assert!(stdout.trim_end().ends_with("all files processed."));
}

#[test]
fn test_run_exits_one_when_any_file_fails() {
    let (output, _out_dir) = run_with(|dir| failing_encoder(dir, 3), &[]);

    assert_eq!(output.status.code(), Some(1), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: failed: a.mp4. detail: encoder exited with status 3"));
    assert!(stdout.contains("--- [2/2] processing: b.mov ---"));
}

#[test]
fn test_run_exits_two_on_missing_output_dir() {
    let work = TempDir::new().unwrap();
    let marker = work.path().join("launched");
    let encoder = fake_encoder(
        work.path(),
        "fake-ffmpeg-marker",
        &format!("touch '{}'", marker.display()),
    );
    let config = write_config(work.path(), &encoder);
    let files = touch_inputs(work.path(), &["a.mp4"]);
    let missing = work.path().join("no-such-dir");

    let output = run_ffbatch(
        &config,
        &[
            files[0].to_str().unwrap(),
            "-o",
            missing.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(2), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid output directory"));
    assert!(!marker.exists());
}

#[test]
fn test_run_exits_two_on_non_numeric_fps() {
    let (output, _out_dir) = run_with(succeeding_encoder, &["--fps", "fast"]);
    assert_eq!(output.status.code(), Some(2), "{:?}", output);
}

#[test]
fn test_run_json_emits_one_event_per_line() {
    let (output, _out_dir) = run_with(succeeding_encoder, &["--json"]);
    assert_eq!(output.status.code(), Some(0), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON event"))
        .collect();

    let outcomes: Vec<&serde_json::Value> =
        events.iter().filter(|e| e["event"] == "outcome").collect();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o["success"] == true));

    let last = events.last().expect("at least one event");
    assert_eq!(last["event"], "batch_complete");
    assert_eq!(last["total"], 2);
}
