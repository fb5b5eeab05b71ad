// End-to-end batch runs against a scripted stand-in for ffmpeg
#![cfg(unix)]

use crate::common::helpers::*;
use ffbatch::engine::{
    BatchEvent, LogLevel, ParamInput, SUCCESS_DETAIL, ValidationError, invoke_encoder, run_batch,
    start_batch,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_successful_batch_writes_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = succeeding_encoder(temp_dir.path());
    let files = touch_inputs(temp_dir.path(), &["a.mp4", "b.mov"]);

    let request = start_batch(&files, out_dir.path(), &ParamInput::default()).unwrap();
    let mut events = Vec::new();
    run_batch(&request, &encoder, |e| events.push(e));

    let outcomes = outcomes(&events);
    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert!(outcome.success, "{:?}", outcome);
        assert_eq!(outcome.detail, SUCCESS_DETAIL);
        assert!(outcome.output.exists());
        assert_eq!(outcome.size_after, Some("compressed bytes".len() as u64));
    }
    assert_eq!(outcomes[0].output, out_dir.path().join("a_compressed.mp4"));
    assert_eq!(outcomes[1].output, out_dir.path().join("b_compressed.mov"));

    let messages = messages(&events);
    assert!(messages.iter().any(|m| m == "compressed: a_compressed.mp4 (0.00 MB)"));
    assert_eq!(messages.last().map(String::as_str), Some("all files processed."));
}

#[test]
fn test_encoder_output_is_relayed_line_by_line() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = succeeding_encoder(temp_dir.path());
    let files = touch_inputs(temp_dir.path(), &["a.mp4"]);

    let request = start_batch(&files, out_dir.path(), &ParamInput::default()).unwrap();
    let mut events = Vec::new();
    run_batch(&request, &encoder, |e| events.push(e));

    let tool: Vec<String> = log_lines(&events)
        .into_iter()
        .filter(|l| l.level == LogLevel::Tool)
        .map(|l| l.message.clone())
        .collect();

    // Carriage-return redraws arrive as separate lines
    assert_eq!(
        tool,
        vec![
            "ffmpeg: frame=1".to_string(),
            "ffmpeg: frame=2".to_string(),
            "ffmpeg: muxing done".to_string(),
        ]
    );
}

#[test]
fn test_nonzero_exit_is_reported_and_batch_continues() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = failing_encoder(temp_dir.path(), 3);
    let files = touch_inputs(temp_dir.path(), &["broken.mp4", "next.mp4"]);

    let request = start_batch(&files, out_dir.path(), &ParamInput::default()).unwrap();
    let mut events = Vec::new();
    run_batch(&request, &encoder, |e| events.push(e));

    let outcomes = outcomes(&events);
    assert_eq!(outcomes.len(), 2, "second file must still be attempted");
    for outcome in &outcomes {
        assert!(!outcome.success);
        assert!(outcome.detail.contains('3'), "{}", outcome.detail);
        assert_eq!(outcome.size_after, None);
    }

    let errors: Vec<String> = log_lines(&events)
        .into_iter()
        .filter(|l| l.level == LogLevel::Error)
        .map(|l| l.message.clone())
        .collect();
    assert_eq!(
        errors,
        vec![
            "failed: broken.mp4. detail: encoder exited with status 3".to_string(),
            "failed: next.mp4. detail: encoder exited with status 3".to_string(),
        ]
    );
}

#[test]
fn test_outcomes_follow_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = succeeding_encoder(temp_dir.path());
    let names = ["d.mp4", "a.mp4", "c.mkv", "b.webm"];
    let files = touch_inputs(temp_dir.path(), &names);

    let request = start_batch(&files, out_dir.path(), &ParamInput::default()).unwrap();
    let mut events = Vec::new();
    run_batch(&request, &encoder, |e| events.push(e));

    let inputs: Vec<_> = outcomes(&events).iter().map(|o| o.input.clone()).collect();
    assert_eq!(inputs, files);

    let headers: Vec<String> = messages(&events)
        .into_iter()
        .filter(|m| m.starts_with("--- ["))
        .collect();
    assert_eq!(headers[0], "--- [1/4] processing: d.mp4 ---");
    assert_eq!(headers[3], "--- [4/4] processing: b.webm ---");

    let completes = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::Complete { total: 4, .. }))
        .count();
    assert_eq!(completes, 1);
    assert!(matches!(events.last(), Some(BatchEvent::Complete { .. })));
}

#[test]
fn test_invalid_output_dir_launches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let marker = temp_dir.path().join("launched");
    let _encoder = fake_encoder(
        temp_dir.path(),
        "fake-ffmpeg-marker",
        &format!("touch '{}'", marker.display()),
    );
    let files = touch_inputs(temp_dir.path(), &["a.mp4"]);

    let missing = temp_dir.path().join("no-such-dir");
    let err = start_batch(&files, &missing, &ParamInput::default()).unwrap_err();

    assert_eq!(err, ValidationError::InvalidOutputDir);
    assert!(!marker.exists());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
}

#[test]
fn test_later_list_edits_do_not_leak_into_request() {
    let temp_dir = TempDir::new().unwrap();
    let mut files = touch_inputs(temp_dir.path(), &["a.mp4"]);

    let request = start_batch(&files, temp_dir.path(), &ParamInput::default()).unwrap();
    files.push(temp_dir.path().join("late.mp4"));

    assert_eq!(request.files.len(), 1);
}

#[test]
fn test_launch_fault_reports_unexpected_error() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = non_executable_encoder(temp_dir.path());
    let input = temp_dir.path().join("a.mp4");

    let outcome = invoke_encoder(
        &encoder.program,
        &input,
        &out_dir.path().join("a_compressed.mp4"),
        &default_params(),
        |_| {},
    );

    assert!(!outcome.success);
    assert!(
        outcome.detail.starts_with("unexpected error:"),
        "{}",
        outcome.detail
    );
}

#[test]
fn test_signal_kill_reports_signal_number() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let encoder = self_killing_encoder(temp_dir.path());
    let input = temp_dir.path().join("a.mp4");

    let mut lines = Vec::new();
    let outcome = invoke_encoder(
        &encoder.program,
        &input,
        &out_dir.path().join("a_compressed.mp4"),
        &default_params(),
        |line| lines.push(line.to_string()),
    );

    assert!(!outcome.success);
    assert_eq!(outcome.detail, "encoder terminated by signal 9");
    assert_eq!(lines, vec!["frame=1".to_string()]);
}

#[test]
fn test_abnormal_failures_do_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let files = touch_inputs(temp_dir.path(), &["a.mp4", "b.mp4"]);
    let request = start_batch(&files, out_dir.path(), &ParamInput::default()).unwrap();

    for encoder in [
        non_executable_encoder(temp_dir.path()),
        self_killing_encoder(temp_dir.path()),
    ] {
        let mut events = Vec::new();
        run_batch(&request, &encoder, |e| events.push(e));

        let outcomes = outcomes(&events);
        assert_eq!(outcomes.len(), 2, "second file must still be attempted");
        assert!(outcomes.iter().all(|o| !o.success));
        assert_eq!(outcomes[1].input, files[1]);
        assert!(matches!(events.last(), Some(BatchEvent::Complete { total: 2, .. })));
    }
}
