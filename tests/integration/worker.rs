// Tests for the background batch worker and its message stream

use crate::common::helpers::default_params;
use ffbatch::config::EncoderConfig;
use ffbatch::engine::BatchRequest;
use ffbatch::engine::worker::{BatchWorker, WorkerMessage};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

const RECV_TIMEOUT: Duration = Duration::from_secs(30);

fn missing_encoder() -> EncoderConfig {
    EncoderConfig {
        program: "ffbatch-test-no-such-encoder".to_string(),
    }
}

/// Collect messages until BatchComplete arrives
fn collect_until_complete(worker: &BatchWorker) -> Vec<WorkerMessage> {
    let mut messages = Vec::new();
    loop {
        let msg = worker
            .receiver()
            .recv_timeout(RECV_TIMEOUT)
            .expect("worker should finish within timeout");
        let done = matches!(msg, WorkerMessage::BatchComplete { .. });
        messages.push(msg);
        if done {
            return messages;
        }
    }
}

#[test]
fn test_worker_starts_idle() {
    let worker = BatchWorker::new();
    assert!(!worker.is_running(), "Worker should start idle");
    assert!(worker.is_finished(), "No thread yet counts as finished");
    assert!(worker.drain(16).is_empty());
}

#[test]
fn test_worker_reports_every_file_then_completes() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let files = vec![PathBuf::from("/nowhere/a.mp4"), PathBuf::from("/nowhere/b.mp4")];
    let request = BatchRequest::new(files, temp_dir.path().to_path_buf(), default_params());
    let batch_id = request.id;

    let worker = BatchWorker::new();
    worker.spawn(request, missing_encoder()).unwrap();

    let messages = collect_until_complete(&worker);

    let outcomes: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            WorkerMessage::Outcome(o) => Some(o),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.success));
    assert!(outcomes[0].detail.contains("encoder not found"));

    match messages.last() {
        Some(WorkerMessage::BatchComplete { batch_id: id, total }) => {
            assert_eq!(*id, batch_id);
            assert_eq!(*total, 2);
        }
        other => panic!("Expected BatchComplete last, got {:?}", other),
    }
    assert!(!worker.is_running(), "Worker should be idle after completion");

    // The thread exits right after sending BatchComplete
    let deadline = std::time::Instant::now() + RECV_TIMEOUT;
    while !worker.is_finished() {
        assert!(std::time::Instant::now() < deadline, "batch thread never exited");
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(worker.drain(16).is_empty(), "nothing follows BatchComplete");
}

#[test]
fn test_worker_can_run_consecutive_batches() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let worker = BatchWorker::new();

    for _ in 0..2 {
        let request = BatchRequest::new(
            vec![PathBuf::from("/nowhere/a.mp4")],
            temp_dir.path().to_path_buf(),
            default_params(),
        );
        worker.spawn(request, missing_encoder()).unwrap();
        collect_until_complete(&worker);
    }
}

#[cfg(unix)]
#[test]
fn test_worker_rejects_second_batch_while_running() {
    use crate::common::helpers::fake_encoder;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let slow = fake_encoder(temp_dir.path(), "fake-ffmpeg-slow", "sleep 1\nexit 0");
    let request = || {
        BatchRequest::new(
            vec![PathBuf::from("/nowhere/a.mp4")],
            temp_dir.path().to_path_buf(),
            default_params(),
        )
    };

    let worker = BatchWorker::new();
    worker.spawn(request(), slow.clone()).unwrap();
    assert!(worker.is_running());
    assert!(!worker.is_finished());
    assert!(worker.spawn(request(), slow).is_err());

    collect_until_complete(&worker);
    assert!(!worker.is_running());
}

#[test]
fn test_worker_message_json_shape() {
    let msg = WorkerMessage::BatchComplete {
        batch_id: Uuid::nil(),
        total: 3,
    };
    let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

    assert_eq!(json["event"], "batch_complete");
    assert_eq!(json["total"], 3);
    assert_eq!(json["batch_id"], "00000000-0000-0000-0000-000000000000");
}
