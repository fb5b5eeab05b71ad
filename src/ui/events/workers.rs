use super::*;
use crate::engine::worker::WorkerMessage;

/// Apply one worker message on the UI thread
pub fn handle_worker_message(msg: WorkerMessage, state: &mut AppState) {
    match msg {
        WorkerMessage::Log(line) => state.log.push(line),
        WorkerMessage::Outcome(outcome) => {
            tracing::debug!(
                input = %outcome.input.display(),
                success = outcome.success,
                "outcome received"
            );
        }
        WorkerMessage::BatchComplete { batch_id, total } => {
            tracing::info!(batch = %batch_id, files = total, "batch finished");
            state.batch_running = false;
            state.batch_size = 0;
        }
    }
}
