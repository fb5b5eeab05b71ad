// Background worker that runs one batch at a time off the UI thread

use anyhow::{Result, bail};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use uuid::Uuid;

use super::batch::{BatchEvent, run_batch};
use super::core::{BatchRequest, FileOutcome, LogLine};
use crate::config::EncoderConfig;

/// Message from the worker thread to the UI thread
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkerMessage {
    /// A line for the progress log
    Log(LogLine),

    /// One file finished (successfully or not)
    Outcome(FileOutcome),

    /// Every file of the batch has been processed
    BatchComplete { batch_id: Uuid, total: usize },
}

impl From<BatchEvent> for WorkerMessage {
    fn from(event: BatchEvent) -> Self {
        match event {
            BatchEvent::Log(line) => WorkerMessage::Log(line),
            BatchEvent::Outcome(outcome) => WorkerMessage::Outcome(outcome),
            BatchEvent::Complete { batch_id, total } => {
                WorkerMessage::BatchComplete { batch_id, total }
            }
        }
    }
}

/// Runs batches on a dedicated thread and funnels their events back through
/// an unbounded channel. Only one batch may be in flight.
pub struct BatchWorker {
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    running: Arc<AtomicBool>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

/// Clears the running flag if the batch thread unwinds before BatchComplete.
/// A normal exit leaves it alone: a follow-up batch may already own it.
struct PanicGuard(Arc<AtomicBool>);

impl Drop for PanicGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.store(false, Ordering::SeqCst);
        }
    }
}

impl Default for BatchWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        Self {
            tx,
            rx,
            running: Arc::new(AtomicBool::new(false)),
            thread: Mutex::new(None),
        }
    }

    /// Get the receiver for worker messages
    pub fn receiver(&self) -> &Receiver<WorkerMessage> {
        &self.rx
    }

    /// Whether a batch is currently in flight
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start processing `request` on a new thread
    pub fn spawn(&self, request: BatchRequest, encoder: EncoderConfig) -> Result<()> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            bail!("a batch is already running");
        }

        let tx = self.tx.clone();
        let running = self.running.clone();

        let spawned = thread::Builder::new()
            .name(format!("batch-{}", request.id))
            .spawn(move || {
                let _guard = PanicGuard(running.clone());
                run_batch(&request, &encoder, |event| {
                    if matches!(event, BatchEvent::Complete { .. }) {
                        // Cleared before the message lands so a receiver that
                        // sees BatchComplete can start the next batch at once
                        running.store(false, Ordering::SeqCst);
                    }
                    let _ = tx.send(event.into());
                });
            });

        match spawned {
            Ok(handle) => {
                if let Ok(mut thread) = self.thread.lock() {
                    *thread = Some(handle);
                }
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                bail!("failed to spawn batch thread: {}", e);
            }
        }
    }

    /// Whether the last batch thread has exited, normally or by panic.
    /// Every message it sent is already queued once this returns true.
    pub fn is_finished(&self) -> bool {
        self.thread
            .lock()
            .map(|thread| thread.as_ref().is_none_or(|h| h.is_finished()))
            .unwrap_or(true)
    }

    /// Drain up to `limit` pending messages without blocking
    pub fn drain(&self, limit: usize) -> Vec<WorkerMessage> {
        let mut messages = Vec::new();
        while messages.len() < limit {
            match self.rx.try_recv() {
                Ok(msg) => messages.push(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}
