// Sequential batch controller: one encoder run per file, one outcome per file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::core::{
    BatchRequest, FileOutcome, LogLine, ParamInput, SUCCESS_DETAIL, build_compress_cmd,
    derive_output_path, display_name, format_ffmpeg_cmd, format_megabytes, run_encoder,
};
use super::validate::{ValidationError, validate_request};
use crate::config::EncoderConfig;

/// Prefix marking log lines relayed from the encoder
pub const TOOL_PREFIX: &str = "ffmpeg: ";

/// Separator emitted after each file
pub const SEPARATOR: &str = "------------------------------";

/// What a running batch reports, in order
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Log(LogLine),
    Outcome(FileOutcome),
    /// Emitted exactly once, after the last outcome
    Complete { batch_id: Uuid, total: usize },
}

/// Validate user input and freeze it into a request.
/// `files` is copied, so later edits to the caller's list do not leak in.
pub fn start_batch(
    files: &[PathBuf],
    output_dir: &Path,
    input: &ParamInput,
) -> Result<BatchRequest, ValidationError> {
    validate_request(files, output_dir, input)
}

/// The command line each file of `request` would run, without running it
pub fn dry_run_lines(request: &BatchRequest, encoder: &EncoderConfig) -> Vec<String> {
    request
        .files
        .iter()
        .map(|input| {
            let output = derive_output_path(input, &request.output_dir);
            format_ffmpeg_cmd(&build_compress_cmd(
                &encoder.program,
                input,
                &output,
                &request.params,
            ))
        })
        .collect()
}

fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}

/// Process every file of the request strictly in order. Failures are
/// recorded and the loop moves on; nothing here aborts the batch.
pub fn run_batch<F>(request: &BatchRequest, encoder: &EncoderConfig, mut sink: F)
where
    F: FnMut(BatchEvent),
{
    let span = info_span!("batch", id = %request.id, files = request.files.len());
    let _guard = span.enter();

    let total = request.files.len();
    info!(output_dir = %request.output_dir.display(), "batch started");

    for (index, input) in request.files.iter().enumerate() {
        let outcome = process_file(request, encoder, index, input, &mut sink);
        sink(BatchEvent::Outcome(outcome));
        sink(BatchEvent::Log(LogLine::info(SEPARATOR)));
    }

    sink(BatchEvent::Log(LogLine::info("all files processed.")));
    info!("batch complete");
    sink(BatchEvent::Complete {
        batch_id: request.id,
        total,
    });
}

fn process_file<F>(
    request: &BatchRequest,
    encoder: &EncoderConfig,
    index: usize,
    input: &Path,
    sink: &mut F,
) -> FileOutcome
where
    F: FnMut(BatchEvent),
{
    let total = request.files.len();
    let output = derive_output_path(input, &request.output_dir);

    sink(BatchEvent::Log(LogLine::info(format!(
        "--- [{}/{}] processing: {} ---",
        index + 1,
        total,
        display_name(input)
    ))));
    info!(input = %input.display(), "[{}/{}] encoding", index + 1, total);

    let size_before = file_size(input);
    if let Some(bytes) = size_before {
        sink(BatchEvent::Log(LogLine::info(format!(
            "original size: {}",
            format_megabytes(bytes)
        ))));
    }

    let cmd = build_compress_cmd(&encoder.program, input, &output, &request.params);
    let cmd_line = format_ffmpeg_cmd(&cmd);
    debug!(command = %cmd_line, "launching encoder");
    sink(BatchEvent::Log(LogLine::info(format!("command: {}", cmd_line))));

    let result = run_encoder(cmd, |line| {
        sink(BatchEvent::Log(LogLine::tool(format!("{}{}", TOOL_PREFIX, line))));
    });

    let (success, detail, size_after) = match result {
        Ok(()) => {
            let size_after = file_size(&output);
            let message = match size_after {
                Some(bytes) => format!(
                    "compressed: {} ({})",
                    display_name(&output),
                    format_megabytes(bytes)
                ),
                None => format!("compressed: {}", display_name(&output)),
            };
            sink(BatchEvent::Log(LogLine::info(message)));
            info!(output = %output.display(), "encode succeeded");
            (true, SUCCESS_DETAIL.to_string(), size_after)
        }
        Err(e) => {
            let detail = e.to_string();
            warn!(input = %input.display(), error = %detail, "encode failed");
            sink(BatchEvent::Log(LogLine::error(format!(
                "failed: {}. detail: {}",
                display_name(input),
                detail
            ))));
            (false, detail, None)
        }
    };

    FileOutcome {
        input: input.to_path_buf(),
        output,
        success,
        detail,
        size_before,
        size_after,
    }
}
