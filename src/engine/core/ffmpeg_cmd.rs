use super::types::{AudioMode, CompressionParams};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Video codec used for every encode
pub const VIDEO_CODEC: &str = "libx264";

/// Speed/efficiency preset used for every encode
pub const PRESET: &str = "medium";

/// Audio codec used when the audio stream is re-encoded
pub const AUDIO_CODEC: &str = "aac";

/// Detail reported for a clean exit
pub const SUCCESS_DETAIL: &str = "completed successfully";

/// Why a single encode did not succeed. The `Display` text is the detail
/// shown to the user for the failed file.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("encoder not found — verify installation and path configuration")]
    NotFound,

    #[error("encoder exited with status {0}")]
    ExitStatus(i32),

    #[error("encoder terminated by signal {0}")]
    Signal(i32),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl EncodeError {
    fn from_spawn(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            EncodeError::NotFound
        } else {
            EncodeError::Unexpected(err.to_string())
        }
    }
}

/// Success flag plus human-readable detail for one encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeOutcome {
    pub success: bool,
    pub detail: String,
}

impl From<Result<(), EncodeError>> for InvokeOutcome {
    fn from(result: Result<(), EncodeError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                detail: SUCCESS_DETAIL.to_string(),
            },
            Err(e) => Self {
                success: false,
                detail: e.to_string(),
            },
        }
    }
}

/// Build the encoder command for one file.
///
/// `-i <input> -r <fps> -c:v libx264 -crf <q> -preset medium`, then either
/// `-c:a copy` or `-c:a aac -b:a <bitrate>`, then `-y <output>`.
pub fn build_compress_cmd(
    program: &str,
    input: &Path,
    output: &Path,
    params: &CompressionParams,
) -> Command {
    let mut cmd = Command::new(program);

    cmd.arg("-i").arg(input);
    cmd.arg("-r").arg(params.frame_rate.to_string());
    cmd.arg("-c:v").arg(VIDEO_CODEC);
    cmd.arg("-crf").arg(params.quality_factor.to_string());
    cmd.arg("-preset").arg(PRESET);

    match &params.audio {
        AudioMode::Copy => {
            cmd.arg("-c:a").arg("copy");
        }
        AudioMode::Bitrate(rate) => {
            cmd.arg("-c:a").arg(AUDIO_CODEC).arg("-b:a").arg(rate);
        }
    }

    cmd.arg("-y").arg(output);
    cmd
}

/// Format a command as a copy-pasteable shell line
pub fn format_ffmpeg_cmd(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| {
            let part = part.to_string_lossy();
            match shlex::try_quote(&part) {
                Ok(quoted) => quoted.into_owned(),
                Err(_) => part.into_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lines of an encoder's diagnostic stream.
///
/// Splits on `\n` and on `\r` (ffmpeg redraws its status line with carriage
/// returns), decodes lossily and skips blank lines. Ends at EOF.
pub struct DiagnosticLines<R> {
    reader: BufReader<R>,
    pending: Vec<u8>,
    done: bool,
}

impl<R: Read> DiagnosticLines<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: Vec::new(),
            done: false,
        }
    }

    fn take_line(&mut self) -> String {
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&bytes).trim().to_string()
    }
}

impl<R: Read> Iterator for DiagnosticLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if buf.is_empty() {
                self.done = true;
                let line = self.take_line();
                return if line.is_empty() { None } else { Some(Ok(line)) };
            }

            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    self.pending.extend_from_slice(&buf[..pos]);
                    self.reader.consume(pos + 1);
                    let line = self.take_line();
                    if !line.is_empty() {
                        return Some(Ok(line));
                    }
                }
                None => {
                    let len = buf.len();
                    self.pending.extend_from_slice(buf);
                    self.reader.consume(len);
                }
            }
        }
        None
    }
}

/// Map a finished process status to the encode result
pub fn classify_exit(status: ExitStatus) -> Result<(), EncodeError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(EncodeError::ExitStatus(code)),
        None => Err(EncodeError::Signal(terminating_signal(status))),
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or_default()
}

// Only unix processes end without an exit code
#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> i32 {
    0
}

/// Run an encoder command to completion, passing each diagnostic line to
/// `on_line` as it arrives. Blocks until the process exits; there is no
/// timeout.
pub fn run_encoder<F>(mut cmd: Command, mut on_line: F) -> Result<(), EncodeError>
where
    F: FnMut(&str),
{
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(EncodeError::from_spawn)?;

    let stderr = match child.stderr.take() {
        Some(stderr) => stderr,
        None => {
            let _ = child.wait();
            return Err(EncodeError::Unexpected(
                "failed to capture encoder diagnostics".to_string(),
            ));
        }
    };

    let mut read_error = None;
    for line in DiagnosticLines::new(stderr) {
        match line {
            Ok(line) => on_line(&line),
            Err(e) => {
                read_error = Some(e);
                break;
            }
        }
    }

    // The pipe is closed by now, so a stuck writer gets EPIPE instead of
    // blocking this wait forever.
    let status = child
        .wait()
        .map_err(|e| EncodeError::Unexpected(e.to_string()))?;

    if let Some(e) = read_error {
        return Err(EncodeError::Unexpected(e.to_string()));
    }

    classify_exit(status)
}

/// Build and run the encoder for one file, collapsing the result into a
/// success flag and detail message
pub fn invoke_encoder<F>(
    program: &str,
    input: &Path,
    output: &Path,
    params: &CompressionParams,
    on_line: F,
) -> InvokeOutcome
where
    F: FnMut(&str),
{
    let cmd = build_compress_cmd(program, input, output, params);
    run_encoder(cmd, on_line).into()
}
