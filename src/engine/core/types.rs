use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Suffix appended to the input file stem when deriving the output name
pub const OUTPUT_SUFFIX: &str = "_compressed";

/// Sentinel audio bitrate meaning "pass the audio stream through untouched"
pub const AUDIO_COPY: &str = "copy";

/// How the audio stream is handled by the encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioMode {
    /// Stream copy (`-c:a copy`)
    Copy,
    /// Re-encode to AAC at the given bitrate string (e.g. "64k")
    Bitrate(String),
}

impl AudioMode {
    /// Interpret a user-supplied bitrate; "copy" in any case selects passthrough
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(AUDIO_COPY) {
            AudioMode::Copy
        } else {
            AudioMode::Bitrate(value.to_string())
        }
    }
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioMode::Copy => f.write_str(AUDIO_COPY),
            AudioMode::Bitrate(rate) => f.write_str(rate),
        }
    }
}

/// Raw parameter values as typed by the user, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInput {
    pub frame_rate: String,
    pub quality_factor: String,
    pub audio_bitrate: String,
}

impl Default for ParamInput {
    fn default() -> Self {
        Self {
            frame_rate: "5".to_string(),
            quality_factor: "32".to_string(),
            audio_bitrate: "64k".to_string(),
        }
    }
}

/// Validated encoding parameters, frozen for the duration of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionParams {
    pub frame_rate: u32,
    pub quality_factor: i32,
    pub audio: AudioMode,
}

/// Everything a worker needs to run one batch. `files` is a snapshot of the
/// job list taken when the batch was started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub id: Uuid,
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub params: CompressionParams,
}

impl BatchRequest {
    pub fn new(files: Vec<PathBuf>, output_dir: PathBuf, params: CompressionParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            files,
            output_dir,
            params,
        }
    }
}

/// Result of encoding one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub success: bool,
    pub detail: String,
    pub size_before: Option<u64>,
    pub size_after: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
    /// A line relayed from the encoder's diagnostic stream
    Tool,
}

/// One line of the user-facing progress log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn tool(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Tool, message)
    }

    /// Render as plain text, error lines tagged
    pub fn display_text(&self) -> String {
        match self.level {
            LogLevel::Error => format!("error: {}", self.message),
            _ => self.message.clone(),
        }
    }
}

/// Derive `<output_dir>/<stem>_compressed<.ext>` for an input file.
/// Inputs sharing a file name map to the same output.
pub fn derive_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };

    output_dir.join(file_name)
}

/// File name component for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Bytes to MiB with two decimals, as shown in the log
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
