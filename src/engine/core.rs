mod ffmpeg_cmd;
mod ffmpeg_info;
mod job_list;
mod scan;
mod types;

pub use ffmpeg_cmd::{
    AUDIO_CODEC, DiagnosticLines, EncodeError, InvokeOutcome, PRESET, SUCCESS_DETAIL, VIDEO_CODEC,
    build_compress_cmd, classify_exit, format_ffmpeg_cmd, invoke_encoder, run_encoder,
};
pub use ffmpeg_info::{ffmpeg_version, parse_version_banner};
pub use job_list::JobList;
pub use scan::{expand_inputs, is_video_file, scan, scan_streaming};
pub use types::{
    AUDIO_COPY, AudioMode, BatchRequest, CompressionParams, FileOutcome, LogLevel, LogLine,
    OUTPUT_SUFFIX, ParamInput, derive_output_path, display_name, format_megabytes,
};
