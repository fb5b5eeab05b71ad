//! Pre-batch validation of user input. Nothing is launched unless this passes.

use crate::engine::core::{AudioMode, BatchRequest, CompressionParams, ParamInput};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no files selected")]
    NoFiles,

    #[error("invalid output directory")]
    InvalidOutputDir,

    #[error("non-numeric parameter: {field} = {value:?}")]
    NonNumeric { field: &'static str, value: String },

    #[error("frame rate must be positive, got {0}")]
    NonPositiveFrameRate(i64),

    #[error("audio bitrate is empty")]
    EmptyAudioBitrate,
}

/// Check that the output directory is set and is an existing directory
pub fn validate_output_dir(output_dir: &Path) -> Result<(), ValidationError> {
    if output_dir.as_os_str().is_empty() || !output_dir.is_dir() {
        return Err(ValidationError::InvalidOutputDir);
    }
    Ok(())
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NonNumeric {
            field,
            value: value.to_string(),
        })
}

/// Parse raw parameter strings into a frozen parameter set
pub fn validate_params(input: &ParamInput) -> Result<CompressionParams, ValidationError> {
    let frame_rate = parse_int("frame_rate", &input.frame_rate)?;
    let quality_factor = parse_int("quality_factor", &input.quality_factor)?;

    let frame_rate = u32::try_from(frame_rate)
        .ok()
        .filter(|&fps| fps > 0)
        .ok_or(ValidationError::NonPositiveFrameRate(frame_rate))?;

    let quality_factor =
        i32::try_from(quality_factor).map_err(|_| ValidationError::NonNumeric {
            field: "quality_factor",
            value: input.quality_factor.clone(),
        })?;

    if input.audio_bitrate.trim().is_empty() {
        return Err(ValidationError::EmptyAudioBitrate);
    }

    Ok(CompressionParams {
        frame_rate,
        quality_factor,
        audio: AudioMode::parse(&input.audio_bitrate),
    })
}

/// Run every pre-batch check, in order: files, output directory, parameters.
/// On success the returned request owns its own copy of `files`.
pub fn validate_request(
    files: &[PathBuf],
    output_dir: &Path,
    input: &ParamInput,
) -> Result<BatchRequest, ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::NoFiles);
    }
    validate_output_dir(output_dir)?;
    let params = validate_params(input)?;

    Ok(BatchRequest::new(
        files.to_vec(),
        output_dir.to_path_buf(),
        params,
    ))
}
