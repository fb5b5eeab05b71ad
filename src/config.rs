// Startup configuration. Read once from an explicit TOML file; never written back.

use crate::engine::core::ParamInput;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encoder binary name (looked up on PATH) or full path
    #[serde(default = "default_program")]
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Initial frame rate field value
    #[serde(default = "default_frame_rate")]
    pub frame_rate: String,

    /// Initial CRF field value (lower = better quality, bigger files)
    #[serde(default = "default_quality_factor")]
    pub quality_factor: String,

    /// Initial audio bitrate, or "copy" for passthrough
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Output directory to preselect
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

fn default_frame_rate() -> String {
    ParamInput::default().frame_rate
}

fn default_quality_factor() -> String {
    ParamInput::default().quality_factor
}

fn default_audio_bitrate() -> String {
    ParamInput::default().audio_bitrate
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            quality_factor: default_quality_factor(),
            audio_bitrate: default_audio_bitrate(),
            output_dir: None,
        }
    }
}

impl DefaultsConfig {
    /// Parameter field values to start from
    pub fn param_input(&self) -> ParamInput {
        ParamInput {
            frame_rate: self.frame_rate.clone(),
            quality_factor: self.quality_factor.clone(),
            audio_bitrate: self.audio_bitrate.clone(),
        }
    }
}

impl Config {
    /// Parse config from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    /// Load config from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load from `path` when given, built-in defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }
}
