use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffbatch")]
#[command(about = "Batch video compressor driving ffmpeg, with a live TUI log", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Files or directories to pre-load into the job list
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output directory to preselect
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read defaults from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Append diagnostic logs to this file while the TUI runs
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Debug-level diagnostic logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Parameters shared by the headless commands. Unset values fall back to the
/// config file, then to built-in defaults.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Files or directories to compress
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory to write compressed files into (must exist)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output frame rate
    #[arg(long, value_name = "FPS")]
    pub fps: Option<String>,

    /// Quality factor (CRF); lower means better quality and bigger files
    #[arg(long, value_name = "CRF")]
    pub crf: Option<String>,

    /// Audio bitrate such as 64k, or "copy" to keep the original audio
    #[arg(long, value_name = "BITRATE")]
    pub audio_bitrate: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress files without the TUI, printing the log to stdout
    Run {
        #[command(flatten)]
        batch: BatchArgs,

        /// Emit events as JSON lines instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show the encoder command for each file without executing
    DryRun {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Check that the encoder is installed
    CheckFfmpeg,
}

pub fn parse() -> Cli {
    Cli::parse()
}
