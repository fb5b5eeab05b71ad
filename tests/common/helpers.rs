#![allow(dead_code)]

use ffbatch::config::{Config, EncoderConfig};
use ffbatch::engine::{AudioMode, BatchEvent, CompressionParams, FileOutcome, LogLine};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Convert a Command to a string for testing/assertions
pub fn cmd_to_string(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();

    format!("{} {}", program, args.join(" "))
}

pub fn default_params() -> CompressionParams {
    CompressionParams {
        frame_rate: 5,
        quality_factor: 32,
        audio: AudioMode::Bitrate("64k".to_string()),
    }
}

/// Create empty placeholder inputs named `names` inside `dir`
pub fn touch_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"not really a video").unwrap();
            path
        })
        .collect()
}

/// Install a shell script standing in for ffmpeg. `body` runs with `$out`
/// set to the output path (the last argument).
#[cfg(unix)]
pub fn fake_encoder(dir: &Path, name: &str, body: &str) -> EncoderConfig {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    {
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "for out; do :; done").unwrap();
        writeln!(file, "{}", body).unwrap();
        file.sync_all().unwrap();
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    EncoderConfig {
        program: path.to_string_lossy().to_string(),
    }
}

/// Encoder that prints progress with carriage returns and writes the output
#[cfg(unix)]
pub fn succeeding_encoder(dir: &Path) -> EncoderConfig {
    fake_encoder(
        dir,
        "fake-ffmpeg-ok",
        r#"printf 'frame=1\rframe=2\n' >&2
printf 'muxing done\n' >&2
printf 'compressed bytes' > "$out"
exit 0"#,
    )
}

/// Encoder that complains and exits with `code`
#[cfg(unix)]
pub fn failing_encoder(dir: &Path, code: i32) -> EncoderConfig {
    fake_encoder(
        dir,
        "fake-ffmpeg-fail",
        &format!("printf 'Invalid data found\\n' >&2\nexit {}", code),
    )
}

/// A script the OS refuses to execute (no exec bits)
#[cfg(unix)]
pub fn non_executable_encoder(dir: &Path) -> EncoderConfig {
    use std::os::unix::fs::PermissionsExt;

    let encoder = fake_encoder(dir, "fake-ffmpeg-noexec", "exit 0");
    fs::set_permissions(&encoder.program, fs::Permissions::from_mode(0o644)).unwrap();
    encoder
}

/// Encoder that dies from SIGKILL partway through
#[cfg(unix)]
pub fn self_killing_encoder(dir: &Path) -> EncoderConfig {
    fake_encoder(
        dir,
        "fake-ffmpeg-killed",
        "printf 'frame=1\\n' >&2\nkill -9 $$",
    )
}

/// Write a config file pointing the encoder at `encoder`
pub fn write_config(dir: &Path, encoder: &EncoderConfig) -> PathBuf {
    let config = Config {
        encoder: encoder.clone(),
        ..Config::default()
    };
    let path = dir.join("ffbatch.toml");
    fs::write(&path, toml::to_string(&config).unwrap()).unwrap();
    path
}

pub fn outcomes(events: &[BatchEvent]) -> Vec<&FileOutcome> {
    events
        .iter()
        .filter_map(|e| match e {
            BatchEvent::Outcome(o) => Some(o),
            _ => None,
        })
        .collect()
}

pub fn log_lines(events: &[BatchEvent]) -> Vec<&LogLine> {
    events
        .iter()
        .filter_map(|e| match e {
            BatchEvent::Log(line) => Some(line),
            _ => None,
        })
        .collect()
}

pub fn messages(events: &[BatchEvent]) -> Vec<String> {
    log_lines(events)
        .into_iter()
        .map(|l| l.message.clone())
        .collect()
}
