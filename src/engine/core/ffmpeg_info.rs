use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Check that the encoder can be launched and return its version banner
pub fn ffmpeg_version(program: &str) -> Result<String> {
    let output = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute {}. Is it installed and in PATH?", program))?;

    if !output.status.success() {
        anyhow::bail!("{} -version failed with status: {}", program, output.status);
    }

    Ok(parse_version_banner(&String::from_utf8_lossy(&output.stdout)))
}

/// First line of `-version` output
pub fn parse_version_banner(stdout: &str) -> String {
    stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or("Unknown version")
        .to_string()
}
