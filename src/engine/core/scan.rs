use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions offered when expanding a directory into jobs. This is a hint
/// only: individually added files are accepted whatever their extension.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v", "wmv", "flv"];

/// Check if a path has a video file extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Walk a directory and invoke a callback for each video file found, in
/// file-name order so the resulting job list is stable.
pub fn scan_streaming<F>(root: &Path, mut on_file: F) -> Result<()>
where
    F: FnMut(PathBuf),
{
    if !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_file() && is_video_file(path) {
            on_file(path.to_path_buf());
        }
    }

    Ok(())
}

/// Walk a directory and collect its video files
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    scan_streaming(root, |path| files.push(path))?;
    Ok(files)
}

/// Expand command-line style arguments: directories are scanned for video
/// files, anything else is taken verbatim.
pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(scan(path)?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}
