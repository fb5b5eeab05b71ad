use super::scan::scan_streaming;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Ordered list of input files awaiting compression.
///
/// Behaves like an insertion-ordered set: adding a path that is already
/// present (exact equality) is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobList {
    files: Vec<PathBuf>,
}

impl JobList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already queued. Returns whether it was added.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.files.push(path);
        true
    }

    /// Add several paths, returning how many were new
    pub fn add_many<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.add(path) {
                added += 1;
            }
        }
        added
    }

    /// Add every video file found under `dir`, returning how many were new
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut added = 0;
        scan_streaming(dir, |path| {
            if self.add(path) {
                added += 1;
            }
        })?;
        Ok(added)
    }

    /// Remove the items at the given positions. Duplicate or out-of-range
    /// indices are ignored; survivors keep their relative order.
    pub fn remove_indices(&mut self, indices: &[usize]) -> usize {
        let doomed: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.files.len())
            .collect();

        // Back to front so earlier indices stay valid
        for &index in doomed.iter().rev() {
            self.files.remove(index);
        }

        doomed.len()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Copy of the current contents, handed to a batch so later edits to
    /// the list cannot affect it
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.files.clone()
    }
}
