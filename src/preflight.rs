use std::path::{Path, PathBuf};

use crate::{assets::discover::is_supported_image, config::BannerConfig};

/// Environment problems found before any image is decoded.
#[derive(thiserror::Error, Debug)]
pub enum PreflightError {
    #[error("input folder '{}' does not exist", .0.display())]
    MissingFolder(PathBuf),

    #[error("input path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot list '{}': {reason}", path.display())]
    Unlistable { path: PathBuf, reason: String },

    #[error("output root '{}' is not usable: {reason}", path.display())]
    OutputRoot { path: PathBuf, reason: String },
}

/// Supported image count per input folder, in config order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreflightReport {
    pub folders: Vec<(PathBuf, usize)>,
}

impl PreflightReport {
    pub fn total_images(&self) -> usize {
        self.folders.iter().map(|(_, n)| n).sum()
    }
}

/// Check folders and output root without creating anything.
pub fn check(cfg: &BannerConfig) -> Result<PreflightReport, PreflightError> {
    let mut report = PreflightReport::default();
    for folder in &cfg.input_folders {
        report.folders.push((folder.clone(), count_images(folder)?));
    }
    check_output_root(&cfg.output_root)?;
    tracing::debug!(
        folders = report.folders.len(),
        images = report.total_images(),
        "preflight passed"
    );
    Ok(report)
}

fn count_images(folder: &Path) -> Result<usize, PreflightError> {
    if !folder.exists() {
        return Err(PreflightError::MissingFolder(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(PreflightError::NotADirectory(folder.to_path_buf()));
    }
    let unlistable = |e: std::io::Error| PreflightError::Unlistable {
        path: folder.to_path_buf(),
        reason: e.to_string(),
    };
    let entries = std::fs::read_dir(folder).map_err(unlistable)?;
    count_entries(entries.map(|entry| entry.map(|e| e.path())), unlistable)
}

/// Count supported image files. The first entry that fails to read aborts the count.
fn count_entries(
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
    unlistable: impl Fn(std::io::Error) -> PreflightError,
) -> Result<usize, PreflightError> {
    let mut count = 0;
    for entry in entries {
        let path = entry.map_err(&unlistable)?;
        if path.is_file() && is_supported_image(&path) {
            count += 1;
        }
    }
    Ok(count)
}

/// The root, or its closest existing ancestor, must be a directory.
fn check_output_root(root: &Path) -> Result<(), PreflightError> {
    let mut current = Some(root);
    while let Some(dir) = current {
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        if dir.exists() {
            return if dir.is_dir() {
                Ok(())
            } else {
                Err(PreflightError::OutputRoot {
                    path: root.to_path_buf(),
                    reason: format!("'{}' is not a directory", dir.display()),
                })
            };
        }
        current = dir.parent();
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/preflight.rs"]
mod tests;
