use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::BannerResult;

/// File extensions accepted as source images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Collect supported images from each folder, non-recursively.
///
/// Folder order is kept; within a folder entries are sorted by file name. Other files and
/// subdirectories are skipped.
pub fn discover_images(folders: &[PathBuf]) -> BannerResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for folder in folders {
        let mut found = Vec::new();
        let rd = std::fs::read_dir(folder)
            .with_context(|| format!("read input folder '{}'", folder.display()))?;
        for entry in rd {
            let entry =
                entry.with_context(|| format!("list input folder '{}'", folder.display()))?;
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                found.push(path);
            }
        }
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        tracing::debug!(folder = %folder.display(), count = found.len(), "scanned input folder");
        out.extend(found);
    }
    Ok(out)
}

/// Number of `.png` sources; the band label advertises this count.
pub fn count_png(paths: &[PathBuf]) -> usize {
    paths
        .iter()
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .count()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;
