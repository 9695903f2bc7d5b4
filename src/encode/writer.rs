use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::foundation::{
    core::Canvas,
    error::{BannerError, BannerResult},
};

/// File name of the banner inside its run folder.
pub const OUTPUT_FILE_NAME: &str = "final_output.png";

/// `chrono` format of the folder timestamp, e.g. `05.03.2024 14-07-09`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H-%M-%S";

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip characters that are illegal in folder names on common filesystems, then trim
/// whitespace and dots.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();
    kept.trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// First character upper-case, the rest lower-case.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `<Name>_<timestamp>`.
pub fn banner_folder_name(name: &str, at: NaiveDateTime) -> BannerResult<String> {
    let clean = sanitize_name(name);
    if clean.is_empty() {
        return Err(BannerError::write_failure(format!(
            "output name '{name}' is empty after sanitizing"
        )));
    }
    Ok(format!("{}_{}", capitalize(&clean), format_timestamp(at)))
}

/// Write `canvas` to `<output_root>/<Name>_<timestamp>/final_output.png` and return the file path.
#[tracing::instrument(skip(canvas))]
pub fn write_output(
    canvas: &Canvas,
    output_root: &Path,
    name: &str,
    at: NaiveDateTime,
) -> BannerResult<PathBuf> {
    let folder = output_root.join(banner_folder_name(name, at)?);
    // No folder unless the canvas converts.
    let rgba = canvas.to_rgba_image()?;

    std::fs::create_dir_all(&folder).map_err(|e| {
        BannerError::write_failure(format!("create folder '{}': {e}", folder.display()))
    })?;
    let path = folder.join(OUTPUT_FILE_NAME);
    rgba.save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| BannerError::write_failure(format!("save '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), "banner written");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
