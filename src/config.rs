use std::fs::File;
use std::io::{BufReader, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::decode::ResampleFilter,
    color::parse::Color,
    foundation::{
        core::DEFAULT_CANVAS_SIZE,
        error::{BannerError, BannerResult},
    },
    layout::grid::{BandArea, BandPlacement, DEFAULT_BAND_HEIGHT_RATIO},
    render::watermark::WatermarkPlacement,
};

/// Everything one banner run needs. JSON-facing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BannerConfig {
    #[serde(default)]
    pub input_folders: Vec<PathBuf>,
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    #[serde(default)]
    pub output_name: String,
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<PathBuf>,
    #[serde(default)]
    pub fill_empty_cells: bool,
    #[serde(default)]
    pub filter: ResampleFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_band: Option<InfoBandConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<WatermarkConfig>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InfoBandConfig {
    pub color: Color,
    #[serde(default)]
    pub placement: BandPlacement,
    #[serde(default = "default_height_ratio")]
    pub height_ratio: f64,
    #[serde(default = "default_label")]
    pub label: bool,
    /// Font file used for the label. Takes precedence over `font_family`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl InfoBandConfig {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            placement: BandPlacement::default(),
            height_ratio: DEFAULT_BAND_HEIGHT_RATIO,
            label: true,
            font: None,
            font_family: None,
        }
    }

    pub fn area(&self) -> BandArea {
        BandArea {
            placement: self.placement,
            height_ratio: self.height_ratio,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkConfig {
    pub image: PathBuf,
    /// 0 = invisible, 100 = opaque.
    pub transparency: u8,
    #[serde(default)]
    pub placement: WatermarkPlacement,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_canvas_size() -> u32 {
    DEFAULT_CANVAS_SIZE
}

fn default_height_ratio() -> f64 {
    DEFAULT_BAND_HEIGHT_RATIO
}

fn default_label() -> bool {
    true
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            input_folders: Vec::new(),
            output_root: default_output_root(),
            output_name: String::new(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            background: None,
            background_image: None,
            fill_empty_cells: false,
            filter: ResampleFilter::default(),
            info_band: None,
            watermark: None,
        }
    }
}

impl BannerConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BannerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BannerError::validation(format!("parse banner config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BannerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BannerError::validation(format!("open banner config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> BannerResult<()> {
        if self.input_folders.is_empty() {
            return Err(BannerError::validation("no input folders given"));
        }
        if self.output_name.trim().is_empty() {
            return Err(BannerError::validation("output name must not be empty"));
        }
        if self.canvas_size < 2 {
            return Err(BannerError::validation(format!(
                "canvas size {} is too small",
                self.canvas_size
            )));
        }
        if let Some(band) = &self.info_band
            && !(band.height_ratio > 0.0 && band.height_ratio < 1.0)
        {
            return Err(BannerError::validation(format!(
                "band height ratio {} must be inside (0, 1)",
                band.height_ratio
            )));
        }
        if let Some(wm) = &self.watermark
            && wm.transparency > 100
        {
            return Err(BannerError::validation(format!(
                "watermark transparency {} is outside 0..=100",
                wm.transparency
            )));
        }
        Ok(())
    }
}

/// Folders remembered between runs. Plain text, one path per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderList {
    pub folders: Vec<PathBuf>,
}

impl FolderList {
    const HEADER: &'static str = "# bannergrid input folders, one per line";

    pub fn load(path: impl AsRef<Path>) -> BannerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read folder list '{}'", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        let folders = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(PathBuf::from)
            .collect();
        Self { folders }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> BannerResult<()> {
        let path = path.as_ref();
        let mut f = File::create(path)
            .map_err(|e| BannerError::write_failure(format!("create '{}': {e}", path.display())))?;
        let mut body = String::from(Self::HEADER);
        body.push('\n');
        for folder in &self.folders {
            body.push_str(&folder.to_string_lossy());
            body.push('\n');
        }
        f.write_all(body.as_bytes())
            .map_err(|e| BannerError::write_failure(format!("write '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
