use std::path::PathBuf;

use image::DynamicImage;

use crate::{
    assets::decode::{ResampleFilter, load_image, premul_image, stretch_to},
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where the watermark lands on the canvas.
pub enum WatermarkPlacement {
    /// Stretched (aspect ratio ignored) over the full canvas.
    #[default]
    Stretch,
    /// Native size, centered, clipped to the canvas.
    Center,
}

/// Watermark overlay: image, transparency percent (0 = invisible, 100 = opaque), placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatermarkSpec {
    pub image: PathBuf,
    transparency: u8,
    pub placement: WatermarkPlacement,
}

impl WatermarkSpec {
    pub fn new(
        image: impl Into<PathBuf>,
        transparency: u8,
        placement: WatermarkPlacement,
    ) -> BannerResult<Self> {
        if transparency > 100 {
            return Err(BannerError::validation(format!(
                "watermark transparency {transparency} is outside 0..=100"
            )));
        }
        Ok(Self {
            image: image.into(),
            transparency,
            placement,
        })
    }

    pub fn transparency(&self) -> u8 {
        self.transparency
    }

    /// Blend factor in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        f32::from(self.transparency) / 100.0
    }
}

/// Load the watermark image and blend it over the canvas.
pub fn apply_watermark(
    canvas: &mut Canvas,
    spec: &WatermarkSpec,
    filter: ResampleFilter,
) -> BannerResult<()> {
    let img = load_image(&spec.image)?;
    blend_watermark(canvas, &img, spec.alpha(), spec.placement, filter)
}

/// `result = base * (1 - a) + watermark * a` per channel, where `a` is `alpha` times the
/// watermark pixel's own alpha.
pub fn blend_watermark(
    canvas: &mut Canvas,
    img: &DynamicImage,
    alpha: f32,
    placement: WatermarkPlacement,
    filter: ResampleFilter,
) -> BannerResult<()> {
    if alpha <= 0.0 {
        tracing::debug!("watermark fully transparent, skipped");
        return Ok(());
    }

    match placement {
        WatermarkPlacement::Stretch => {
            let overlay = stretch_to(img, canvas.width(), canvas.height(), filter);
            canvas.blend(&overlay, 0, 0, alpha)
        }
        WatermarkPlacement::Center => {
            let overlay = premul_image(img);
            let (x, src_x) = center_offset(canvas.width(), overlay.width);
            let (y, src_y) = center_offset(canvas.height(), overlay.height);
            let visible = overlay.crop(src_x, src_y, canvas.width(), canvas.height());
            canvas.blend(&visible, x, y, alpha)
        }
    }
}

/// `(canvas offset, source offset)` that centers `len` inside `container`.
fn center_offset(container: u32, len: u32) -> (u32, u32) {
    if len <= container {
        ((container - len) / 2, 0)
    } else {
        (0, (len - container) / 2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;
