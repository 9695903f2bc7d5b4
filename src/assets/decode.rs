use std::path::Path;

use image::{DynamicImage, imageops};

use crate::foundation::{
    core::{CellRect, PremulImage},
    error::{BannerError, BannerResult},
    math::premultiply_rgba8_in_place,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Resampling filter used when scaling sources into cells.
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for imageops::FilterType {
    fn from(value: ResampleFilter) -> Self {
        match value {
            ResampleFilter::Nearest => imageops::FilterType::Nearest,
            ResampleFilter::Triangle => imageops::FilterType::Triangle,
            ResampleFilter::CatmullRom => imageops::FilterType::CatmullRom,
            ResampleFilter::Gaussian => imageops::FilterType::Gaussian,
            ResampleFilter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Source window that, scaled to the cell, covers it exactly.
///
/// The window has the cell's aspect ratio (up to rounding), spans the full source along the
/// limiting axis and is centered along the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverFit {
    pub crop_x: u32,
    pub crop_y: u32,
    pub crop_width: u32,
    pub crop_height: u32,
}

/// "Cover" policy: uniform scale until both cell edges are reached, overflow center-cropped.
///
/// Computed in source pixels so callers crop first and resize straight to the cell.
pub fn cover_fit(src_width: u32, src_height: u32, cell_width: u32, cell_height: u32) -> CoverFit {
    let (sw, sh) = (u64::from(src_width.max(1)), u64::from(src_height.max(1)));
    let (cw, ch) = (u64::from(cell_width.max(1)), u64::from(cell_height.max(1)));

    let (w, h) = if sw * ch > sh * cw {
        // Wider than the cell: full height, trimmed width.
        (((sh * cw + ch / 2) / ch).clamp(1, sw), sh)
    } else {
        (sw, ((sw * ch + cw / 2) / cw).clamp(1, sh))
    };
    let (w, h) = (w as u32, h as u32);

    CoverFit {
        crop_x: (src_width.max(1) - w) / 2,
        crop_y: (src_height.max(1) - h) / 2,
        crop_width: w,
        crop_height: h,
    }
}

/// Read and decode one image file.
pub fn load_image(path: &Path) -> BannerResult<DynamicImage> {
    let bytes = std::fs::read(path).map_err(|e| BannerError::unreadable(path, e))?;
    image::load_from_memory(&bytes).map_err(|e| BannerError::unreadable(path, e))
}

/// Scale `img` to cover `cell` and return exactly `cell.width x cell.height` premultiplied pixels.
pub fn scale_to_cell(img: &DynamicImage, cell: CellRect, filter: ResampleFilter) -> PremulImage {
    let fit = cover_fit(img.width(), img.height(), cell.width, cell.height);
    let window = img
        .crop_imm(fit.crop_x, fit.crop_y, fit.crop_width, fit.crop_height)
        .to_rgba8();

    let scaled = if window.dimensions() == (cell.width, cell.height) {
        window
    } else {
        imageops::resize(&window, cell.width, cell.height, filter.into())
    };
    into_premul(scaled)
}

/// Stretch `img` to exactly `width x height`, ignoring aspect ratio.
pub fn stretch_to(img: &DynamicImage, width: u32, height: u32, filter: ResampleFilter) -> PremulImage {
    let rgba = img.to_rgba8();
    let resized = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        imageops::resize(&rgba, width, height, filter.into())
    };
    into_premul(resized)
}

/// Premultiplied copy at native size.
pub fn premul_image(img: &DynamicImage) -> PremulImage {
    into_premul(img.to_rgba8())
}

/// Decode without resizing.
pub fn load_premul(path: &Path) -> BannerResult<PremulImage> {
    Ok(premul_image(&load_image(path)?))
}

/// Load `path` and fit it into `cell`.
pub fn load_scaled(path: &Path, cell: CellRect, filter: ResampleFilter) -> BannerResult<PremulImage> {
    let img = load_image(path)?;
    tracing::debug!(
        path = %path.display(),
        src_width = img.width(),
        src_height = img.height(),
        cell_width = cell.width,
        cell_height = cell.height,
        "scaling source image"
    );
    Ok(scale_to_cell(&img, cell, filter))
}

fn into_premul(rgba: image::RgbaImage) -> PremulImage {
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    PremulImage {
        width,
        height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
