use std::path::PathBuf;

use crate::{
    assets::{
        decode::{ResampleFilter, load_image, load_scaled, stretch_to},
        discover::count_png,
        font::FontProvider,
    },
    color::parse::Color,
    config::BannerConfig,
    foundation::{
        core::{Canvas, PremulImage},
        error::BannerResult,
    },
    layout::grid::{GridSpec, compute_grid},
    render::{
        band::{BandLabel, InfoBandSpec, apply_info_band},
        watermark::{WatermarkSpec, apply_watermark},
    },
};

/// A fully resolved banner: inputs discovered, options validated.
#[derive(Clone, Debug, PartialEq)]
pub struct BannerJob {
    pub canvas_size: u32,
    pub images: Vec<PathBuf>,
    pub background: Option<Color>,
    pub background_image: Option<PathBuf>,
    pub band: Option<InfoBandSpec>,
    pub watermark: Option<WatermarkSpec>,
    pub fill_empty_cells: bool,
    pub filter: ResampleFilter,
}

impl BannerJob {
    /// Bind a config to the image list found on disk.
    pub fn from_config(cfg: &BannerConfig, images: Vec<PathBuf>) -> BannerResult<Self> {
        cfg.validate()?;

        let band = cfg.info_band.as_ref().map(|band| InfoBandSpec {
            color: band.color,
            area: band.area(),
            label: band.label.then(|| BandLabel::file_summary(count_png(&images))),
            font_family: band.font_family.clone(),
        });
        let watermark = cfg
            .watermark
            .as_ref()
            .map(|wm| WatermarkSpec::new(wm.image.clone(), wm.transparency, wm.placement))
            .transpose()?;

        Ok(Self {
            canvas_size: cfg.canvas_size,
            images,
            background: cfg.background,
            background_image: cfg.background_image.clone(),
            band,
            watermark,
            fill_empty_cells: cfg.fill_empty_cells,
            filter: cfg.filter,
        })
    }

    pub fn grid(&self) -> BannerResult<GridSpec> {
        compute_grid(
            self.images.len(),
            self.canvas_size,
            self.band.as_ref().map(|band| band.area),
        )
    }
}

/// Compose the banner in memory.
///
/// Order: background color, background image, grid cells, info band, watermark. Any failure
/// aborts the whole banner; nothing partial is returned.
#[tracing::instrument(skip(job, fonts), fields(images = job.images.len(), size = job.canvas_size))]
pub fn compose(job: &BannerJob, fonts: &dyn FontProvider) -> BannerResult<Canvas> {
    let grid = job.grid()?;

    let mut canvas = match job.background {
        Some(color) => Canvas::filled(job.canvas_size, color.to_premul()),
        None => Canvas::new(job.canvas_size),
    };
    if let Some(path) = &job.background_image {
        let img = load_image(path)?;
        let layer = stretch_to(&img, canvas.width(), canvas.height(), job.filter);
        canvas.paste(&layer, 0, 0)?;
    }

    let mut tiles: Vec<PremulImage> = Vec::with_capacity(grid.image_cells().len());
    for (path, cell) in job.images.iter().zip(grid.image_cells()) {
        let tile = load_scaled(path, *cell, job.filter)?;
        canvas.paste(&tile, cell.x, cell.y)?;
        tiles.push(tile);
    }

    if job.fill_empty_cells {
        for (i, cell) in grid.spare_cells().iter().enumerate() {
            let source = i % job.images.len();
            // Spare cells can be larger than the cell their source was scaled for.
            let tile = if (tiles[source].width, tiles[source].height) == (cell.width, cell.height) {
                tiles[source].clone()
            } else {
                load_scaled(&job.images[source], *cell, job.filter)?
            };
            canvas.paste(&tile, cell.x, cell.y)?;
        }
    }

    if let Some(band) = &job.band {
        apply_info_band(&mut canvas, band, fonts)?;
    }
    if let Some(watermark) = &job.watermark {
        apply_watermark(&mut canvas, watermark, job.filter)?;
    }

    tracing::info!(
        columns = grid.columns,
        rows = grid.rows,
        spare = grid.spare_cells().len(),
        "banner composed"
    );
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
