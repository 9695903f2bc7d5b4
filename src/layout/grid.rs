use crate::foundation::{
    core::CellRect,
    error::{BannerError, BannerResult},
};

/// Default share of the canvas height reserved for the info band.
pub const DEFAULT_BAND_HEIGHT_RATIO: f64 = 0.20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Edge of the canvas that holds the info band.
pub enum BandPlacement {
    /// Full-width strip along the top edge; images start below it.
    Top,
    /// Full-width strip along the bottom edge; images end above it.
    #[default]
    Bottom,
}

/// Vertical space reserved for the info band, proportional to the canvas height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandArea {
    pub placement: BandPlacement,
    /// Fraction of the canvas height, in `(0, 1)`.
    pub height_ratio: f64,
}

impl Default for BandArea {
    fn default() -> Self {
        Self {
            placement: BandPlacement::default(),
            height_ratio: DEFAULT_BAND_HEIGHT_RATIO,
        }
    }
}

impl BandArea {
    /// Band height in pixels, floored and kept within `1..canvas_size`.
    pub fn height_px(self, canvas_size: u32) -> u32 {
        let h = (f64::from(canvas_size) * self.height_ratio).floor();
        let max = canvas_size.saturating_sub(1).max(1);
        (h.max(1.0) as u32).min(max)
    }

    pub fn rect(self, canvas_size: u32) -> CellRect {
        let h = self.height_px(canvas_size);
        match self.placement {
            BandPlacement::Top => CellRect::new(0, 0, canvas_size, h),
            BandPlacement::Bottom => CellRect::new(0, canvas_size - h, canvas_size, h),
        }
    }

    /// The part of the canvas left for images.
    pub fn remaining(self, canvas_size: u32) -> CellRect {
        let h = self.height_px(canvas_size);
        match self.placement {
            BandPlacement::Top => CellRect::new(0, h, canvas_size, canvas_size - h),
            BandPlacement::Bottom => CellRect::new(0, 0, canvas_size, canvas_size - h),
        }
    }
}

/// Grid derived from the image count: `C = ceil(sqrt(N))`, `R = ceil(N / C)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    /// Number of images the grid was computed for.
    pub image_count: usize,
    /// Usable image area (canvas minus the band).
    pub area: CellRect,
    /// All `C * R` cells, row-major. They tile `area` exactly.
    pub cells: Vec<CellRect>,
}

impl GridSpec {
    /// One cell per image, in discovery order.
    pub fn image_cells(&self) -> &[CellRect] {
        &self.cells[..self.image_count]
    }

    /// Trailing cells with no image assigned.
    pub fn spare_cells(&self) -> &[CellRect] {
        &self.cells[self.image_count..]
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<CellRect> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells
            .get((row as usize) * (self.columns as usize) + col as usize)
            .copied()
    }
}

/// Lay out `image_count` equal cells over the canvas, leaving the band area free.
///
/// Leftover pixels from uneven division go to the last column and the last row.
pub fn compute_grid(
    image_count: usize,
    canvas_size: u32,
    band: Option<BandArea>,
) -> BannerResult<GridSpec> {
    if image_count == 0 {
        return Err(BannerError::EmptyImageSet);
    }

    let (columns, rows) = grid_dimensions(image_count);
    let area = match band {
        Some(b) => b.remaining(canvas_size),
        None => CellRect::new(0, 0, canvas_size, canvas_size),
    };
    if area.width < columns || area.height < rows {
        return Err(BannerError::validation(format!(
            "{}x{} image area cannot hold a {columns}x{rows} grid",
            area.width, area.height
        )));
    }

    let xs = split_span(area.x, area.width, columns);
    let ys = split_span(area.y, area.height, rows);

    let mut cells = Vec::with_capacity((columns as usize) * (rows as usize));
    for &(y, h) in &ys {
        for &(x, w) in &xs {
            cells.push(CellRect::new(x, y, w, h));
        }
    }

    tracing::debug!(image_count, columns, rows, ?area, "grid computed");
    Ok(GridSpec {
        columns,
        rows,
        image_count,
        area,
        cells,
    })
}

/// `(columns, rows)` for `n >= 1` images.
pub fn grid_dimensions(n: usize) -> (u32, u32) {
    let mut columns = (n as f64).sqrt().floor() as usize;
    while columns * columns < n {
        columns += 1;
    }
    let columns = columns.max(1);
    let rows = n.div_ceil(columns);
    (columns as u32, rows as u32)
}

fn split_span(start: u32, len: u32, parts: u32) -> Vec<(u32, u32)> {
    let base = len / parts;
    let extra = len % parts;
    (0..parts)
        .map(|i| {
            let size = if i + 1 == parts { base + extra } else { base };
            (start + i * base, size)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
