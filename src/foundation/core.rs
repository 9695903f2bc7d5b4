use crate::foundation::{
    error::{BannerError, BannerResult},
    math::unpremultiply_rgba8_in_place,
};

/// Edge length of the square banner, in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 2000;

/// Axis-aligned integer pixel rectangle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn intersects(self, other: CellRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Premultiplied RGBA8 pixel buffer (sources, label rasters, watermarks).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, tightly packed premultiplied RGBA8.
    pub data: Vec<u8>,
}

impl PremulImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> BannerResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(BannerError::validation(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Sub-image starting at `(x, y)`, at most `max_w x max_h`, clipped to this image.
    pub fn crop(&self, x: u32, y: u32, max_w: u32, max_h: u32) -> PremulImage {
        let x = x.min(self.width);
        let y = y.min(self.height);
        let w = (self.width - x).min(max_w);
        let h = (self.height - y).min(max_h);
        let mut data = Vec::with_capacity((w as usize) * (h as usize) * 4);
        for row in y..y + h {
            let start = ((row as usize) * (self.width as usize) + x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + (w as usize) * 4]);
        }
        PremulImage {
            width: w,
            height: h,
            data,
        }
    }
}

/// The banner raster. Premultiplied RGBA8, owned by a single pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a fully transparent square canvas.
    pub fn new(size: u32) -> Self {
        Self::filled(size, [0, 0, 0, 0])
    }

    /// Allocate a square canvas cleared to one premultiplied pixel value.
    pub fn filled(size: u32, premul: [u8; 4]) -> Self {
        Self {
            width: size,
            height: size,
            data: premul.repeat((size as usize) * (size as usize)),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Copy out the pixels of `rect` (clipped to the canvas).
    pub fn region(&self, rect: CellRect) -> PremulImage {
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        let x0 = rect.x.min(x1);
        let y0 = rect.y.min(y1);
        let mut data = Vec::with_capacity(((x1 - x0) as usize) * ((y1 - y0) as usize) * 4);
        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = start + ((x1 - x0) as usize) * 4;
            data.extend_from_slice(&self.data[start..end]);
        }
        PremulImage {
            width: x1 - x0,
            height: y1 - y0,
            data,
        }
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> BannerResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| BannerError::validation("canvas buffer does not match its dimensions"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
