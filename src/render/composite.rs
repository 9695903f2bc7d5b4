use crate::foundation::{
    core::{Canvas, CellRect, PremulImage},
    error::{BannerError, BannerResult},
};

pub type PremulRgba8 = [u8; 4];

/// Opacity is carried with 16 bits so the mix rounds once, not per term.
const OPACITY_ONE: u64 = 65_535;
const DENOM: u64 = 255 * OPACITY_ONE;

/// Premultiplied source-over with an extra opacity factor in `[0, 1]`.
///
/// Per channel this is `src * opacity + dst * (1 - src_alpha * opacity)`, rounded to nearest.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * OPACITY_ONE as f32).round() as u64).min(OPACITY_ONE);
    let sa = u64::from(src[3]) * op;
    if sa == 0 {
        return dst;
    }
    let inv = DENOM - sa;

    let mut out = [0u8; 4];
    for (o, (&s, &d)) in out.iter_mut().zip(src.iter().zip(dst.iter())) {
        let num = u64::from(s) * op * 255 + u64::from(d) * inv;
        *o = ((num + DENOM / 2) / DENOM).min(255) as u8;
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BannerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BannerError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

impl Canvas {
    /// Overwrite every pixel of `rect` (clipped to the canvas) with `px`.
    pub fn fill_rect(&mut self, rect: CellRect, px: PremulRgba8) {
        let x1 = rect.right().min(self.width());
        let y1 = rect.bottom().min(self.height());
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }
        let row = px.repeat((x1 - rect.x) as usize);
        for y in rect.y..y1 {
            let start = self.index(rect.x, y);
            self.data_mut()[start..start + row.len()].copy_from_slice(&row);
        }
    }

    /// Draw `img` with its top-left corner at `(x, y)` using source-over.
    ///
    /// Opaque source pixels replace the canvas exactly.
    pub fn paste(&mut self, img: &PremulImage, x: u32, y: u32) -> BannerResult<()> {
        self.blend(img, x, y, 1.0)
    }

    /// Like [`Canvas::paste`], scaled by `opacity` in `[0, 1]`.
    pub fn blend(&mut self, img: &PremulImage, x: u32, y: u32, opacity: f32) -> BannerResult<()> {
        if x >= self.width() || y >= self.height() {
            return Ok(());
        }
        let w = img.width.min(self.width() - x) as usize;
        let h = img.height.min(self.height() - y);
        let src_stride = (img.width as usize) * 4;

        for row in 0..h {
            let start = self.index(x, y + row);
            let src_start = (row as usize) * src_stride;
            over_in_place(
                &mut self.data_mut()[start..start + w * 4],
                &img.data[src_start..src_start + w * 4],
                opacity,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
