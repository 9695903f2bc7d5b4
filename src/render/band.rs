use std::fmt::Write as _;

use anyhow::Context as _;

use crate::{
    assets::font::{FontProvider, FontRequest, FontResource, svg_font_resolver},
    color::parse::Color,
    foundation::{
        core::{Canvas, PremulImage},
        error::{BannerError, BannerResult},
    },
    layout::grid::BandArea,
};

const LABEL_FONT_RATIO: f64 = 0.17;
const LEFT_X_RATIO: f64 = 0.04;
const RIGHT_X_RATIO: f64 = 0.97;
const LEFT_ROW_SPAN: (f64, f64) = (0.20, 0.80);
const RIGHT_ROW_SPAN: (f64, f64) = (0.25, 0.75);

/// Two columns of white text drawn on the band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandLabel {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl BandLabel {
    /// Format list on the left, file count and download note on the right.
    ///
    /// Every PNG source ships as PNG, SVG and PDF, hence three files per image.
    pub fn file_summary(png_count: usize) -> Self {
        Self {
            left: ["PNG", "SVG", "PDF"].map(String::from).to_vec(),
            right: vec![
                format!("{}+ FILES", png_count * 3),
                "INSTANT".to_string(),
                "DOWNLOAD".to_string(),
            ],
        }
    }
}

/// Solid strip with an optional label.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoBandSpec {
    pub color: Color,
    pub area: BandArea,
    pub label: Option<BandLabel>,
    pub font_family: Option<String>,
}

/// Fill the band rectangle, then draw the label if a font can be found.
pub fn apply_info_band(
    canvas: &mut Canvas,
    band: &InfoBandSpec,
    fonts: &dyn FontProvider,
) -> BannerResult<()> {
    let rect = band.area.rect(canvas.width());
    canvas.fill_rect(rect, band.color.to_premul());
    tracing::debug!(?rect, color = %band.color, "info band filled");

    let Some(label) = &band.label else {
        return Ok(());
    };
    let request = FontRequest {
        family: band.font_family.clone(),
    };
    match fonts.resolve(&request) {
        Ok(font) => {
            let text = rasterize_label(label, rect.width, rect.height, &font)?;
            canvas.paste(&text, rect.x, rect.y)?;
        }
        Err(err) => {
            tracing::warn!(error = %err, "info band label skipped");
        }
    }
    Ok(())
}

/// Render the label into a transparent `width x height` premultiplied buffer.
///
/// The right column is laid out twice: once to measure its widest line, then with each line
/// centered inside a block whose right edge sits at 97% of the width.
pub fn rasterize_label(
    label: &BandLabel,
    width: u32,
    height: u32,
    font: &FontResource,
) -> BannerResult<PremulImage> {
    let opts = usvg::Options {
        fontdb: font.fontdb.clone(),
        font_resolver: svg_font_resolver(),
        ..Default::default()
    };
    let draft = label_svg(label, width, height, font.family(), 0.0);
    let draft = usvg::Tree::from_data(draft.as_bytes(), &opts).context("parse band label svg")?;
    let block = right_block_width(&draft, label.right.len());

    let svg = label_svg(label, width, height, font.family(), block);
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse band label svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BannerError::validation("failed to allocate band label pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    PremulImage::new(width, height, pixmap.data().to_vec())
}

/// Width of the widest right-column line. Lines with no glyphs count as zero.
fn right_block_width(tree: &usvg::Tree, lines: usize) -> f64 {
    (0..lines)
        .filter_map(|i| tree.node_by_id(&right_line_id(i)))
        .map(|node| f64::from(node.abs_bounding_box().width()))
        .fold(0.0, f64::max)
}

fn right_line_id(i: usize) -> String {
    format!("band-right-{i}")
}

/// SVG document for the label, in band-local pixel coordinates.
///
/// `right_block` is the width of the right column's widest line; every right line is centered
/// on the middle of that block.
pub fn label_svg(
    label: &BandLabel,
    width: u32,
    height: u32,
    family: &str,
    right_block: f64,
) -> String {
    let w = f64::from(width);
    let h = f64::from(height);
    let size = (h * LABEL_FONT_RATIO).max(1.0);
    let right_center = w * RIGHT_X_RATIO - right_block * 0.5;

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><g font-family="'{}'" font-size="{size:.2}" fill="#FFFFFF">"##,
        xml_escape(family)
    );
    for (text, t) in label.left.iter().zip(row_positions(label.left.len(), LEFT_ROW_SPAN)) {
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" dominant-baseline="central">{}</text>"#,
            w * LEFT_X_RATIO,
            h * t,
            xml_escape(text)
        );
    }
    let right_rows = row_positions(label.right.len(), RIGHT_ROW_SPAN);
    for (i, (text, t)) in label.right.iter().zip(right_rows).enumerate() {
        let _ = write!(
            svg,
            r#"<text id="{}" x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            right_line_id(i),
            right_center,
            h * t,
            xml_escape(text)
        );
    }
    svg.push_str("</g></svg>");
    svg
}

/// Evenly spread `n` rows across `span` (fractions of the band height).
fn row_positions(n: usize, span: (f64, f64)) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![(span.0 + span.1) * 0.5],
        _ => {
            let step = (span.1 - span.0) / ((n - 1) as f64);
            (0..n).map(|i| span.0 + step * (i as f64)).collect()
        }
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/band.rs"]
mod tests;
