use std::sync::Arc;

use super::*;
use crate::{foundation::core::CellRect, layout::grid::BandPlacement};

struct NoFonts;

impl FontProvider for NoFonts {
    fn resolve(&self, _request: &FontRequest) -> BannerResult<FontResource> {
        Err(BannerError::font("no fonts in this test"))
    }
}

struct EmptyDb;

impl FontProvider for EmptyDb {
    fn resolve(&self, _request: &FontRequest) -> BannerResult<FontResource> {
        Ok(FontResource {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
            family: "Missing".to_string(),
        })
    }
}

fn band(label: Option<BandLabel>) -> InfoBandSpec {
    InfoBandSpec {
        color: Color::rgb(10, 20, 30),
        area: BandArea {
            placement: BandPlacement::Bottom,
            height_ratio: 0.25,
        },
        label,
        font_family: None,
    }
}

#[test]
fn file_summary_counts_three_files_per_png() {
    let label = BandLabel::file_summary(7);
    assert_eq!(label.left, vec!["PNG", "SVG", "PDF"]);
    assert_eq!(label.right[0], "21+ FILES");
    assert_eq!(label.right[1..], ["INSTANT", "DOWNLOAD"]);
}

#[test]
fn row_positions_match_the_classic_layout() {
    assert_eq!(row_positions(0, LEFT_ROW_SPAN), Vec::<f64>::new());
    assert_eq!(row_positions(1, LEFT_ROW_SPAN), vec![0.5]);
    let left = row_positions(3, LEFT_ROW_SPAN);
    let right = row_positions(3, RIGHT_ROW_SPAN);
    for (got, want) in left.iter().zip([0.2, 0.5, 0.8]) {
        assert!((got - want).abs() < 1e-9);
    }
    for (got, want) in right.iter().zip([0.25, 0.5, 0.75]) {
        assert!((got - want).abs() < 1e-9);
    }
}

#[test]
fn label_svg_escapes_text_and_family() {
    let label = BandLabel {
        left: vec!["A&B".to_string()],
        right: vec!["<x>".to_string()],
    };
    let svg = label_svg(&label, 200, 100, "Fancy \"Font\"", 0.0);
    assert!(svg.contains("A&amp;B"));
    assert!(svg.contains("&lt;x&gt;"));
    assert!(svg.contains("Fancy &quot;Font&quot;"));
    assert!(svg.contains(r#"font-size="17.00""#));
    assert!(!svg.contains(r#"text-anchor="end""#));
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn right_lines_share_one_center_inside_a_right_aligned_block() {
    let label = BandLabel::file_summary(4);
    let svg = label_svg(&label, 1000, 200, "Any", 120.0);
    // Block spans 850..970, so every line is centered on 910.
    let right: Vec<&str> = svg
        .split("<text ")
        .filter(|t| t.contains("band-right-"))
        .collect();
    assert_eq!(right.len(), 3);
    for line in &right {
        assert!(line.contains(r#"x="910.00""#), "{line}");
        assert!(line.contains(r#"text-anchor="middle""#), "{line}");
    }
    assert!(right[0].contains(r#"y="50.00""#));
    assert!(right[2].contains(r#"y="150.00""#));

    let left = svg
        .split("<text ")
        .filter(|t| t.contains(">PNG<"))
        .count();
    assert_eq!(left, 1);
    assert!(svg.contains(r#"x="40.00""#));
}

#[test]
fn block_width_without_glyphs_is_zero() {
    let font = EmptyDb.resolve(&FontRequest::default()).unwrap();
    let svg = label_svg(&BandLabel::file_summary(2), 40, 10, font.family(), 0.0);
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    assert_eq!(right_block_width(&tree, 3), 0.0);
}

#[test]
fn band_fills_its_rect_and_leaves_the_rest() {
    let mut canvas = Canvas::filled(8, [1, 1, 1, 255]);
    apply_info_band(&mut canvas, &band(None), &NoFonts).unwrap();
    let rect = CellRect::new(0, 6, 8, 2);
    for y in 0..8 {
        for x in 0..8 {
            let expected = if rect.contains(x, y) {
                [10, 20, 30, 255]
            } else {
                [1, 1, 1, 255]
            };
            assert_eq!(canvas.pixel(x, y), expected, "({x},{y})");
        }
    }
}

#[test]
fn missing_font_skips_label_but_keeps_band() {
    let mut canvas = Canvas::new(8);
    apply_info_band(&mut canvas, &band(Some(BandLabel::file_summary(1))), &NoFonts).unwrap();
    assert_eq!(canvas.pixel(0, 7), [10, 20, 30, 255]);
    assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn label_without_faces_rasterizes_transparent() {
    let font = EmptyDb.resolve(&FontRequest::default()).unwrap();
    let img = rasterize_label(&BandLabel::file_summary(2), 40, 10, &font).unwrap();
    assert_eq!((img.width, img.height), (40, 10));
    assert!(img.data.iter().all(|&b| b == 0));

    let mut canvas = Canvas::new(40);
    apply_info_band(&mut canvas, &band(Some(BandLabel::file_summary(2))), &EmptyDb).unwrap();
    assert_eq!(canvas.pixel(20, 35), [10, 20, 30, 255]);
}
