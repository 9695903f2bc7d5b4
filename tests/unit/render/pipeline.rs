use std::path::{Path, PathBuf};

use super::*;
use crate::{
    assets::font::{FontRequest, FontResource},
    config::{InfoBandConfig, WatermarkConfig},
    foundation::error::BannerError,
    layout::grid::BandPlacement,
    render::watermark::WatermarkPlacement,
};

struct NoFonts;

impl FontProvider for NoFonts {
    fn resolve(&self, _request: &FontRequest) -> BannerResult<FontResource> {
        Err(BannerError::font("no fonts in this test"))
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bannergrid_pipeline_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_solid(dir: &Path, name: &str, px: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(4, 4, image::Rgba(px))
        .save(&path)
        .unwrap();
    path
}

fn write_gradient(dir: &Path, name: &str, w: u32, h: u32, seed: u8) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([
            (x * 255 / w.max(2)) as u8,
            (y * 255 / h.max(2)) as u8,
            seed.wrapping_mul(41).wrapping_add((x + y) as u8),
            255,
        ])
    })
    .save(&path)
    .unwrap();
    path
}

fn config() -> BannerConfig {
    BannerConfig {
        input_folders: vec![PathBuf::from("unused")],
        output_name: "test".to_string(),
        canvas_size: 20,
        filter: ResampleFilter::Nearest,
        ..BannerConfig::default()
    }
}

#[test]
fn from_config_counts_pngs_for_the_label() {
    let mut cfg = config();
    cfg.info_band = Some(InfoBandConfig::new(Color::BLACK));
    let images = vec![
        PathBuf::from("a.png"),
        PathBuf::from("b.JPG"),
        PathBuf::from("c.PNG"),
    ];
    let job = BannerJob::from_config(&cfg, images).unwrap();
    let band = job.band.unwrap();
    assert_eq!(band.label, Some(BandLabel::file_summary(2)));
    assert_eq!(band.area.placement, BandPlacement::Bottom);

    let mut cfg = config();
    let mut band = InfoBandConfig::new(Color::BLACK);
    band.label = false;
    cfg.info_band = Some(band);
    let job = BannerJob::from_config(&cfg, vec![PathBuf::from("a.png")]).unwrap();
    assert_eq!(job.band.unwrap().label, None);
}

#[test]
fn from_config_rejects_invalid_watermark() {
    let mut cfg = config();
    cfg.watermark = Some(WatermarkConfig {
        image: PathBuf::from("wm.png"),
        transparency: 101,
        placement: WatermarkPlacement::Stretch,
    });
    assert!(matches!(
        BannerJob::from_config(&cfg, vec![PathBuf::from("a.png")]),
        Err(BannerError::Validation(_))
    ));
}

#[test]
fn compose_places_images_in_discovery_order() {
    let dir = temp_dir("order");
    let colors = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
    ];
    let images = colors
        .iter()
        .enumerate()
        .map(|(i, px)| write_solid(&dir, &format!("{i}.png"), *px))
        .collect();
    let job = BannerJob::from_config(&config(), images).unwrap();
    let canvas = compose(&job, &NoFonts).unwrap();

    assert_eq!(canvas.pixel(0, 0), colors[0]);
    assert_eq!(canvas.pixel(19, 0), colors[1]);
    assert_eq!(canvas.pixel(0, 19), colors[2]);
    assert_eq!(canvas.pixel(19, 19), colors[3]);
    assert_eq!(canvas.pixel(9, 9), colors[0]);
    assert_eq!(canvas.pixel(10, 10), colors[3]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn spare_cells_stay_background_unless_filled() {
    let dir = temp_dir("spare");
    let images: Vec<PathBuf> = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]
        .iter()
        .enumerate()
        .map(|(i, px)| write_solid(&dir, &format!("{i}.png"), *px))
        .collect();

    let mut cfg = config();
    cfg.background = Some(Color::WHITE);
    let job = BannerJob::from_config(&cfg, images.clone()).unwrap();
    let canvas = compose(&job, &NoFonts).unwrap();
    assert_eq!(canvas.pixel(15, 15), [255, 255, 255, 255]);

    cfg.fill_empty_cells = true;
    let job = BannerJob::from_config(&cfg, images).unwrap();
    let canvas = compose(&job, &NoFonts).unwrap();
    assert_eq!(canvas.pixel(15, 15), [255, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn band_and_watermark_are_applied_last() {
    let dir = temp_dir("layers");
    let img = write_solid(&dir, "a.png", [255, 0, 0, 255]);
    let wm = write_solid(&dir, "wm.png", [0, 0, 255, 255]);

    let mut cfg = config();
    let mut band = InfoBandConfig::new(Color::rgb(0, 255, 0));
    band.placement = BandPlacement::Top;
    band.height_ratio = 0.25;
    cfg.info_band = Some(band);

    let job = BannerJob::from_config(&cfg, vec![img.clone()]).unwrap();
    let canvas = compose(&job, &NoFonts).unwrap();
    assert_eq!(canvas.pixel(0, 0), [0, 255, 0, 255]);
    assert_eq!(canvas.pixel(0, 4), [0, 255, 0, 255]);
    assert_eq!(canvas.pixel(0, 5), [255, 0, 0, 255]);

    cfg.watermark = Some(WatermarkConfig {
        image: wm,
        transparency: 100,
        placement: WatermarkPlacement::Stretch,
    });
    let job = BannerJob::from_config(&cfg, vec![img]).unwrap();
    let canvas = compose(&job, &NoFonts).unwrap();
    assert!(canvas.data().chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_image_aborts_compose() {
    let dir = temp_dir("broken");
    let good = write_solid(&dir, "a.png", [1, 2, 3, 255]);
    let bad = dir.join("b.png");
    std::fs::write(&bad, b"not a png").unwrap();

    let job = BannerJob::from_config(&config(), vec![good, bad.clone()]).unwrap();
    match compose(&job, &NoFonts) {
        Err(BannerError::UnreadableImage { path, .. }) => assert_eq!(path, bad),
        other => panic!("expected UnreadableImage, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_job_is_an_empty_image_set() {
    let job = BannerJob::from_config(&config(), Vec::new()).unwrap();
    assert!(matches!(
        compose(&job, &NoFonts),
        Err(BannerError::EmptyImageSet)
    ));
}

#[test]
fn compose_reproduces_scaled_sources_cell_for_cell() {
    let dir = temp_dir("round_trip");
    let sizes = [(40, 25), (13, 60), (7, 7), (1, 400), (90, 31)];
    let images: Vec<PathBuf> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| write_gradient(&dir, &format!("{i}.png"), w, h, i as u8))
        .collect();

    let mut cfg = config();
    cfg.canvas_size = 37;
    cfg.filter = ResampleFilter::Triangle;
    let job = BannerJob::from_config(&cfg, images.clone()).unwrap();
    let grid = job.grid().unwrap();
    assert_eq!((grid.columns, grid.rows), (3, 2));

    let canvas = compose(&job, &NoFonts).unwrap();
    for (path, cell) in images.iter().zip(grid.image_cells()) {
        let expected = crate::assets::decode::load_scaled(path, *cell, job.filter).unwrap();
        assert_eq!(canvas.region(*cell), expected, "cell {cell:?} from {path:?}");
    }
    for cell in grid.spare_cells() {
        assert!(
            canvas.region(*cell).data.iter().all(|&b| b == 0),
            "spare cell {cell:?} was drawn on"
        );
    }
    let _ = std::fs::remove_dir_all(&dir);
}
