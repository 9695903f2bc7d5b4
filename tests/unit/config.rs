use super::*;

fn minimal() -> BannerConfig {
    BannerConfig {
        input_folders: vec![PathBuf::from("in")],
        output_name: "summer".to_string(),
        ..BannerConfig::default()
    }
}

#[test]
fn defaults_fill_in_missing_fields() {
    let cfg = BannerConfig::from_reader(
        r#"{
            "input_folders": ["a", "b"],
            "output_name": "set",
            "info_band": { "color": "cmyk(0,0,0,100)" },
            "watermark": { "image": "wm.png", "transparency": 30 }
        }"#
        .as_bytes(),
    )
    .unwrap();

    assert_eq!(cfg.canvas_size, 2000);
    assert_eq!(cfg.output_root, PathBuf::from("."));
    assert_eq!(cfg.filter, ResampleFilter::Lanczos3);
    assert!(!cfg.fill_empty_cells);
    assert!(cfg.background.is_none());

    let band = cfg.info_band.as_ref().unwrap();
    assert_eq!(band.color, Color::BLACK);
    assert_eq!(band.placement, BandPlacement::Bottom);
    assert!((band.height_ratio - 0.20).abs() < 1e-12);
    assert!(band.label);
    assert!(band.font.is_none());

    let wm = cfg.watermark.as_ref().unwrap();
    assert_eq!(wm.transparency, 30);
    assert_eq!(wm.placement, WatermarkPlacement::Stretch);
    cfg.validate().unwrap();
}

#[test]
fn explicit_values_are_kept() {
    let cfg = BannerConfig::from_reader(
        r##"{
            "input_folders": ["a"],
            "output_root": "out",
            "output_name": "x",
            "canvas_size": 600,
            "background": "255,255,255",
            "fill_empty_cells": true,
            "filter": "catmull-rom",
            "info_band": { "color": "#102030", "placement": "top", "height_ratio": 0.1, "label": false },
            "watermark": { "image": "wm.png", "transparency": 100, "placement": "center" }
        }"##
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.canvas_size, 600);
    assert_eq!(cfg.background, Some(Color::WHITE));
    assert!(cfg.fill_empty_cells);
    assert_eq!(cfg.filter, ResampleFilter::CatmullRom);
    let band = cfg.info_band.unwrap();
    assert_eq!(band.color, Color::rgb(0x10, 0x20, 0x30));
    assert_eq!(band.area().placement, BandPlacement::Top);
    assert!(!band.label);
    assert_eq!(cfg.watermark.unwrap().placement, WatermarkPlacement::Center);
}

#[test]
fn malformed_color_is_a_parse_error() {
    let err = BannerConfig::from_reader(
        r#"{ "input_folders": ["a"], "output_name": "x", "info_band": { "color": "rgb(1,2)" } }"#
            .as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
    assert!(err.to_string().contains("invalid color format"));
}

#[test]
fn validate_rejects_out_of_range_values() {
    minimal().validate().unwrap();

    let mut cfg = minimal();
    cfg.input_folders.clear();
    assert!(matches!(cfg.validate(), Err(BannerError::Validation(_))));

    let mut cfg = minimal();
    cfg.output_name = "  ".to_string();
    assert!(matches!(cfg.validate(), Err(BannerError::Validation(_))));

    let mut cfg = minimal();
    let mut band = InfoBandConfig::new(Color::BLACK);
    band.height_ratio = 1.0;
    cfg.info_band = Some(band);
    assert!(matches!(cfg.validate(), Err(BannerError::Validation(_))));

    let mut cfg = minimal();
    cfg.watermark = Some(WatermarkConfig {
        image: PathBuf::from("wm.png"),
        transparency: 150,
        placement: WatermarkPlacement::Stretch,
    });
    assert!(matches!(cfg.validate(), Err(BannerError::Validation(_))));
}

#[test]
fn config_survives_json_round_trip() {
    let mut cfg = minimal();
    cfg.info_band = Some(InfoBandConfig::new(Color::rgb(1, 2, 3)));
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"#010203\""));
    assert_eq!(BannerConfig::from_reader(json.as_bytes()).unwrap(), cfg);
}

#[test]
fn folder_list_skips_comments_and_blanks() {
    let list = FolderList::parse("# header\n\n  /a/b  \n#x\nrel/dir\n");
    assert_eq!(
        list.folders,
        vec![PathBuf::from("/a/b"), PathBuf::from("rel/dir")]
    );
}

#[test]
fn folder_list_save_then_load() {
    let dir = std::env::temp_dir().join(format!(
        "bannergrid_folder_list_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("folders.txt");

    let list = FolderList {
        folders: vec![PathBuf::from("one"), PathBuf::from("two three")],
    };
    list.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with('#'));
    assert_eq!(FolderList::load(&path).unwrap(), list);

    assert!(FolderList::load(dir.join("missing.txt")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
