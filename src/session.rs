use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::{
    assets::{
        discover::discover_images,
        font::{FileFontProvider, FontProvider, SystemFontProvider},
    },
    config::BannerConfig,
    encode::writer::{banner_folder_name, write_output},
    foundation::error::{BannerError, BannerResult},
    render::pipeline::{BannerJob, compose},
};

/// Discover, compose and write one banner.
///
/// Every stage that can fail runs before the output folder is created, so a failed run leaves
/// the output root untouched.
#[tracing::instrument(skip(cfg, fonts), fields(name = %cfg.output_name))]
pub fn run(
    cfg: &BannerConfig,
    at: NaiveDateTime,
    fonts: &dyn FontProvider,
) -> BannerResult<PathBuf> {
    cfg.validate()?;
    banner_folder_name(&cfg.output_name, at)?;

    let images = discover_images(&cfg.input_folders)?;
    if images.is_empty() {
        return Err(BannerError::EmptyImageSet);
    }
    tracing::info!(
        folders = cfg.input_folders.len(),
        images = images.len(),
        "inputs discovered"
    );

    let job = BannerJob::from_config(cfg, images)?;
    let canvas = compose(&job, fonts)?;
    write_output(&canvas, &cfg.output_root, &cfg.output_name, at)
}

/// A font file from the band config wins; otherwise system fonts.
pub fn font_provider_for(cfg: &BannerConfig) -> Box<dyn FontProvider> {
    match cfg.info_band.as_ref().and_then(|band| band.font.as_ref()) {
        Some(path) => Box::new(FileFontProvider::new(path.clone())),
        None => Box::new(SystemFontProvider),
    }
}
