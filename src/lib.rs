//! bannergrid composes a folder of images into one square banner.
//!
//! A run goes through four stages:
//!
//! 1. **Discover**: list supported images from the input folders, in a stable order
//! 2. **Layout**: `N` images -> a `ceil(sqrt N)`-column grid over the canvas, minus the info band
//! 3. **Compose**: background, cover-fitted cells, info band, watermark
//! 4. **Write**: `<root>/<Name>_<timestamp>/final_output.png`
//!
//! Pixels are **premultiplied RGBA8** from decode until the PNG is written. Nothing is written
//! unless every earlier stage succeeded.
#![forbid(unsafe_code)]

pub mod assets;
pub mod color;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod preflight;
pub mod render;
pub mod session;

pub use assets::decode::{ResampleFilter, cover_fit, load_image, load_scaled, scale_to_cell};
pub use assets::discover::{SUPPORTED_EXTENSIONS, discover_images};
pub use assets::font::{
    FileFontProvider, FontProvider, FontRequest, FontResource, SystemFontProvider,
};
pub use color::parse::{Color, ColorNotation, cmyk_to_rgb, parse_notation};
pub use config::{BannerConfig, FolderList, InfoBandConfig, WatermarkConfig};
pub use encode::writer::{
    OUTPUT_FILE_NAME, banner_folder_name, format_timestamp, sanitize_name, write_output,
};
pub use foundation::core::{Canvas, CellRect, DEFAULT_CANVAS_SIZE, PremulImage};
pub use foundation::error::{BannerError, BannerResult};
pub use layout::grid::{BandArea, BandPlacement, GridSpec, compute_grid, grid_dimensions};
pub use preflight::{PreflightError, PreflightReport};
pub use render::band::{BandLabel, InfoBandSpec, apply_info_band};
pub use render::composite::{over, over_in_place};
pub use render::pipeline::{BannerJob, compose};
pub use render::watermark::{WatermarkPlacement, WatermarkSpec, apply_watermark};
pub use session::{font_provider_for, run};
