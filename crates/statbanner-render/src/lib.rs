//! Render collaborator: lays the banner out as SVG and rasterizes it to PNG.

pub mod raster;
pub mod svg;

pub use raster::rasterize_png;
pub use svg::build_svg;

use statbanner_core::{CombinedStats, Result};
use statbanner_delta::BannerDeltas;
use tracing::debug;

/// Banner canvas width in pixels.
pub const BANNER_WIDTH: u32 = 1500;
/// Banner canvas height in pixels.
pub const BANNER_HEIGHT: u32 = 500;

/// Turns current numbers and their deltas into an encoded image.
pub trait BannerRenderer: Send + Sync {
    fn render(&self, stats: &CombinedStats, deltas: &BannerDeltas) -> Result<Vec<u8>>;
}

/// SVG template rasterized with resvg.
#[derive(Debug, Clone, Default)]
pub struct SvgBannerRenderer;

impl SvgBannerRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl BannerRenderer for SvgBannerRenderer {
    fn render(&self, stats: &CombinedStats, deltas: &BannerDeltas) -> Result<Vec<u8>> {
        let svg = build_svg(stats, deltas);
        let png = rasterize_png(&svg, BANNER_WIDTH, BANNER_HEIGHT)?;
        debug!("Rendered banner: {} bytes of SVG, {} bytes of PNG", svg.len(), png.len());
        Ok(png)
    }
}
