//! SVG → PNG via resvg.

use resvg::{tiny_skia, usvg};
use statbanner_core::{Error, Result};

/// Rasterize `svg` onto a `width`×`height` canvas and encode it as PNG.
///
/// System fonts are loaded so the banner text renders with whatever
/// `Inter`/sans-serif face the host provides.
pub fn rasterize_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| Error::Render(format!("Invalid SVG: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("Cannot allocate {}x{} canvas", width, height)))?;

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    /// Width and height from the IHDR chunk.
    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (w, h)
    }

    #[test]
    fn test_rasterize_fixed_size() {
        let svg = r##"<svg width="1500" height="500" xmlns="http://www.w3.org/2000/svg">
            <rect width="1500" height="500" fill="#0d1117"/>
        </svg>"##;
        let png = rasterize_png(svg, 1500, 500).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        assert_eq!(png_dimensions(&png), (1500, 500));
    }

    #[test]
    fn test_rasterize_scales_to_canvas() {
        let svg = r##"<svg width="300" height="100" xmlns="http://www.w3.org/2000/svg">
            <rect width="300" height="100" fill="#fff"/>
        </svg>"##;
        let png = rasterize_png(svg, 1500, 500).unwrap();
        assert_eq!(png_dimensions(&png), (1500, 500));
    }

    #[test]
    fn test_invalid_svg_is_render_error() {
        let err = rasterize_png("<svg", 1500, 500).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_zero_canvas_is_render_error() {
        let svg = r#"<svg width="10" height="10" xmlns="http://www.w3.org/2000/svg"/>"#;
        assert!(matches!(rasterize_png(svg, 0, 500), Err(Error::Render(_))));
    }
}
