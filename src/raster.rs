//! Raster output.
//!
//! The raster is drawn from the same SVG document that [`VectorImage::to_svg_string`]
//! produces, so clip paths, gradients and rotations mean the same thing in
//! both outputs. Shapes are rendered with crisp edges unless the document says
//! otherwise, which keeps module boundaries hard for scanners.

use image::{imageops, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, ShapeRendering, Tree};

use crate::compose::{LogoPlacement, VectorImage};
use crate::error::{Error, Result};

/// Rasterizes the image onto a `round(size) × round(size)` RGBA buffer.
pub fn rasterize(vector: &VectorImage) -> Result<RgbaImage> {
    let opts = Options {
        shape_rendering: ShapeRendering::CrispEdges,
        ..Default::default()
    };
    let tree = Tree::from_str(&vector.to_svg_string(), &opts)?;

    let side = vector.size.round().max(1.0) as u32;
    let scale = side as f32 / tree.size().width();
    let mut pixmap = Pixmap::new(side, side)
        .ok_or_else(|| Error::Raster(format!("cannot allocate a {0}x{0} pixmap", side)))?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    // The background is painted first, so opaque backgrounds leave nothing premultiplied.
    RgbaImage::from_raw(side, side, pixmap.take())
        .ok_or_else(|| Error::Raster(format!("pixmap does not fill a {0}x{0} image", side)))
}

/// Scales `logo` into the reserved square and draws it over `canvas`.
pub fn overlay_logo(canvas: &mut RgbaImage, logo: &RgbaImage, slot: &LogoPlacement) {
    let side = slot.size.round().max(1.0) as u32;
    let scaled = imageops::resize(logo, side, side, imageops::FilterType::Triangle);
    imageops::overlay(canvas, &scaled, slot.x.round() as i64, slot.y.round() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::compose::compose;
    use crate::config::RenderConfig;
    use crate::matrix::ModuleMatrix;
    use crate::shape::Style;
    use image::{Pixel, Rgba};

    fn single(style: Style) -> RgbaImage {
        // One dark module filling a 10px cell in a 30px canvas.
        let m = ModuleMatrix::from_fn(1, |_, _| true);
        let config = RenderConfig::default().with_size(30.0).with_style(style);
        rasterize(&compose(&m, &config).unwrap().image).unwrap()
    }

    fn is_dark(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y).to_luma().0[0] < 128
    }

    #[test]
    fn test_square_fills_exact_cell() {
        let img = single(Style::Square);
        assert_eq!(img.dimensions(), (30, 30));
        let dark = img.pixels().filter(|p| p.0 == [0, 0, 0, 255]).count();
        assert_eq!(dark, 100);
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(19, 19).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(9, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(20, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_dot_is_smaller_than_circle() {
        let count = |img: &RgbaImage| img.pixels().filter(|p| p.to_luma().0[0] < 128).count();
        let circle = count(&single(Style::Circle));
        let dot = count(&single(Style::Dot));
        assert!(dot > 0 && dot < circle && circle < 100);
        assert!(is_dark(&single(Style::Dot), 15, 15));
    }

    #[test]
    fn test_diamond_leaves_cell_corners() {
        let img = single(Style::Diamond);
        assert!(!is_dark(&img, 10, 10));
        assert!(is_dark(&img, 15, 15));
        // The tips reach past the cell edge.
        assert!(is_dark(&img, 20, 15));
    }

    #[test]
    fn test_gradient_fill_varies_across_canvas() {
        let m = ModuleMatrix::from_fn(3, |_, _| true);
        let config = RenderConfig::default()
            .with_size(50.0)
            .with_padding(0.0)
            .with_gradient(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));
        let img = rasterize(&compose(&m, &config).unwrap().image).unwrap();
        let left = img.get_pixel(0, 25).0;
        let right = img.get_pixel(49, 25).0;
        assert!(left[0] > 230 && left[2] < 25, "{:?}", left);
        assert!(right[2] > 230 && right[0] < 25, "{:?}", right);
    }

    #[test]
    fn test_fractional_size_rounds_canvas() {
        let m = ModuleMatrix::from_fn(2, |_, _| true);
        let config = RenderConfig::default().with_size(40.4);
        let img = rasterize(&compose(&m, &config).unwrap().image).unwrap();
        assert_eq!(img.dimensions(), (40, 40));
    }

    #[test]
    fn test_cutout_covers_modules() {
        let m = ModuleMatrix::from_fn(5, |_, _| true);
        let config = RenderConfig::default()
            .with_size(70.0)
            .with_logo(RgbaImage::new(1, 1), 20.0);
        let img = rasterize(&compose(&m, &config).unwrap().image).unwrap();
        assert_eq!(img.get_pixel(35, 35).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(12, 12).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_overlay_logo_lands_in_slot() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let logo = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let slot = LogoPlacement::centered(100.0, 20.0);
        overlay_logo(&mut canvas, &logo, &slot);
        for (x, y) in [(50, 50), (40, 40), (59, 59)] {
            let [r, g, b, _] = canvas.get_pixel(x, y).0;
            assert!(r > 250 && g < 5 && b < 5, "({}, {})", x, y);
        }
        assert_eq!(canvas.get_pixel(39, 39).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(60, 60).0, [255, 255, 255, 255]);
    }
}
