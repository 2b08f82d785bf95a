//! Assembling drawn modules into one vector image.
//!
//! There are two ways to put the pieces on the canvas:
//!
//! - **Clipped** (no logo): the dark-module shapes form a clip region and the
//!   foreground paint (flat color or gradient) is only visible inside it.
//!   Light modules are drawn as well and kept alongside, so hosts that want
//!   the negative space have it.
//! - **Direct** (logo): the dark-module shapes are painted as they are, and an
//!   opaque background square is punched out of the center for the caller to
//!   put the logo on.
//!
//! The reserved square is always `logo_size` wide and centered on the canvas,
//! whatever the module grid looks like underneath; modules it half covers are
//! simply cut.

use log::{debug, trace};

use crate::classify::classify;
use crate::color::Color;
use crate::config::{Gradient, RenderConfig};
use crate::error::Result;
use crate::matrix::{MatrixProvider, ModuleMatrix, QrCodeProvider};
use crate::shape::{CellGeometry, Primitive, Shape, ShapeRenderer};

/// Paint used inside the clip region.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Paint {
    Solid(Color),
    /// Horizontal gradient from the left to the right edge of the canvas.
    LinearGradient(Gradient),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Composition {
    Clipped {
        /// Dark-module shapes, in row-major order.
        clip: Vec<Primitive>,
        /// Light-module shapes, in row-major order.
        light: Vec<Primitive>,
        paint: Paint,
    },
    Direct {
        /// Dark-module shapes, in row-major order.
        pieces: Vec<Primitive>,
        /// Background-filled square covering the logo area.
        cutout: Primitive,
    },
}

/// A finished drawing of `size × size` pixels.
#[derive(Clone, PartialEq, Debug)]
pub struct VectorImage {
    pub size: f64,
    pub background: Color,
    pub composition: Composition,
}

impl VectorImage {
    /// The dark-module shapes, whichever strategy was used.
    pub fn pieces(&self) -> &[Primitive] {
        match &self.composition {
            Composition::Clipped { clip, .. } => clip,
            Composition::Direct { pieces, .. } => pieces,
        }
    }
}

/// Where the caller should draw the logo.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LogoPlacement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl LogoPlacement {
    /// A `size × size` square centered on a `canvas × canvas` image.
    pub fn centered(canvas: f64, size: f64) -> Self {
        let offset = canvas / 2.0 - size / 2.0;
        LogoPlacement { x: offset, y: offset, size }
    }
}

/// Result of a render: the vector image and, when a logo was requested, its slot.
#[derive(Clone, PartialEq, Debug)]
pub struct Rendered {
    pub image: VectorImage,
    pub logo: Option<LogoPlacement>,
}

/// Renders `config` using the `qrcode` crate as matrix provider.
///
/// # Example
///
/// ```rust
/// use qirust_pieces::compose::render;
/// use qirust_pieces::config::RenderConfig;
///
/// let rendered = render(&RenderConfig::new("Hello, World!")).unwrap();
/// assert_eq!(rendered.image.size, 250.0);
/// assert!(rendered.logo.is_none());
/// ```
pub fn render(config: &RenderConfig) -> Result<Rendered> {
    render_with(&QrCodeProvider, config)
}

/// Renders `config`, asking `provider` for the module matrix.
pub fn render_with(provider: &dyn MatrixProvider, config: &RenderConfig) -> Result<Rendered> {
    let modules = provider.generate(&config.content, config.ecl)?;
    compose(&modules, config)
}

/// Classifies and draws every module of `modules`, then composes the canvas.
pub fn compose(modules: &ModuleMatrix, config: &RenderConfig) -> Result<Rendered> {
    config.validate(modules.len())?;
    let cell = CellGeometry::new(config.size, config.padding, modules.len())?;
    debug!(
        "composing {0}x{0} modules at {1:.3}px per module in {2} style",
        modules.len(),
        cell.cell_size,
        config.code_style
    );

    let renderer = ShapeRenderer::new(config.code_style, cell, config.color);
    let with_logo = config.has_logo();
    let mut pieces = Vec::with_capacity(modules.dark_count());
    let mut light = Vec::new();
    for y in 0..modules.len() {
        for x in 0..modules.len() {
            let dark = modules.get(x, y);
            if !dark && with_logo {
                continue;
            }
            let primitive = renderer.draw(x, y, &classify(x, y, modules));
            if dark {
                pieces.push(primitive);
            } else {
                light.push(primitive);
            }
        }
    }
    trace!("{} dark pieces, {} light pieces", pieces.len(), light.len());

    let (composition, logo) = if with_logo {
        let slot = LogoPlacement::centered(config.size, config.logo_size);
        (direct(pieces, slot, config.background_color), Some(slot))
    } else {
        (clipped(pieces, light, config), None)
    };

    Ok(Rendered {
        image: VectorImage {
            size: config.size,
            background: config.background_color,
            composition,
        },
        logo,
    })
}

fn clipped(clip: Vec<Primitive>, light: Vec<Primitive>, config: &RenderConfig) -> Composition {
    let paint = match config.gradient {
        Some(gradient) => Paint::LinearGradient(gradient),
        None => Paint::Solid(config.color),
    };
    Composition::Clipped { clip, light, paint }
}

fn direct(pieces: Vec<Primitive>, slot: LogoPlacement, background: Color) -> Composition {
    let cutout = Primitive {
        shape: Shape::Rect {
            x: slot.x,
            y: slot.y,
            width: slot.size,
            height: slot.size,
            rotation: None,
        },
        fill: background,
    };
    Composition::Direct { pieces, cutout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::matrix::ErrorCorrection;
    use crate::shape::Style;
    use image::RgbaImage;

    struct Fixed(ModuleMatrix);

    impl MatrixProvider for Fixed {
        fn generate(&self, _content: &str, _ecl: ErrorCorrection) -> Result<ModuleMatrix> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl MatrixProvider for Failing {
        fn generate(&self, content: &str, _ecl: ErrorCorrection) -> Result<ModuleMatrix> {
            Err(Error::MatrixProvider(format!("{} does not fit", content)))
        }
    }

    fn checkerboard(len: usize) -> ModuleMatrix {
        ModuleMatrix::from_fn(len, |x, y| (x + y) % 2 == 0)
    }

    #[test]
    fn test_one_primitive_per_dark_module() {
        let m = checkerboard(5);
        let rendered = compose(&m, &RenderConfig::default()).unwrap();
        match &rendered.image.composition {
            Composition::Clipped { clip, light, paint } => {
                assert_eq!(clip.len(), m.dark_count());
                assert_eq!(light.len(), 25 - m.dark_count());
                assert_eq!(*paint, Paint::Solid(Color::BLACK));
            }
            other => panic!("expected clipped composition, got {:?}", other),
        }
    }

    #[test]
    fn test_pieces_are_row_major() {
        let m = ModuleMatrix::from_fn(3, |x, y| (x, y) == (2, 0) || (x, y) == (0, 1));
        let config = RenderConfig::default().with_style(Style::Square);
        let rendered = compose(&m, &config).unwrap();
        let cell = CellGeometry::new(250.0, 1.0, 3).unwrap();
        let xs: Vec<f64> = rendered
            .image
            .pieces()
            .iter()
            .map(|p| match p.shape {
                Shape::Rect { x, .. } => x,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(xs, vec![cell.origin(2, 0).0, cell.origin(0, 1).0]);
    }

    #[test]
    fn test_logo_uses_direct_strategy() {
        let m = checkerboard(21);
        let config = RenderConfig::default().with_logo(RgbaImage::new(2, 2), 50.0);
        let rendered = compose(&m, &config).unwrap();
        let slot = rendered.logo.unwrap();
        assert_eq!(slot, LogoPlacement { x: 100.0, y: 100.0, size: 50.0 });
        match &rendered.image.composition {
            Composition::Direct { pieces, cutout } => {
                assert_eq!(pieces.len(), m.dark_count());
                assert_eq!(cutout.fill, Color::WHITE);
                assert_eq!(
                    cutout.shape,
                    Shape::Rect { x: 100.0, y: 100.0, width: 50.0, height: 50.0, rotation: None }
                );
            }
            other => panic!("expected direct composition, got {:?}", other),
        }
    }

    #[test]
    fn test_logo_does_not_change_dark_pieces() {
        let m = checkerboard(9);
        for style in Style::ALL {
            let plain = RenderConfig::default().with_style(style);
            let with_logo = plain.clone().with_logo(RgbaImage::new(1, 1), 60.0);
            let a = compose(&m, &plain).unwrap();
            let b = compose(&m, &with_logo).unwrap();
            assert_eq!(a.image.pieces(), b.image.pieces(), "{}", style);
        }
    }

    #[test]
    fn test_gradient_paint() {
        let m = checkerboard(3);
        let config = RenderConfig::default().with_gradient(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));
        let rendered = compose(&m, &config).unwrap();
        match rendered.image.composition {
            Composition::Clipped { paint, .. } => assert_eq!(
                paint,
                Paint::LinearGradient(Gradient { start: Color::rgb(255, 0, 0), end: Color::rgb(0, 0, 255) })
            ),
            other => panic!("expected clipped composition, got {:?}", other),
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = RenderConfig::new("deterministic").with_style(Style::Ninja);
        assert_eq!(render(&config).unwrap(), render(&config).unwrap());
    }

    #[test]
    fn test_render_with_custom_provider() {
        let rendered = render_with(&Fixed(checkerboard(4)), &RenderConfig::default()).unwrap();
        assert_eq!(rendered.image.pieces().len(), 8);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let err = render_with(&Failing, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MatrixProvider(_)));
    }

    #[test]
    fn test_degenerate_geometry_fails_whole_render() {
        let config = RenderConfig::default().with_size(0.0);
        let err = compose(&checkerboard(3), &config).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry { .. }));
    }
}
