//! SVG output.

use crate::compose::{Composition, Paint, VectorImage};
use crate::shape::{Primitive, Shape};

/// Id of the clip path holding the dark modules.
pub const CLIP_ID: &str = "qr-clip";
/// Id of the gradient used as foreground paint.
pub const FILL_ID: &str = "qr-fill";

// Three decimals, trailing zeros dropped.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn shape_element(shape: &Shape, fill: Option<&str>) -> String {
    let fill = fill.map(|f| format!(" fill=\"{}\"", f)).unwrap_or_default();
    match *shape {
        Shape::Rect { x, y, width, height, rotation } => {
            let transform = rotation
                .map(|r| format!(" transform=\"rotate({} {} {})\"", num(r.degrees), num(r.pivot_x), num(r.pivot_y)))
                .unwrap_or_default();
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{}/>",
                num(x),
                num(y),
                num(width),
                num(height),
                transform,
                fill
            )
        }
        Shape::Circle { cx, cy, r } => {
            format!("<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>", num(cx), num(cy), num(r), fill)
        }
    }
}

fn painted(primitive: &Primitive) -> String {
    shape_element(&primitive.shape, Some(&primitive.fill.to_string()))
}

impl VectorImage {
    /// Returns a standalone SVG document for this image.
    ///
    /// The string always uses Unix newlines (\n), regardless of the platform,
    /// and the same image always produces the same bytes.
    pub fn to_svg_string(&self) -> String {
        let size = num(self.size);
        let mut result = String::new();
        result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
        result += &format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
            size
        );
        result += &format!("\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", self.background);

        match &self.composition {
            Composition::Clipped { clip, paint, .. } => {
                result += "\t<defs>\n";
                result += &format!("\t\t<clipPath id=\"{}\">\n", CLIP_ID);
                for primitive in clip {
                    result += &format!("\t\t\t{}\n", shape_element(&primitive.shape, None));
                }
                result += "\t\t</clipPath>\n";
                let fill = match paint {
                    Paint::Solid(color) => color.to_string(),
                    Paint::LinearGradient(g) => {
                        result += &format!(
                            "\t\t<linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"0\">\n",
                            FILL_ID, size
                        );
                        result += &format!("\t\t\t<stop offset=\"0\" stop-color=\"{}\"/>\n", g.start);
                        result += &format!("\t\t\t<stop offset=\"1\" stop-color=\"{}\"/>\n", g.end);
                        result += "\t\t</linearGradient>\n";
                        format!("url(#{})", FILL_ID)
                    }
                };
                result += "\t</defs>\n";
                result += &format!(
                    "\t<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" clip-path=\"url(#{})\" fill=\"{}\"/>\n",
                    CLIP_ID, fill
                );
            }
            Composition::Direct { pieces, cutout } => {
                for primitive in pieces {
                    result += &format!("\t{}\n", painted(primitive));
                }
                result += &format!("\t{}\n", painted(cutout));
            }
        }

        result += "</svg>\n";
        result
    }
}
