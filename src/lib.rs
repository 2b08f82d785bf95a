//! # qirust-pieces
//!
//! A Rust library for drawing QR codes as styled vector images.
//!
//! `qirust-pieces` takes the module matrix of a QR code and, instead of
//! painting uniform squares, looks at each dark module's neighbours to decide
//! what kind of piece it is (isolated dot, edge, straight run, corner, ...)
//! and draws a shape for it in the chosen style. A logo can be placed in the
//! center; the error correction of the code absorbs the modules it hides.
//!
//! ## Features
//!
//! - Classify every module into one of seven piece types with an orientation.
//! - Six styles: square, circle, dot, diamond, sharp and ninja.
//! - Output as an SVG document or an in-memory RGBA image buffer.
//! - Flat or gradient foreground, custom background, centered logo slot.
//! - Bring your own matrix through the [`matrix::MatrixProvider`] trait, or
//!   use the built-in provider backed by the `qrcode` crate.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirust-pieces = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a dotted QR code to SVG:
//!
//! ```rust
//! use qirust_pieces::{render, RenderConfig, Style};
//!
//! let config = RenderConfig::new("https://example.com").with_style(Style::Dot);
//! let rendered = render(&config).unwrap();
//! let svg = rendered.image.to_svg_string();
//! assert!(svg.contains("<circle"));
//! ```
//!
//! Generate an in-memory image buffer with a logo slot:
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use qirust_pieces::{helper::generate_image_buffer, RenderConfig};
//!
//! let logo = RgbaImage::from_pixel(32, 32, Rgba([255, 165, 0, 255]));
//! let config = RenderConfig::new("Hello, World!").with_logo(logo, 60.0);
//! let img = generate_image_buffer(&config).unwrap();
//! assert_eq!(img.dimensions(), (250, 250));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: The module matrix and matrix providers.
//! - [`classify`]: Neighbour classification of modules.
//! - [`shape`]: Styles and the primitives drawn per module.
//! - [`compose`]: Putting all pieces on one canvas.
//! - [`svg`] and [`raster`]: Output formats.
//! - [`config`] and [`color`]: Render configuration.
//! - [`helper`]: One-call utilities.

#![forbid(unsafe_code)]

pub mod classify;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod helper;
pub mod matrix;
pub mod raster;
pub mod shape;
pub mod svg;

pub use crate::color::Color;
pub use crate::compose::{render, render_with, Rendered, VectorImage};
pub use crate::config::RenderConfig;
pub use crate::error::{Error, Result};
pub use crate::matrix::{ErrorCorrection, MatrixProvider, ModuleMatrix};
pub use crate::shape::Style;
