//! Error types for rendering.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a styled QR code.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value could not be understood (e.g. an unknown color).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Size and padding leave no room for a module.
    #[error("Degenerate geometry: size = {size}, padding = {padding}, modules = {modules}")]
    DegenerateGeometry {
        size: f64,
        padding: f64,
        modules: usize,
    },

    /// The matrix provider could not encode the content at the requested level.
    #[error("Matrix provider failed: {0}")]
    MatrixProvider(String),

    /// Encoding or saving a raster image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The SVG document could not be parsed for rasterization.
    #[error("SVG error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Rasterization failed: {0}")]
    Raster(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}
