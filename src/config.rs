//! Render configuration.

use image::RgbaImage;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::matrix::ErrorCorrection;
use crate::shape::Style;

/// Largest logo (as a share of the canvas side) that level H is expected to absorb.
pub const MAX_LOGO_RATIO: f64 = 0.3;

/// Two-stop horizontal gradient spanning the canvas, used in place of the
/// flat foreground when no logo is drawn.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
}

/// Everything needed to render one QR code.
///
/// All fields have defaults, so a JSON document only needs to name what it
/// changes:
///
/// ```rust
/// use qirust_pieces::config::RenderConfig;
/// use qirust_pieces::shape::Style;
///
/// let config = RenderConfig::from_json(r#"{ "content": "hi", "codeStyle": "dot" }"#).unwrap();
/// assert_eq!(config.code_style, Style::Dot);
/// assert_eq!(config.size, 250.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Text to encode.
    pub content: String,
    /// Canvas side length in pixels.
    pub size: f64,
    /// Blank border around the modules, in modules.
    pub padding: f64,
    /// Foreground (module) color.
    pub color: Color,
    pub background_color: Color,
    pub code_style: Style,
    /// Logo drawn over the center of the code. Loading it is up to the caller.
    #[serde(skip)]
    pub logo: Option<RgbaImage>,
    /// Side length of the reserved logo square, in pixels.
    pub logo_size: f64,
    pub ecl: ErrorCorrection,
    pub gradient: Option<Gradient>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            content: "https://i-love-qr-codes.com".to_string(),
            size: 250.0,
            padding: 1.0,
            color: Color::BLACK,
            background_color: Color::WHITE,
            code_style: Style::Sharp,
            logo: None,
            logo_size: 100.0,
            ecl: ErrorCorrection::H,
            gradient: None,
        }
    }
}

impl RenderConfig {
    pub fn new(content: impl Into<String>) -> Self {
        RenderConfig {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Parses a JSON configuration; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.code_style = style;
        self
    }

    pub fn with_logo(mut self, logo: RgbaImage, logo_size: f64) -> Self {
        self.logo = Some(logo);
        self.logo_size = logo_size;
        self
    }

    pub fn with_ecl(mut self, ecl: ErrorCorrection) -> Self {
        self.ecl = ecl;
        self
    }

    pub fn with_gradient(mut self, start: Color, end: Color) -> Self {
        self.gradient = Some(Gradient { start, end });
        self
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Checks the numeric fields before any module is drawn.
    ///
    /// `modules` is the side length of the matrix the configuration will be
    /// applied to.
    pub fn validate(&self, modules: usize) -> Result<()> {
        let degenerate = || Error::DegenerateGeometry {
            size: self.size,
            padding: self.padding,
            modules,
        };
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(degenerate());
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(degenerate());
        }
        let span = modules as f64 + 2.0 * self.padding;
        if span <= 0.0 || !(self.size / span).is_finite() {
            return Err(degenerate());
        }
        if self.has_logo() {
            if !self.logo_size.is_finite() || self.logo_size <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "logo size must be positive, got {}",
                    self.logo_size
                )));
            }
            if self.logo_size > MAX_LOGO_RATIO * self.size {
                warn!(
                    "logo of {}px covers more than {}% of a {}px code and may not scan",
                    self.logo_size,
                    MAX_LOGO_RATIO * 100.0,
                    self.size
                );
            }
        }
        Ok(())
    }
}
