use crate::compose::render;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::raster::{overlay_logo, rasterize};
use crate::shape::Style;

use image::RgbaImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates a styled QR Code SVG from the provided content, using defaults
/// for everything but the style.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `style` - How each module is drawn.
///
/// # Returns
///
/// A string of SVG code representing the QR Code image.
///
/// # Example
///
/// ```
/// use qirust_pieces::helper::generate_svg_string;
/// use qirust_pieces::shape::Style;
///
/// let svg_string = generate_svg_string("Hello, World!", Style::Circle).unwrap();
/// assert!(svg_string.contains("<circle"));
/// ```
pub fn generate_svg_string(content: &str, style: Style) -> Result<String> {
    let config = RenderConfig::new(content).with_style(style);
    Ok(render(&config)?.image.to_svg_string())
}

/// Generates a QR Code image buffer from the provided configuration.
///
/// When the configuration carries a logo, it is scaled into the reserved
/// center square and drawn on top.
///
/// # Example
///
/// ```
/// use qirust_pieces::config::RenderConfig;
/// use qirust_pieces::helper::generate_image_buffer;
///
/// let img = generate_image_buffer(&RenderConfig::new("Hello, World!")).unwrap();
/// assert_eq!(img.dimensions(), (250, 250));
/// ```
pub fn generate_image_buffer(config: &RenderConfig) -> Result<RgbaImage> {
    let rendered = render(config)?;
    let mut img = rasterize(&rendered.image)?;
    if let (Some(logo), Some(slot)) = (&config.logo, &rendered.logo) {
        overlay_logo(&mut img, logo, slot);
    }
    Ok(img)
}

/// Renders the configuration and saves it as a PNG file.
///
/// # Arguments
///
/// * `config` - What to render.
/// * `directory_path` - Optional. The directory path where the image will be saved. If not provided, the default directory is "generated". It is created when missing.
/// * `filename` - Optional. The name of the image file, without extension. If not provided, a timestamp-based filename will be used.
///
/// # Returns
///
/// The path of the written file.
pub fn render_and_save(config: &RenderConfig, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
    let img = generate_image_buffer(config)?;

    let directory_path = Path::new(directory_path.unwrap_or("generated"));
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_millis().to_string()
        }
    };

    if !directory_path.exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = directory_path.join(format!("{}.png", filename));
    img.save(&file_path)?;
    debug!("saved {}", file_path.display());
    Ok(file_path)
}
