//! Image file output.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{bail, Context, Result};
use glint_render::ImageBuffer;

/// Save a rendered image, choosing the format from the file extension.
///
/// `.ppm` writes plain-text P3 and `.png` writes 8-bit RGB; both apply
/// the same gamma-corrected quantization.
pub fn save(image: &ImageBuffer, path: &str) -> Result<()> {
    if path.ends_with(".ppm") {
        let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
        let mut writer = BufWriter::new(file);
        image
            .write_ppm(&mut writer)
            .with_context(|| format!("Failed to write '{path}'"))?;
    } else if path.ends_with(".png") {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .context("Pixel buffer does not match the image dimensions")?;
        rgb.save(path)
            .with_context(|| format!("Failed to write '{path}'"))?;
    } else {
        bail!("Unsupported file extension '{path}'. Only .ppm and .png are supported.");
    }
    Ok(())
}
