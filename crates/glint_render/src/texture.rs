//! Procedural and image-backed textures.
//!
//! Textures map a surface point (UV coordinates plus world position) to a
//! color. Materials hold them behind `Arc<dyn Texture>` so solid colors,
//! checkers, noise and images are interchangeable.

use std::path::Path;
use std::sync::Arc;

use image::RgbImage;
use rand::RngCore;
use thiserror::Error;

use crate::material::Color;
use crate::perlin::Perlin;
use glint_math::{Interval, Point3};

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Trait for textures that can be sampled at a surface point.
pub trait Texture: Send + Sync {
    /// Sample the texture color at UV coordinates and world position.
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A texture with a single uniform color.
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            albedo: Color::new(r, g, b),
        }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.albedo
    }
}

/// A 3D checker pattern alternating between two component textures.
///
/// The pattern is solid in space: a point belongs to the even or odd set
/// based on the integer lattice cell containing it, so it does not depend
/// on surface UVs.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// Create a checker from two component textures.
    ///
    /// `scale` is the edge length of one checker cell in world units.
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    /// Create a checker alternating between two solid colors.
    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i64;
        let y = (self.inv_scale * p.y).floor() as i64;
        let z = (self.inv_scale * p.z).floor() as i64;

        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// A marble-like texture built from Perlin turbulence.
///
/// A sine wave along z is phase-shifted by the turbulence, producing the
/// banded veins of polished marble.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
}

impl NoiseTexture {
    /// Create a noise texture.
    ///
    /// `scale` controls the spatial frequency of the bands. The gradient
    /// tables are drawn from `rng`, so the pattern is reproducible for a
    /// seeded generator.
    pub fn new(scale: f64, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        Color::new(0.5, 0.5, 0.5) * (1.0 + (self.scale * p.z + 10.0 * self.noise.turb(p, 7)).sin())
    }
}

/// A texture sampled from an image file.
pub struct ImageTexture {
    image: RgbImage,
}

impl ImageTexture {
    /// Load an image texture from a file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| {
                TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
            })?
            .to_rgb8();

        log::debug!(
            "Loaded texture: {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Self { image })
    }

    /// Load an image texture, falling back to a debug color on failure.
    ///
    /// A missing or unreadable file logs a warning and yields a texture
    /// that samples as solid cyan, so a scene still renders.
    pub fn open(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("{} (using fallback color)", e);
                Self {
                    image: RgbImage::new(0, 0),
                }
            }
        }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        // No image data: return solid cyan as a debugging aid
        if self.image.height() == 0 {
            return Color::new(0.0, 1.0, 1.0);
        }

        let u = Interval::new(0.0, 1.0).clamp(u);
        // Flip V to image coordinates (image rows go top to bottom)
        let v = 1.0 - Interval::new(0.0, 1.0).clamp(v);

        let i = ((u * self.image.width() as f64) as u32).min(self.image.width() - 1);
        let j = ((v * self.image.height() as f64) as u32).min(self.image.height() - 1);

        let pixel = self.image.get_pixel(i, j);
        let color_scale = 1.0 / 255.0;

        Color::new(
            color_scale * pixel[0] as f64,
            color_scale * pixel[1] as f64,
            color_scale * pixel[2] as f64,
        )
    }
}
