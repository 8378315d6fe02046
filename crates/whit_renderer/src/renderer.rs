//! Core ray tracing renderer.
//!
//! Implements recursive Whitted-style tracing with:
//! - Multiplicative color accumulation over a bounded number of bounces
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction at output time
//! - Row-parallel rendering with one seeded generator per row

use std::path::Path;
use std::time::Instant;

use crate::sampling::gen_f32;
use crate::{Camera, Hittable, Ray, Scene};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use whit_math::{Color, Interval};

/// Hit queries start this far along the ray to avoid self-intersection.
pub const T_MIN: f32 = 0.001;

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; each row derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 270,
            samples_per_pixel: 10,
            max_depth: 10,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Image width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Compute the color seen by a ray.
///
/// Follows the path for at most `depth` surface interactions, multiplying
/// the attenuation of every bounce into a running throughput. A material
/// that stops the path contributes its attenuation directly; a path that
/// runs out of bounces contributes black.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = scene.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        let result = scene.material(rec.material).scatter(&ray, &rec, rng);
        throughput *= result.attenuation;
        match result.scattered {
            Some(scattered) => ray = scattered,
            None => return throughput,
        }

        // Fully absorbed; later bounces cannot add anything
        if throughput == Color::ZERO {
            return Color::ZERO;
        }
    }

    Color::ZERO
}

/// Background seen by rays that escape the scene: white at the bottom
/// blending to sky blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Turn a sum of `samples` radiance samples into a display color.
///
/// Averages, clamps each channel to [0, 0.999] and applies gamma 2.0.
pub fn normalize_color(sum: Color, samples: u32) -> Color {
    let scale = 1.0 / samples as f32;
    let range = Interval::new(0.0, 0.999);
    let clamp = |c: f32| range.clamp(c * scale).sqrt();
    Color::new(clamp(sum.x), clamp(sum.y), clamp(sum.z))
}

/// Render a single pixel with multi-sampling; returns the display color.
///
/// `row` 0 is the top of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    row: u32,
    col: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f32;
    let height = config.height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (col as f32 + gen_f32(rng)) / (width - 1.0);
        let v = (height - row as f32 - 1.0 - gen_f32(rng)) / (height - 1.0);

        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    normalize_color(pixel_color, config.samples_per_pixel)
}

/// Generator for one row, derived from the base seed.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render one row of the image.
pub fn render_row(camera: &Camera, scene: &Scene, row: u32, config: &RenderConfig) -> Vec<Color> {
    let mut rng = row_rng(config.seed, row);
    (0..config.width)
        .map(|col| render_pixel(camera, scene, row, col, config, &mut rng))
        .collect()
}

/// Render the entire scene to an image buffer.
///
/// Rows are rendered in parallel; because every row owns a generator seeded
/// from `config.seed`, the result does not depend on thread scheduling.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let rows: Vec<Vec<Color>> = (0..config.height)
        .into_par_iter()
        .map(|row| {
            let pixels = render_row(camera, scene, row, config);
            log::debug!("Finished row {}", row);
            pixels
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for (row, pixels) in rows.into_iter().enumerate() {
        for (col, color) in pixels.into_iter().enumerate() {
            image.set_pixel(row as u32, col as u32, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Quantize a display channel in [0, 1] to 8 bits.
#[inline]
fn to_u8(c: f32) -> u8 {
    (256.0 * c.clamp(0.0, 0.999)) as u8
}

/// Tone-mapped pixel storage, addressed by (row, col) with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (row, col).
    pub fn get_pixel(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col). Channels are expected in [0, 1].
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get_pixel(y, x);
            image::Rgb([to_u8(c.x), to_u8(c.y), to_u8(c.z)])
        })
    }

    /// Save the image; the format follows the extension (`.png`, `.ppm`, ...).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgb8().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
