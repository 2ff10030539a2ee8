//! Geometric filters: Waves and Glass.
//!
//! Both remap the source coordinate per output pixel and copy the sampled
//! color unchanged. They differ in what happens off the edge:
//! - **Waves** writes [`Rgb::EMPTY`] when the displaced sample leaves the
//!   image interior.
//! - **Glass** clamps the jittered sample onto the nearest edge pixel.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::core::{clamp_coord, PixelFilter};
use crate::image::{Image, Rgb};

/// Horizontal displacement amplitude of the wave, in pixels.
const WAVE_AMPLITUDE: f64 = 20.0;

/// Vertical period of the wave, in pixels.
const WAVE_PERIOD: f64 = 60.0;

/// Glass jitter span: offsets fall in `[-SPAN/2, SPAN/2)`.
const GLASS_SPAN: f64 = 10.0;

/// Coordinate-remapping filters.
#[derive(Debug, Clone)]
pub enum GeometricFilter {
    Waves,
    Glass(GlassFilter),
}

impl PixelFilter for GeometricFilter {
    fn compute_pixel(&mut self, source: &Image, x: usize, y: usize) -> Rgb {
        match self {
            GeometricFilter::Waves => wave_pixel(source, x, y),
            GeometricFilter::Glass(glass) => glass.sample(source, x, y),
        }
    }
}

// ============================================================================
// Waves
// ============================================================================

/// Horizontal shift applied to row `y`: `round(20 * sin(2πy / 60))`.
#[inline]
pub fn wave_offset(y: usize) -> i64 {
    (WAVE_AMPLITUDE * (2.0 * PI * y as f64 / WAVE_PERIOD).sin()).round() as i64
}

/// Sample `(x + wave_offset(y), y)`.
///
/// Samples outside `[1, width - 2] x [1, height - 2]` produce
/// [`Rgb::EMPTY`], so the outermost rows and columns are always empty.
pub fn wave_pixel(source: &Image, x: usize, y: usize) -> Rgb {
    let sx = x as i64 + wave_offset(y);
    let sy = y as i64;
    let (width, height) = (source.width() as i64, source.height() as i64);

    if sx > 0 && sx < width - 1 && sy > 0 && sy < height - 1 {
        source.pixel(sx as usize, sy as usize)
    } else {
        Rgb::EMPTY
    }
}

// ============================================================================
// Glass
// ============================================================================

/// Random-jitter sampler owning its own generator.
///
/// Every sample draws two fresh uniforms, x first then y, so two instances
/// built from the same seed produce identical images.
///
/// Cloning copies the generator state: a clone replays the original's
/// remaining jitter sequence. Build a new instance for independent jitter.
#[derive(Debug, Clone)]
pub struct GlassFilter {
    rng: StdRng,
}

impl GlassFilter {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        GlassFilter {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seed deterministically.
    pub fn with_seed(seed: u64) -> Self {
        GlassFilter {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Copy the pixel at a jittered, edge-clamped coordinate near `(x, y)`.
    pub fn sample(&mut self, source: &Image, x: usize, y: usize) -> Rgb {
        let jitter_x = (self.rng.gen::<f64>() - 0.5) * GLASS_SPAN;
        let jitter_y = (self.rng.gen::<f64>() - 0.5) * GLASS_SPAN;
        let sx = clamp_coord((x as f64 + jitter_x) as i64, source.width());
        let sy = clamp_coord((y as f64 + jitter_y) as i64, source.height());
        source.pixel(sx, sy)
    }
}

impl Default for GlassFilter {
    fn default() -> Self {
        Self::new()
    }
}
