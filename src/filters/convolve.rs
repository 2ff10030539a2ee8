//! Convolution engine.
//!
//! A [`ConvolutionFilter`] computes, for every output pixel, the weighted sum
//! of the source neighborhood under its [`Kernel`]. Neighbors that fall
//! outside the image are replaced by the nearest edge pixel (edge clamping),
//! never wrapped or zero-padded.

use ndarray::Array2;

use super::blur::{box_kernel, gaussian_kernel};
use super::core::{clamp_channel, clamp_coord, PixelFilter};
use super::sharpen::sharpen_kernel;
use crate::error::{FilterError, Result};
use crate::image::{Image, Rgb};

/// Immutable matrix of weights with odd side lengths.
///
/// Stored as `(rows, cols)`, i.e. `[[ky, kx]]`, like the image arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f32>,
}

impl Kernel {
    /// Wrap a weight matrix.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyKernel`] for an empty matrix and
    /// [`FilterError::EvenKernel`] when either side length is even.
    pub fn new(weights: Array2<f32>) -> Result<Self> {
        let (height, width) = weights.dim();
        if width == 0 || height == 0 {
            return Err(FilterError::EmptyKernel);
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::EvenKernel { width, height });
        }
        Ok(Kernel { weights })
    }

    /// Wrap weights whose side lengths are known to be odd.
    pub(crate) fn from_odd(weights: Array2<f32>) -> Self {
        debug_assert!(weights.dim().0 % 2 == 1 && weights.dim().1 % 2 == 1);
        Kernel { weights }
    }

    /// 1x1 kernel that reproduces its input.
    pub fn identity() -> Self {
        Kernel {
            weights: Array2::<f32>::ones((1, 1)),
        }
    }

    /// Horizontal radius: `(width - 1) / 2`.
    #[inline]
    pub fn radius_x(&self) -> usize {
        self.weights.dim().1 / 2
    }

    /// Vertical radius: `(height - 1) / 2`.
    #[inline]
    pub fn radius_y(&self) -> usize {
        self.weights.dim().0 / 2
    }

    /// Weight at offset `(dx, dy)` from the center.
    ///
    /// # Panics
    ///
    /// If the offset lies outside the kernel radii.
    #[inline]
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let kx = (dx + self.radius_x() as isize) as usize;
        let ky = (dy + self.radius_y() as isize) as usize;
        self.weights[[ky, kx]]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.sum()
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }
}

/// Neighborhood weighted-sum filter with edge-clamped sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionFilter {
    kernel: Kernel,
}

impl ConvolutionFilter {
    pub fn new(kernel: Kernel) -> Self {
        ConvolutionFilter { kernel }
    }

    /// 3x3 box blur.
    pub fn blur() -> Self {
        Self::new(box_kernel())
    }

    /// Gaussian blur with the given radius and sigma.
    pub fn gaussian(radius: usize, sigma: f32) -> Result<Self> {
        Ok(Self::new(gaussian_kernel(radius, sigma)?))
    }

    /// 3x3 sharpen.
    pub fn sharpen() -> Self {
        Self::new(sharpen_kernel())
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Weighted sum of the neighborhood around `(x, y)`.
    ///
    /// Channels accumulate in `f32`, are truncated toward zero and then
    /// clamped to 0-255.
    pub fn convolve_at(&self, source: &Image, x: usize, y: usize) -> Rgb {
        let (width, height) = (source.width(), source.height());
        let rx = self.kernel.radius_x() as isize;
        let ry = self.kernel.radius_y() as isize;

        let mut sum_r = 0.0f32;
        let mut sum_g = 0.0f32;
        let mut sum_b = 0.0f32;

        for l in -ry..=ry {
            let sy = clamp_coord(y as i64 + l as i64, height);
            for k in -rx..=rx {
                let sx = clamp_coord(x as i64 + k as i64, width);
                let weight = self.kernel.weight(k, l);
                let neighbor = source.pixel(sx, sy);
                sum_r += neighbor.r as f32 * weight;
                sum_g += neighbor.g as f32 * weight;
                sum_b += neighbor.b as f32 * weight;
            }
        }

        Rgb::new(
            clamp_channel(sum_r as i32),
            clamp_channel(sum_g as i32),
            clamp_channel(sum_b as i32),
        )
    }
}

impl PixelFilter for ConvolutionFilter {
    fn compute_pixel(&mut self, source: &Image, x: usize, y: usize) -> Rgb {
        self.convolve_at(source, x, y)
    }
}
