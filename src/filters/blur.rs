//! Blur kernels: box and Gaussian.
//!
//! Both kernels are averaging kernels and sum to 1.0, so a flat region keeps
//! its color. They are applied by the convolution engine in
//! [`super::convolve`].

use ndarray::Array2;

use super::convolve::Kernel;
use crate::error::{FilterError, Result};

/// Side length of the box blur kernel.
const BOX_SIZE: usize = 3;

/// Default Gaussian radius (7x7 kernel).
pub const DEFAULT_GAUSSIAN_RADIUS: usize = 3;

/// Default Gaussian standard deviation.
pub const DEFAULT_GAUSSIAN_SIGMA: f32 = 2.0;

/// 3x3 box blur kernel, every weight `1/9`.
pub fn box_kernel() -> Kernel {
    let weight = 1.0 / (BOX_SIZE * BOX_SIZE) as f32;
    Kernel::from_odd(Array2::from_elem((BOX_SIZE, BOX_SIZE), weight))
}

/// Generate a normalized 2D Gaussian kernel of side `2 * radius + 1`.
///
/// The weight at offset `(i, j)` is `exp(-(i² + j²) / (2σ²))` before
/// normalization.
///
/// # Errors
///
/// [`FilterError::InvalidRadius`] for `radius == 0` and
/// [`FilterError::InvalidSigma`] unless `sigma` is finite and positive.
pub fn gaussian_kernel(radius: usize, sigma: f32) -> Result<Kernel> {
    if radius == 0 {
        return Err(FilterError::InvalidRadius(radius));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidSigma(sigma));
    }

    let size = 2 * radius + 1;
    let r = radius as isize;
    let two_sigma_sq = 2.0 * sigma as f64 * sigma as f64;

    let mut weights = Array2::<f32>::zeros((size, size));
    let mut norm = 0.0f32;
    for j in -r..=r {
        for i in -r..=r {
            let dist_sq = (i * i + j * j) as f64;
            let w = (-dist_sq / two_sigma_sq).exp() as f32;
            weights[[(j + r) as usize, (i + r) as usize]] = w;
            norm += w;
        }
    }

    // Normalize
    weights.mapv_inplace(|w| w / norm);

    tracing::trace!(radius, sigma, "built gaussian kernel");
    Ok(Kernel::from_odd(weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel_uniform_ninths() {
        let kernel = box_kernel();
        assert_eq!(kernel.weights().dim(), (3, 3));
        for &w in kernel.weights().iter() {
            assert!((w - 1.0 / 9.0).abs() < 1e-7);
        }
        assert!((kernel.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_default_shape_and_sum() {
        let kernel = gaussian_kernel(DEFAULT_GAUSSIAN_RADIUS, DEFAULT_GAUSSIAN_SIGMA).unwrap();
        assert_eq!(kernel.weights().dim(), (7, 7));
        assert!((kernel.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_peaks_at_center_and_is_symmetric() {
        let kernel = gaussian_kernel(2, 1.0).unwrap();
        let center = kernel.weight(0, 0);
        for dy in -2..=2 {
            for dx in -2..=2 {
                assert!(kernel.weight(dx, dy) <= center);
                assert_eq!(kernel.weight(dx, dy), kernel.weight(-dx, dy));
                assert_eq!(kernel.weight(dx, dy), kernel.weight(dy, dx));
            }
        }
    }

    #[test]
    fn test_gaussian_ratio_matches_formula() {
        let sigma = 1.5f32;
        let kernel = gaussian_kernel(1, sigma).unwrap();
        let expected = (-1.0 / (2.0 * sigma * sigma)).exp();
        let ratio = kernel.weight(1, 0) / kernel.weight(0, 0);
        assert!((ratio - expected).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_rejects_bad_parameters() {
        assert_eq!(gaussian_kernel(0, 2.0).unwrap_err(), FilterError::InvalidRadius(0));
        assert_eq!(gaussian_kernel(3, 0.0).unwrap_err(), FilterError::InvalidSigma(0.0));
        assert!(gaussian_kernel(3, -1.0).is_err());
        assert!(gaussian_kernel(3, f32::NAN).is_err());
    }
}
