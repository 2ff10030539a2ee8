//! Sharpen kernel.
//!
//! 3x3 edge-enhancement kernel applied by the convolution engine:
//!
//! ```text
//! -1 -1 -1
//! -1  9 -1
//! -1 -1 -1
//! ```

use ndarray::Array2;

use super::convolve::Kernel;

const CENTER_WEIGHT: f32 = 9.0;
const NEIGHBOR_WEIGHT: f32 = -1.0;

/// 3x3 sharpen kernel with center `9` and all eight neighbors `-1`.
pub fn sharpen_kernel() -> Kernel {
    let mut weights = Array2::from_elem((3, 3), NEIGHBOR_WEIGHT);
    weights[[1, 1]] = CENTER_WEIGHT;
    Kernel::from_odd(weights)
}
