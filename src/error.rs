//! Error types for image and filter construction.
//!
//! Per-pixel computation never fails; everything that can go wrong is
//! rejected up front when an image, kernel or filter is built.

use thiserror::Error;

/// Result type alias for filter construction.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while building images, kernels and filters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Image width or height is zero.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Pixel buffer length does not match `width * height * 3`.
    #[error("pixel buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Array has a channel count other than 3.
    #[error("unsupported channel count: {0} (expected 3)")]
    ChannelCount(usize),

    /// Kernel has no weights.
    #[error("kernel is empty")]
    EmptyKernel,

    /// Kernel side lengths must be odd so the kernel has a center.
    #[error("kernel dimensions must be odd, got {width}x{height}")]
    EvenKernel { width: usize, height: usize },

    /// Gaussian radius must be at least 1.
    #[error("gaussian radius must be positive, got {0}")]
    InvalidRadius(usize),

    /// Gaussian sigma must be a finite positive number.
    #[error("gaussian sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// No filter is registered under this name.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}
