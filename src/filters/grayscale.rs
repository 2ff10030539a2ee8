//! Luma-based point filters: grayscale and sepia.
//!
//! Both use the ITU-R BT.601 luma coefficients.

use super::core::{clamp, clamp_channel};
use crate::image::Rgb;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Sepia tone depth.
const SEPIA_K: f64 = 60.0;

/// Unrounded BT.601 luma of a pixel.
#[inline]
pub fn luma(px: Rgb) -> f64 {
    LUMA_R * px.r as f64 + LUMA_G * px.g as f64 + LUMA_B * px.b as f64
}

/// Gray pixel with `R = G = B = round(luma)`.
///
/// Halfway cases round to even.
pub fn grayscale_pixel(px: Rgb) -> Rgb {
    let intensity = clamp(luma(px).round_ties_even(), 0.0, 255.0) as u8;
    Rgb::new(intensity, intensity, intensity)
}

/// Sepia-toned pixel: luma shifted by `+2k`, `+k/2`, `-k` per channel.
///
/// Each channel is truncated toward zero before clamping.
pub fn sepia_pixel(px: Rgb) -> Rgb {
    let intensity = luma(px);
    Rgb::new(
        clamp_channel((intensity + 2.0 * SEPIA_K) as i32),
        clamp_channel((intensity + 0.5 * SEPIA_K) as i32),
        clamp_channel((intensity - SEPIA_K) as i32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_red() {
        // 0.299 * 255 = 76.245
        assert_eq!(grayscale_pixel(Rgb::new(255, 0, 0)), Rgb::new(76, 76, 76));
    }

    #[test]
    fn test_grayscale_green() {
        // 0.587 * 255 = 149.685
        assert_eq!(grayscale_pixel(Rgb::new(0, 255, 0)), Rgb::new(150, 150, 150));
    }

    #[test]
    fn test_grayscale_white_stays_white() {
        assert_eq!(grayscale_pixel(Rgb::new(255, 255, 255)), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_grayscale_channels_equal() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(51) {
                let out = grayscale_pixel(Rgb::new(r as u8, g as u8, 200));
                assert_eq!(out.r, out.g);
                assert_eq!(out.g, out.b);
            }
        }
    }

    #[test]
    fn test_sepia_black() {
        // 0 + 120, 0 + 30, 0 - 60 -> clamped
        assert_eq!(sepia_pixel(Rgb::new(0, 0, 0)), Rgb::new(120, 30, 0));
    }

    #[test]
    fn test_sepia_gray() {
        // luma of (100, 100, 100) is 100
        assert_eq!(sepia_pixel(Rgb::new(100, 100, 100)), Rgb::new(220, 130, 40));
    }

    #[test]
    fn test_sepia_bright_saturates_red() {
        let out = sepia_pixel(Rgb::new(200, 200, 200));
        assert_eq!(out.r, 255);
        assert_eq!(out.g, 230);
        assert_eq!(out.b, 140);
    }
}
