//! Point filters: Invert, Grayscale, Sepia, Brightness.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Each output pixel is a pure function of the source pixel at the same
//! coordinate, with every channel clamped to 0-255.

use super::core::{clamp_channel, PixelFilter};
use super::grayscale::{grayscale_pixel, sepia_pixel};
use crate::image::{Image, Rgb};

/// Amount added to every channel by [`PointFilter::Brightness`].
pub const BRIGHTNESS_STEP: i32 = 10;

/// Stateless per-pixel color transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFilter {
    Invert,
    Grayscale,
    Sepia,
    Brightness,
}

impl PointFilter {
    /// Apply the transform to one pixel.
    pub fn apply(self, px: Rgb) -> Rgb {
        match self {
            PointFilter::Invert => invert_pixel(px),
            PointFilter::Grayscale => grayscale_pixel(px),
            PointFilter::Sepia => sepia_pixel(px),
            PointFilter::Brightness => brightness_pixel(px, BRIGHTNESS_STEP),
        }
    }
}

impl PixelFilter for PointFilter {
    fn compute_pixel(&mut self, source: &Image, x: usize, y: usize) -> Rgb {
        self.apply(source.pixel(x, y))
    }
}

// ============================================================================
// Invert
// ============================================================================

/// `255 - c` on every channel.
#[inline]
pub fn invert_pixel(px: Rgb) -> Rgb {
    Rgb::new(255 - px.r, 255 - px.g, 255 - px.b)
}

// ============================================================================
// Brightness
// ============================================================================

/// Add `offset` to every channel, saturating at 0 and 255.
#[inline]
pub fn brightness_pixel(px: Rgb, offset: i32) -> Rgb {
    Rgb::new(
        clamp_channel(px.r as i32 + offset),
        clamp_channel(px.g as i32 + offset),
        clamp_channel(px.b as i32 + offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::core::{run_per_pixel, CancellationToken};

    fn run(filter: PointFilter, source: &Image) -> Image {
        let mut filter = filter;
        run_per_pixel(&mut filter, source, &mut |_| {}, &CancellationToken::new())
            .completed()
            .expect("not cancelled")
    }

    fn two_by_two() -> Image {
        let mut img = Image::new(2, 2).unwrap();
        img.put_pixel(0, 0, Rgb::new(10, 20, 30));
        img.put_pixel(0, 1, Rgb::new(200, 210, 220));
        img.put_pixel(1, 0, Rgb::new(50, 60, 70));
        img.put_pixel(1, 1, Rgb::new(100, 110, 120));
        img
    }

    #[test]
    fn test_invert_two_by_two() {
        let out = run(PointFilter::Invert, &two_by_two());

        assert_eq!(out.pixel(0, 0), Rgb::new(245, 235, 225));
        assert_eq!(out.pixel(0, 1), Rgb::new(55, 45, 35));
        assert_eq!(out.pixel(1, 0), Rgb::new(205, 195, 185));
        assert_eq!(out.pixel(1, 1), Rgb::new(155, 145, 135));
    }

    #[test]
    fn test_invert_is_involution() {
        let source = Image::from_fn(16, 16, |x, y| {
            Rgb::new((x * 16) as u8, (y * 16) as u8, (x * y) as u8)
        })
        .unwrap();

        let twice = run(PointFilter::Invert, &run(PointFilter::Invert, &source));
        assert_eq!(twice, source);
    }

    #[test]
    fn test_invert_extremes() {
        assert_eq!(invert_pixel(Rgb::new(0, 255, 128)), Rgb::new(255, 0, 127));
    }

    #[test]
    fn test_brightness_adds_ten() {
        assert_eq!(
            PointFilter::Brightness.apply(Rgb::new(0, 100, 240)),
            Rgb::new(10, 110, 250)
        );
    }

    #[test]
    fn test_brightness_saturates() {
        assert_eq!(
            PointFilter::Brightness.apply(Rgb::new(246, 250, 255)),
            Rgb::new(255, 255, 255)
        );
        assert_eq!(brightness_pixel(Rgb::new(5, 20, 0), -10), Rgb::new(0, 10, 0));
    }

    #[test]
    fn test_grayscale_image_channels_equal() {
        let source = Image::from_fn(8, 5, |x, y| {
            Rgb::new((x * 31) as u8, (y * 47) as u8, ((x + y) * 13) as u8)
        })
        .unwrap();
        let out = run(PointFilter::Grayscale, &source);

        for x in 0..8 {
            for y in 0..5 {
                let px = out.pixel(x, y);
                assert_eq!(px.r, px.g);
                assert_eq!(px.g, px.b);
            }
        }
    }

    #[test]
    fn test_output_has_source_dimensions() {
        let source = Image::new(3, 9).unwrap();
        for filter in [
            PointFilter::Invert,
            PointFilter::Grayscale,
            PointFilter::Sepia,
            PointFilter::Brightness,
        ] {
            let out = run(filter, &source);
            assert_eq!((out.width(), out.height()), (3, 9));
        }
    }
}
