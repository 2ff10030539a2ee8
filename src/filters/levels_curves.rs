//! Linear histogram stretch.
//!
//! The first pass scans per-channel minimum and maximum, the second maps
//! each channel through `255 * (v - min) / (max - min)`.
//!
//! ## Current behavior
//!
//! The stretch keeps three quirks of the established output, all pinned by
//! the tests below:
//! - Running minima and maxima start at 0, so the minimum of an 8-bit
//!   channel is always 0.
//! - The red minimum is subtracted for every channel.
//! - The stretched value is added to the original value instead of
//!   replacing it.

use super::core::{clamp, clamp_channel, half_step_percent, CancellationToken, Outcome};
use crate::image::{Image, Rgb};

/// Per-channel extremes gathered by the first pass, indexed R, G, B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelRange {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl ChannelRange {
    /// Fold one pixel into the running extremes.
    pub fn update(&mut self, px: Rgb) {
        for (c, value) in px.channels().into_iter().enumerate() {
            let value = value as i32;
            if self.min[c] > value {
                self.min[c] = value;
            }
            if self.max[c] < value {
                self.max[c] = value;
            }
        }
    }

    /// Stretch one pixel.
    pub fn stretch(&self, px: Rgb) -> Rgb {
        let [r, g, b] = px.channels();
        Rgb::new(
            self.stretch_channel(0, r),
            self.stretch_channel(1, g),
            self.stretch_channel(2, b),
        )
    }

    /// `clamp(clamp(255 * (v - min_r) / (max_c - min_c)) + v)` in integer
    /// arithmetic. A zero range stretches to 0.
    fn stretch_channel(&self, c: usize, value: u8) -> u8 {
        let v = value as i32;
        let range = self.max[c] - self.min[c];
        let stretched = (255 * (v - self.min[0])).checked_div(range).unwrap_or(0);
        clamp_channel(clamp(stretched, 0, 255) + v)
    }
}

/// Run the linear histogram stretch.
///
/// Progress advances half a step per column over both passes, so the scan
/// covers 0-50% and the write 50-100%. Cancellation is checked once per
/// column in both passes.
pub fn linear_stretch(
    source: &Image,
    progress: &mut dyn FnMut(u32),
    cancel: &CancellationToken,
) -> Outcome<Image> {
    let (width, height) = (source.width(), source.height());
    let mut half_steps = 0;

    tracing::debug!(width, height, "linear stretch started");

    // Pass 1: extremes
    let mut range = ChannelRange::default();
    for x in 0..width {
        progress(half_step_percent(half_steps, width));
        half_steps += 1;
        if cancel.is_cancelled() {
            tracing::debug!(pass = 1, column = x, "linear stretch cancelled");
            return Outcome::Cancelled;
        }
        for y in 0..height {
            range.update(source.pixel(x, y));
        }
    }
    tracing::debug!(?range, "linear stretch statistics");

    // Pass 2: stretch
    let mut output = source.blank_like();
    for x in 0..width {
        progress(half_step_percent(half_steps, width));
        half_steps += 1;
        if cancel.is_cancelled() {
            tracing::debug!(pass = 2, column = x, "linear stretch cancelled");
            return Outcome::Cancelled;
        }
        for y in 0..height {
            output.put_pixel(x, y, range.stretch(source.pixel(x, y)));
        }
    }

    progress(100);
    Outcome::Completed(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &Image) -> Image {
        linear_stretch(source, &mut |_| {}, &CancellationToken::new())
            .completed()
            .expect("not cancelled")
    }

    #[test]
    fn test_minimum_seeded_at_zero() {
        let mut range = ChannelRange::default();
        range.update(Rgb::new(100, 120, 140));
        range.update(Rgb::new(200, 220, 240));

        // True minima are 100/120/140, but the scan starts from 0.
        assert_eq!(range.min, [0, 0, 0]);
        assert_eq!(range.max, [200, 220, 240]);
    }

    #[test]
    fn test_stretch_adds_to_original() {
        let source = Image::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb::new(100, 100, 100)
            } else {
                Rgb::new(200, 200, 200)
            }
        })
        .unwrap();
        let out = run(&source);

        // 255 * 100 / 200 = 127, plus the original 100.
        assert_eq!(out.pixel(0, 0), Rgb::new(227, 227, 227));
        assert_eq!(out.pixel(1, 0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_black_stays_black() {
        let source =
            Image::from_fn(2, 2, |x, y| Rgb::new((x * 50) as u8, (y * 60) as u8, 10)).unwrap();
        let out = run(&source);
        assert_eq!(out.pixel(0, 0).r, 0);
        assert_eq!(out.pixel(0, 0).g, 0);
    }

    #[test]
    fn test_red_minimum_used_for_all_channels() {
        let range = ChannelRange {
            min: [50, 10, 20],
            max: [150, 110, 220],
        };
        // green: 255 * (60 - 50) / (110 - 10) = 25, plus 60
        // blue:  255 * (70 - 50) / (220 - 20) = 25, plus 70
        assert_eq!(range.stretch(Rgb::new(50, 60, 70)), Rgb::new(50, 85, 95));
    }

    #[test]
    fn test_below_red_minimum_clamps_to_original() {
        let range = ChannelRange {
            min: [100, 0, 0],
            max: [200, 200, 200],
        };
        // green: 255 * (40 - 100) / 200 is negative, clamped to 0.
        assert_eq!(range.stretch(Rgb::new(150, 40, 40)).g, 40);
    }

    #[test]
    fn test_all_zero_channel_does_not_divide() {
        let source = Image::filled(3, 3, Rgb::new(0, 0, 80)).unwrap();
        let out = run(&source);
        // Blue: 255 * 80 / 80 = 255, plus 80, clamped.
        assert_eq!(out.pixel(2, 2), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_progress_and_cancellation() {
        let source = Image::filled(2, 2, Rgb::new(5, 5, 5)).unwrap();
        let mut seen = Vec::new();
        let _ = linear_stretch(&source, &mut |p| seen.push(p), &CancellationToken::new());
        assert_eq!(seen, vec![0, 25, 50, 75, 100]);

        let token = CancellationToken::new();
        token.cancel();
        assert!(linear_stretch(&source, &mut |_| {}, &token).is_cancelled());
    }
}
