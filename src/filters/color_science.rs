//! Gray-world color balance.
//!
//! Two passes over the image: the first measures the mean of each channel,
//! the second rescales every channel so that all three means move to their
//! common average.
//!
//! ## Precondition
//!
//! Every channel mean must be non-zero. A channel that is zero everywhere
//! divides by zero; the float result narrows to 0 and is not reported.

use super::core::{clamp, half_step_percent, CancellationToken, Outcome};
use crate::image::{Image, Rgb};

/// Per-channel means gathered by the first pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMeans {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ChannelMeans {
    /// Mean of the three channel means.
    pub fn average(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Rescale one pixel: `round(c * average / mean_c)` per channel.
    pub fn balance(&self, px: Rgb) -> Rgb {
        let avg = self.average();
        Rgb::new(
            rescale(px.r, avg, self.r),
            rescale(px.g, avg, self.g),
            rescale(px.b, avg, self.b),
        )
    }
}

#[inline]
fn rescale(value: u8, avg: f64, mean: f64) -> u8 {
    clamp((value as f64 * avg / mean).round(), 0.0, 255.0) as u8
}

/// Run the gray-world balance.
///
/// Progress covers 0-50% during the measuring pass and 50-100% during the
/// writing pass; cancellation is checked once per column in both.
pub fn gray_world(
    source: &Image,
    progress: &mut dyn FnMut(u32),
    cancel: &CancellationToken,
) -> Outcome<Image> {
    let (width, height) = (source.width(), source.height());
    let mut half_steps = 0;

    tracing::debug!(width, height, "gray-world pass started");

    // Pass 1: channel sums
    let (mut sum_r, mut sum_g, mut sum_b) = (0.0f64, 0.0f64, 0.0f64);
    for x in 0..width {
        progress(half_step_percent(half_steps, width));
        half_steps += 1;
        if cancel.is_cancelled() {
            tracing::debug!(pass = 1, column = x, "gray-world cancelled");
            return Outcome::Cancelled;
        }
        for y in 0..height {
            let px = source.pixel(x, y);
            sum_r += px.r as f64;
            sum_g += px.g as f64;
            sum_b += px.b as f64;
        }
    }

    let count = (width * height) as f64;
    let means = ChannelMeans {
        r: sum_r / count,
        g: sum_g / count,
        b: sum_b / count,
    };
    tracing::debug!(?means, average = means.average(), "gray-world statistics");

    // Pass 2: rescale
    let mut output = source.blank_like();
    for x in 0..width {
        progress(half_step_percent(half_steps, width));
        half_steps += 1;
        if cancel.is_cancelled() {
            tracing::debug!(pass = 2, column = x, "gray-world cancelled");
            return Outcome::Cancelled;
        }
        for y in 0..height {
            output.put_pixel(x, y, means.balance(source.pixel(x, y)));
        }
    }

    progress(100);
    Outcome::Completed(output)
}
