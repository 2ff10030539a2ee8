//! Core utilities shared by every filter.
//!
//! This module provides:
//! - Range clamping for channel values and coordinates
//! - The cooperative cancellation token and the pass outcome type
//! - Progress bookkeeping for single- and two-pass filters
//! - The per-pixel contract and the column-major driver loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::image::{Image, Rgb};

// ============================================================================
// Clamping
// ============================================================================

/// Bound `value` to `[min, max]`.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp an integer channel value into `[0, 255]` and narrow it.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    clamp(value, 0, 255) as u8
}

/// Clamp a signed coordinate into `[0, len - 1]`.
#[inline]
pub fn clamp_coord(value: i64, len: usize) -> usize {
    clamp(value, 0, len as i64 - 1) as usize
}

// ============================================================================
// Cancellation
// ============================================================================

/// Cooperative cancellation flag shared between a running pass and the
/// thread that wants to stop it.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Running passes stop at their next column.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Result of a filter pass.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The pass ran to the end.
    Completed(T),
    /// Cancellation was observed; nothing was produced.
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The produced value, if the pass completed.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Percent reached at the start of column `x` in a single pass.
#[inline]
pub fn column_percent(x: usize, width: usize) -> u32 {
    (100 * x / width) as u32
}

/// Percent reached after `half_steps` columns of a two-pass run.
///
/// Every column is worth half a column of the full budget, so the first pass
/// spans 0-50% and the second 50-100%.
#[inline]
pub fn half_step_percent(half_steps: usize, width: usize) -> u32 {
    (50 * half_steps / width) as u32
}

// ============================================================================
// Per-pixel driver
// ============================================================================

/// Per-pixel computation driven by [`run_per_pixel`].
///
/// `compute_pixel` is called once per output pixel, columns first, and must
/// stay in bounds for any `(x, y)` inside `source`.
pub trait PixelFilter {
    fn compute_pixel(&mut self, source: &Image, x: usize, y: usize) -> Rgb;
}

/// Drive a [`PixelFilter`] over `source`, column by column.
///
/// Progress is reported and cancellation checked once per column. A cancelled
/// run drops its partial output.
pub fn run_per_pixel<F>(
    filter: &mut F,
    source: &Image,
    progress: &mut dyn FnMut(u32),
    cancel: &CancellationToken,
) -> Outcome<Image>
where
    F: PixelFilter + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    let mut output = source.blank_like();

    tracing::debug!(width, height, "per-pixel pass started");

    for x in 0..width {
        progress(column_percent(x, width));
        if cancel.is_cancelled() {
            tracing::debug!(column = x, "per-pixel pass cancelled");
            return Outcome::Cancelled;
        }
        for y in 0..height {
            output.put_pixel(x, y, filter.compute_pixel(source, x, y));
        }
    }

    progress(100);
    tracing::debug!("per-pixel pass finished");
    Outcome::Completed(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl PixelFilter for Echo {
        fn compute_pixel(&mut self, source: &Image, x: usize, y: usize) -> Rgb {
            source.pixel(x, y)
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-5, 0, 255), 0);
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp(17, 0, 255), 17);
        assert_eq!(clamp(1.5f32, 0.0, 1.0), 1.0);
        assert_eq!(clamp_channel(-1), 0);
        assert_eq!(clamp_channel(256), 255);
        assert_eq!(clamp_coord(-3, 10), 0);
        assert_eq!(clamp_coord(12, 10), 9);
    }

    #[test]
    fn test_column_percent_floors() {
        assert_eq!(column_percent(0, 3), 0);
        assert_eq!(column_percent(1, 3), 33);
        assert_eq!(column_percent(2, 3), 66);
    }

    #[test]
    fn test_half_step_percent_splits_budget() {
        assert_eq!(half_step_percent(0, 4), 0);
        assert_eq!(half_step_percent(3, 4), 37);
        assert_eq!(half_step_percent(4, 4), 50);
        assert_eq!(half_step_percent(7, 4), 87);
    }

    #[test]
    fn test_driver_reports_monotone_progress_to_100() {
        let source = Image::from_fn(7, 2, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        let mut seen = Vec::new();
        let outcome = run_per_pixel(
            &mut Echo,
            &source,
            &mut |p| seen.push(p),
            &CancellationToken::new(),
        );

        assert_eq!(outcome, Outcome::Completed(source));
        assert_eq!(seen.len(), 8);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen[..7].iter().all(|&p| p < 100));
    }

    #[test]
    fn test_driver_cancelled_before_start() {
        let source = Image::new(4, 4).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let mut seen = Vec::new();
        let outcome = run_per_pixel(&mut Echo, &source, &mut |p| seen.push(p), &token);

        assert!(outcome.is_cancelled());
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn test_driver_cancelled_mid_run() {
        let source = Image::new(10, 3).unwrap();
        let token = CancellationToken::new();
        let trigger = token.clone();

        let mut calls = 0;
        let outcome = run_per_pixel(
            &mut Echo,
            &source,
            &mut |p| {
                calls += 1;
                if p >= 50 {
                    trigger.cancel();
                }
            },
            &token,
        );

        assert_eq!(outcome.completed(), None);
        // Column 5 reports 50% and is the first to observe the flag.
        assert_eq!(calls, 6);
    }
}
