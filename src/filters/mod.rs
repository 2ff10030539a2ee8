//! Filter modules for image processing effects.
//!
//! ## Image Format
//!
//! Every filter reads an 8-bit RGB [`Image`] and produces a fresh image of
//! the same dimensions. The source is never modified.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **One entry point** - [`Filter::process`] over a closed set of variants
//! - **Column order** - output is computed column by column, top to bottom
//! - **Cooperative cancellation** - checked once per column via [`CancellationToken`]
//! - **No partial results** - a cancelled run yields [`Outcome::Cancelled`]
//!
//! ## Filter Categories
//!
//! - **Point**: invert, grayscale, sepia, brightness (`color_adjust`, `grayscale`)
//! - **Convolution**: blur, gaussian, sharpen (`convolve`, `blur`, `sharpen`)
//! - **Geometric**: waves, glass (`distort`)
//! - **Global statistics**: gray world, linear stretch (`color_science`, `levels_curves`)

use std::fmt;
use std::str::FromStr;

pub mod core;
pub mod grayscale;
pub mod color_adjust;
pub mod convolve;
pub mod blur;
pub mod sharpen;
pub mod distort;
pub mod color_science;
pub mod levels_curves;

use self::blur::{DEFAULT_GAUSSIAN_RADIUS, DEFAULT_GAUSSIAN_SIGMA};
use self::color_adjust::PointFilter;
use self::convolve::ConvolutionFilter;
use self::core::run_per_pixel;
use self::distort::{GeometricFilter, GlassFilter};
use crate::error::{FilterError, Result};
use crate::image::Image;

pub use self::core::{CancellationToken, Outcome};

// ============================================================================
// Filter
// ============================================================================

/// Filters that need a full statistics pass before producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalStatisticsFilter {
    GrayWorld,
    LinearStretch,
}

impl GlobalStatisticsFilter {
    fn process(
        self,
        source: &Image,
        progress: &mut dyn FnMut(u32),
        cancel: &CancellationToken,
    ) -> Outcome<Image> {
        match self {
            GlobalStatisticsFilter::GrayWorld => {
                color_science::gray_world(source, progress, cancel)
            }
            GlobalStatisticsFilter::LinearStretch => {
                levels_curves::linear_stretch(source, progress, cancel)
            }
        }
    }
}

/// Any filter this crate can run.
#[derive(Debug, Clone)]
pub enum Filter {
    Point(PointFilter),
    Convolution(ConvolutionFilter),
    Geometric(GeometricFilter),
    GlobalStatistics(GlobalStatisticsFilter),
}

impl Filter {
    /// Produce a filtered copy of `source`.
    ///
    /// `progress` receives non-decreasing percentages and `100` only when the
    /// run completes. `cancel` is checked once per column (per pass for
    /// two-pass filters); once set, the run stops and returns
    /// [`Outcome::Cancelled`].
    pub fn process<P>(
        &mut self,
        source: &Image,
        mut progress: P,
        cancel: &CancellationToken,
    ) -> Outcome<Image>
    where
        P: FnMut(u32),
    {
        let progress: &mut dyn FnMut(u32) = &mut progress;
        match self {
            Filter::Point(filter) => run_per_pixel(filter, source, progress, cancel),
            Filter::Convolution(filter) => run_per_pixel(filter, source, progress, cancel),
            Filter::Geometric(filter) => run_per_pixel(filter, source, progress, cancel),
            Filter::GlobalStatistics(filter) => filter.process(source, progress, cancel),
        }
    }

    /// Run to completion without progress or cancellation.
    pub fn apply(&mut self, source: &Image) -> Image {
        match self.process(source, |_| {}, &CancellationToken::new()) {
            Outcome::Completed(image) => image,
            Outcome::Cancelled => unreachable!("a fresh token is never cancelled"),
        }
    }

    /// Gaussian blur with a custom radius and sigma.
    pub fn gaussian(radius: usize, sigma: f32) -> Result<Self> {
        Ok(Filter::Convolution(ConvolutionFilter::gaussian(radius, sigma)?))
    }

    /// Glass filter with a deterministic generator.
    pub fn glass_seeded(seed: u64) -> Self {
        Filter::Geometric(GeometricFilter::Glass(GlassFilter::with_seed(seed)))
    }
}

impl From<PointFilter> for Filter {
    fn from(filter: PointFilter) -> Self {
        Filter::Point(filter)
    }
}

impl From<ConvolutionFilter> for Filter {
    fn from(filter: ConvolutionFilter) -> Self {
        Filter::Convolution(filter)
    }
}

impl From<GeometricFilter> for Filter {
    fn from(filter: GeometricFilter) -> Self {
        Filter::Geometric(filter)
    }
}

impl From<GlobalStatisticsFilter> for Filter {
    fn from(filter: GlobalStatisticsFilter) -> Self {
        Filter::GlobalStatistics(filter)
    }
}

// ============================================================================
// Catalogue
// ============================================================================

/// The filters offered to a user, by stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Invert,
    Grayscale,
    Sepia,
    Brightness,
    GrayWorld,
    LinearStretch,
    Waves,
    Glass,
    Blur,
    Gaussian,
    Sharpen,
}

impl FilterKind {
    pub const ALL: [FilterKind; 11] = [
        FilterKind::Invert,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Brightness,
        FilterKind::GrayWorld,
        FilterKind::LinearStretch,
        FilterKind::Waves,
        FilterKind::Glass,
        FilterKind::Blur,
        FilterKind::Gaussian,
        FilterKind::Sharpen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Invert => "invert",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Brightness => "brightness",
            FilterKind::GrayWorld => "gray-world",
            FilterKind::LinearStretch => "linear-stretch",
            FilterKind::Waves => "waves",
            FilterKind::Glass => "glass",
            FilterKind::Blur => "blur",
            FilterKind::Gaussian => "gaussian",
            FilterKind::Sharpen => "sharpen",
        }
    }

    /// Build the filter with its default configuration.
    ///
    /// Glass is seeded from OS entropy; use [`FilterKind::build_seeded`] for
    /// reproducible output.
    pub fn build(self) -> Filter {
        match self {
            FilterKind::Invert => PointFilter::Invert.into(),
            FilterKind::Grayscale => PointFilter::Grayscale.into(),
            FilterKind::Sepia => PointFilter::Sepia.into(),
            FilterKind::Brightness => PointFilter::Brightness.into(),
            FilterKind::GrayWorld => GlobalStatisticsFilter::GrayWorld.into(),
            FilterKind::LinearStretch => GlobalStatisticsFilter::LinearStretch.into(),
            FilterKind::Waves => GeometricFilter::Waves.into(),
            FilterKind::Glass => GeometricFilter::Glass(GlassFilter::new()).into(),
            FilterKind::Blur => ConvolutionFilter::blur().into(),
            FilterKind::Gaussian => ConvolutionFilter::new(default_gaussian_kernel()).into(),
            FilterKind::Sharpen => ConvolutionFilter::sharpen().into(),
        }
    }

    /// Like [`FilterKind::build`], but seeds the glass generator with `seed`.
    pub fn build_seeded(self, seed: u64) -> Filter {
        match self {
            FilterKind::Glass => Filter::glass_seeded(seed),
            other => other.build(),
        }
    }
}

fn default_gaussian_kernel() -> convolve::Kernel {
    match blur::gaussian_kernel(DEFAULT_GAUSSIAN_RADIUS, DEFAULT_GAUSSIAN_SIGMA) {
        Ok(kernel) => kernel,
        Err(_) => unreachable!("default gaussian parameters are valid"),
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}
