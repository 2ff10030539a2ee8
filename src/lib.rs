//! Raster Filters
//!
//! Pixel- and neighborhood-level filters over 8-bit RGB images, with
//! optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are RGB only, stored as `(height, width, 3)` u8 arrays. Pixel
//! coordinates in the API are `(x, y)`.
//!
//! ## Filter Architecture
//! Every filter produces a new image with the same dimensions as its input
//! through [`filters::Filter::process`], which reports progress per column
//! and stops cooperatively when its [`CancellationToken`] is set:
//!
//! ```
//! use raster_filters::{CancellationToken, FilterKind, Image, Outcome, Rgb};
//!
//! let source = Image::filled(4, 4, Rgb::new(10, 20, 30)).unwrap();
//! let mut filter = FilterKind::Invert.build();
//! match filter.process(&source, |_percent| {}, &CancellationToken::new()) {
//!     Outcome::Completed(out) => assert_eq!(out.pixel(0, 0), Rgb::new(245, 235, 225)),
//!     Outcome::Cancelled => unreachable!(),
//! }
//! ```

pub mod error;
pub mod filters;
pub mod image;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, Result};
pub use filters::{CancellationToken, Filter, FilterKind, Outcome};
pub use image::{Image, Rgb};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::FilterKind;
    use crate::image::Image;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Apply a named filter to an RGB u8 image of shape (height, width, 3).
    ///
    /// `seed` makes the glass filter reproducible; other filters ignore it.
    #[pyfunction]
    #[pyo3(signature = (image, name, seed=None))]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let kind: FilterKind = name.parse()?;
        let source = Image::from_array(image.as_array().to_owned())?;
        let mut filter = match seed {
            Some(seed) => kind.build_seeded(seed),
            None => kind.build(),
        };
        let result = filter.apply(&source);
        Ok(result.into_array().into_pyarray(py))
    }

    /// Names accepted by `apply_filter`.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        FilterKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    #[pymodule]
    pub fn raster_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::raster_filters;
