//! RGB image buffer.
//!
//! Pixels are stored in an `ndarray::Array3<u8>` of shape `(height, width, 3)`,
//! the same layout the filter modules use for their inputs. Coordinates in the
//! public API are always `(x, y)`.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// One 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pixel written where a filter has nothing to sample.
    pub const EMPTY: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Channels as an array in R, G, B order.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Owned RGB raster with non-zero dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    data: Array3<u8>,
}

impl Image {
    /// Create a black image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions { width, height });
        }
        Ok(Image {
            data: Array3::<u8>::zeros((height, width, 3)),
        })
    }

    /// Create an image filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        let mut image = Image::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                image.put_pixel(x, y, color);
            }
        }
        Ok(image)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut image = Image::new(width, height)?;
        for x in 0..width {
            for y in 0..height {
                image.put_pixel(x, y, f(x, y));
            }
        }
        Ok(image)
    }

    /// Wrap an existing `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions { width, height });
        }
        if channels != 3 {
            return Err(FilterError::ChannelCount(channels));
        }
        Ok(Image { data })
    }

    /// Wrap a flat row-major RGB byte buffer.
    pub fn from_raw(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions { width, height });
        }
        let expected = width * height * 3;
        let actual = bytes.len();
        if actual != expected {
            return Err(FilterError::BufferLength { expected, actual });
        }
        let data = Array3::from_shape_vec((height, width, 3), bytes)
            .map_err(|_| FilterError::BufferLength { expected, actual })?;
        Ok(Image { data })
    }

    /// Black image with the same dimensions as `self`.
    pub fn blank_like(&self) -> Image {
        Image {
            data: Array3::<u8>::zeros(self.data.dim()),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` lies outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        Rgb {
            r: self.data[[y, x, 0]],
            g: self.data[[y, x, 1]],
            b: self.data[[y, x, 2]],
        }
    }

    /// Read the pixel at `(x, y)`, or `None` outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width() && y < self.height() {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` lies outside the image.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, px: Rgb) {
        self.data[[y, x, 0]] = px.r;
        self.data[[y, x, 1]] = px.g;
        self.data[[y, x, 2]] = px.b;
    }

    /// Write the pixel at `(x, y)`; returns `false` and leaves the image
    /// untouched outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, px: Rgb) -> bool {
        if x < self.width() && y < self.height() {
            self.put_pixel(x, y, px);
            true
        } else {
            false
        }
    }

    /// Borrow the underlying `(height, width, 3)` array.
    pub fn as_array(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Take the underlying `(height, width, 3)` array.
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Flat row-major RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        let data = if self.data.is_standard_layout() {
            self.data
        } else {
            self.data.as_standard_layout().to_owned()
        };
        data.into_raw_vec_and_offset().0
    }
}
