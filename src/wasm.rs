//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat row-major RGB bytes (length = width * height * 3).

use wasm_bindgen::prelude::*;

use crate::filters::FilterKind;
use crate::image::Image;

/// Apply a named filter to a flat RGB byte buffer.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `name` - Filter name, e.g. `"sepia"` or `"gray-world"`
/// * `seed` - Optional seed for the glass filter
///
/// # Returns
/// Flat array of filtered RGB bytes, or an error for a bad name or size
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    name: &str,
    seed: Option<u64>,
) -> Result<Vec<u8>, JsError> {
    let kind: FilterKind = name.parse()?;
    let source = Image::from_raw(width, height, data.to_vec())?;
    let mut filter = match seed {
        Some(seed) => kind.build_seeded(seed),
        None => kind.build(),
    };
    Ok(filter.apply(&source).into_raw())
}

/// Names accepted by `apply_filter_wasm`, comma separated.
#[wasm_bindgen]
pub fn filter_names_wasm() -> String {
    FilterKind::ALL
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(",")
}
