//! WebAssembly exports for the flattener.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images
//! cross the boundary as flat row-major arrays.

use ndarray::Array2;
use wasm_bindgen::prelude::*;

use crate::flatten::flatten;

fn to_js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Flatten a u8 height image.
///
/// # Arguments
/// * `data` - Flat array of cells (length = width * height)
/// * `width` - Image width in cells
/// * `height` - Image height in cells
///
/// # Returns
/// Flat array of flattened cells, same length as `data`
#[wasm_bindgen]
pub fn flatten_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = Array2::from_shape_vec((height, width), data.to_vec()).map_err(to_js_err)?;
    let result = flatten(input.view()).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Flatten a u16 depth image.
#[wasm_bindgen]
pub fn flatten_u16_wasm(data: &[u16], width: usize, height: usize) -> Result<Vec<u16>, JsValue> {
    let input = Array2::from_shape_vec((height, width), data.to_vec()).map_err(to_js_err)?;
    let result = flatten(input.view()).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}
