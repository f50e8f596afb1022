//! Edge map builder: Sobel gradient magnitude and binarization.
//!
//! The depth image is padded with a constant sentinel, differentiated along
//! both axes with 3x3 Sobel kernels (reflect mode at the grid border) and
//! thresholded into a binary map of `0` / `EDGE` cells.

use ndarray::{Array2, ArrayView2};

use crate::config::FlattenConfig;
use crate::filters::core::{pad_constant, reflect_index, DepthSample};

/// Value of an edge pixel in the binary map.
pub const EDGE: u8 = 255;

/// Sobel gradient magnitude of a 2D grid.
///
/// Out-of-range taps are mirrored about the border, so a constant grid
/// yields zero everywhere including its rim.
pub fn sobel_magnitude(input: ArrayView2<f64>) -> Array2<f64> {
    let (height, width) = input.dim();
    let mut output = Array2::<f64>::zeros((height, width));

    // Sobel kernels
    let kernel_h: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let kernel_v: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    for y in 0..height {
        for x in 0..width {
            let mut gx = 0.0f64;
            let mut gy = 0.0f64;

            for ky in 0..3 {
                let py = reflect_index(y as isize + ky as isize - 1, height);
                for kx in 0..3 {
                    let px = reflect_index(x as isize + kx as isize - 1, width);
                    let v = input[[py, px]];
                    gx += v * kernel_h[ky][kx];
                    gy += v * kernel_v[ky][kx];
                }
            }

            output[[y, x]] = gx.hypot(gy);
        }
    }

    output
}

/// Binarize a magnitude map: values strictly above `threshold` become `EDGE`.
pub fn threshold_edges(magnitude: ArrayView2<f64>, threshold: f64) -> Array2<u8> {
    magnitude.mapv(|m| if m > threshold { EDGE } else { 0 })
}

/// Build the padded binary edge map of a depth image.
///
/// # Returns
/// Binary map of shape (height + 2 * pad, width + 2 * pad)
pub fn build_edge_map<T: DepthSample>(image: ArrayView2<T>, config: &FlattenConfig) -> Array2<u8> {
    let padded = pad_constant(image, config.pad_width, config.pad_value);
    let magnitude = sobel_magnitude(padded.view());
    threshold_edges(magnitude.view(), config.edge_threshold)
}
