//! Core utilities shared by the flattening stages.
//!
//! This module provides:
//! - The `DepthSample` trait over the supported cell types (u8, u16)
//! - Constant padding of a depth image into a working f64 grid
//! - Reflect-mode index mapping for 3x3 kernels

use ndarray::{s, Array2, ArrayView2};

/// A numeric depth/height cell. Zero means "unknown".
pub trait DepthSample: Copy + Default + PartialOrd + Send + Sync + 'static {
    fn to_u64(self) -> u64;

    fn to_f64(self) -> f64;

    /// Narrow an integer mean back to the sample type.
    ///
    /// Means are taken over input samples, so they never exceed the input
    /// maximum; saturation only guards the cast.
    fn from_mean(mean: u64) -> Self;
}

impl DepthSample for u8 {
    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_mean(mean: u64) -> Self {
        mean.min(u8::MAX as u64) as u8
    }
}

impl DepthSample for u16 {
    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_mean(mean: u64) -> Self {
        mean.min(u16::MAX as u64) as u16
    }
}

/// Largest sample in the image (0 for an all-unknown image).
pub fn max_value<T: DepthSample>(image: ArrayView2<T>) -> u64 {
    image.iter().map(|v| v.to_u64()).max().unwrap_or(0)
}

/// Pad an image by `pad` cells on every side with a constant value.
///
/// # Returns
/// f64 grid of shape (height + 2 * pad, width + 2 * pad)
pub fn pad_constant<T: DepthSample>(image: ArrayView2<T>, pad: usize, value: f64) -> Array2<f64> {
    let (height, width) = image.dim();
    let mut padded = Array2::<f64>::from_elem((height + 2 * pad, width + 2 * pad), value);
    padded
        .slice_mut(s![pad..pad + height, pad..pad + width])
        .assign(&image.mapv(|v| v.to_f64()));
    padded
}

/// Map an index that may step one cell outside `0..len` back inside,
/// mirroring about the border (`d c b a | a b c d`).
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    let len = len as isize;
    let mapped = if i < 0 {
        -i - 1
    } else if i >= len {
        2 * len - i - 1
    } else {
        i
    };
    mapped.clamp(0, len - 1) as usize
}
