//! Filter modules for depth-image processing.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Depth8 | (H, W) | u8 | Height image, 0 = unknown |
//! | Depth16 | (H, W) | u16 | Depth image, 0 = unknown |
//!
//! Gradients are computed in f64 regardless of the sample type, so no
//! intermediate result wraps or saturates.

pub mod core;
pub mod edge;

pub use self::core::{max_value, pad_constant, DepthSample};
pub use self::edge::{build_edge_map, sobel_magnitude, threshold_edges, EDGE};
