//! Selection geometry for the region labeler.
//!
//! This module provides:
//! - **Contour extraction**: Suzuki-Abe border following over binary edge maps
//! - **Rasterization**: stroking and filling contour polygons into label grids

pub mod contour;
pub mod raster;

pub use contour::{extract_contours, find_contours, Contour, Point};
pub use raster::{fill_polygon, stroke_closed};
