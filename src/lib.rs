//! Octoflat Rust Extensions
//!
//! Flattening of depth/height images projected from 3D occupancy maps,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are 2D arrays of shape (height, width):
//! - **Depth8**: `u8` cells, the MONO8 height images produced by projection
//! - **Depth16**: `u16` cells
//!
//! A cell value of 0 means "unknown". Every image must be at least 3x3.
//!
//! ## Pipeline
//! Regions enclosed by strong edges are replaced by their mean depth and a
//! background that reads as empty is forced to zero. See [`flatten`] for
//! the stages. Each call is synchronous and stateless; the bindings below
//! are thin shims over [`flatten::flatten`].

pub mod config;
pub mod error;
pub mod filters;
pub mod flatten;
pub mod projection;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{FlattenConfig, ProjectionConfig};
pub use error::FlattenError;
pub use flatten::{flatten_batch, flatten_with, FlattenReport, Flattened};
pub use projection::{project_height_image, FlatteningBox};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::ProjectionConfig;
    use crate::error::FlattenError;
    use crate::projection::{self, FlatteningBox};

    fn to_py_err(err: FlattenError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Flattening
    // ========================================================================

    /// Flatten a u8 height image.
    ///
    /// Regions enclosed by strong edges take their mean height; an empty
    /// background is zeroed. Output has the input's shape.
    #[pyfunction]
    pub fn flatten<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = crate::flatten::flatten(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Flatten a u16 depth image.
    #[pyfunction]
    pub fn flatten_u16<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u16>,
    ) -> PyResult<Bound<'py, PyArray2<u16>>> {
        let result = crate::flatten::flatten(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Rasterize occupied cell centers (N x 3) into a u8 height image.
    ///
    /// # Arguments
    /// * `points` - Occupied cell centers, one (x, y, z) row each
    /// * `translation` - Robot position (x, y, z)
    /// * `yaw` - Robot heading in radians
    /// * `resolution` - Map cell size
    /// * `flattening_width` - Box extent across the heading (default: 1.0)
    /// * `flattening_length` - Box extent along the heading (default: 2.0)
    #[pyfunction]
    #[pyo3(signature = (
        points,
        translation,
        yaw,
        resolution,
        flattening_width=1.0,
        flattening_length=2.0
    ))]
    pub fn project_height_image<'py>(
        py: Python<'py>,
        points: PyReadonlyArray2<'py, f64>,
        translation: [f64; 3],
        yaw: f64,
        resolution: f64,
        flattening_width: f64,
        flattening_length: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let points = points.as_array();
        if points.ncols() != 3 {
            return Err(PyValueError::new_err(format!(
                "points must have shape (N, 3), got (N, {})",
                points.ncols()
            )));
        }
        let points: Vec<[f64; 3]> = points
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1], row[2]])
            .collect();

        let config = ProjectionConfig {
            flattening_width,
            flattening_length,
        };
        let bbox = FlatteningBox::from_pose(translation, yaw, &config);
        let result =
            projection::project_height_image(&points, &bbox, resolution).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Octoflat Rust extension module
    #[pymodule]
    pub fn octoflat(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(flatten, m)?)?;
        m.add_function(wrap_pyfunction!(flatten_u16, m)?)?;
        m.add_function(wrap_pyfunction!(project_height_image, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::octoflat;
