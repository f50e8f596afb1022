//! Height-image projection of occupied map cells.
//!
//! Produces the MONO8 height image the flattener consumes: occupied cell
//! centers inside a robot-aligned box are rasterized top-down, each pixel
//! keeping the tallest cell scaled to 0-255 against the box height.

use ndarray::Array2;

use crate::config::ProjectionConfig;
use crate::error::FlattenError;

/// Axis-aligned box in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatteningBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl FlatteningBox {
    /// Box ahead of a robot at `translation` facing `yaw` (radians about z).
    ///
    /// The four footprint corners span `flattening_width` across the
    /// heading and `flattening_length` along it; the box is their x/y
    /// bounds, from the floor (z = 0) up to the robot's height.
    pub fn from_pose(translation: [f64; 3], yaw: f64, config: &ProjectionConfig) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let half = config.flattening_width / 2.0;
        let length = config.flattening_length;

        let corners = [(0.0, half), (0.0, -half), (length, half), (length, -half)].map(|(a, b)| {
            (
                translation[0] + a * cos - b * sin,
                translation[1] + a * sin + b * cos,
            )
        });

        let mut min = [f64::INFINITY, f64::INFINITY, 0.0];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY, translation[2]];
        for (x, y) in corners {
            min[0] = min[0].min(x);
            min[1] = min[1].min(y);
            max[0] = max[0].max(x);
            max[1] = max[1].max(y);
        }

        Self { min, max }
    }

    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    pub fn size(&self) -> [f64; 3] {
        [0, 1, 2].map(|axis| self.max[axis] - self.min[axis])
    }
}

/// Rasterize occupied cell centers into a height image.
///
/// # Arguments
/// * `points` - Centers of occupied cells (x, y, z)
/// * `bbox` - Region to project
/// * `resolution` - Cell edge length; one pixel per cell
///
/// # Returns
/// Image of shape (floor(size_y / resolution), floor(size_x / resolution)),
/// 0 where nothing is occupied.
///
/// # Errors
/// `FlattenError::InvalidProjection` for a non-positive resolution or a box
/// too small to hold one pixel.
pub fn project_height_image(
    points: &[[f64; 3]],
    bbox: &FlatteningBox,
    resolution: f64,
) -> Result<Array2<u8>, FlattenError> {
    if resolution.is_nan() || resolution <= 0.0 {
        return Err(FlattenError::InvalidProjection(format!(
            "resolution must be positive, got {resolution}"
        )));
    }

    let [size_x, size_y, _] = bbox.size();
    let width = (size_x / resolution) as usize;
    let height = (size_y / resolution) as usize;
    if width == 0 || height == 0 {
        return Err(FlattenError::InvalidProjection(format!(
            "box of {size_x} x {size_y} holds no cell at resolution {resolution}"
        )));
    }

    let mut image = Array2::<u8>::zeros((height, width));
    let z_scale = bbox.max[2] + resolution;

    for &point in points.iter().filter(|&&p| bbox.contains(p)) {
        let col = ((point[0] - bbox.min[0]) / resolution) as usize;
        let row = ((point[1] - bbox.min[1]) / resolution) as usize;
        if row >= height || col >= width {
            continue;
        }
        // Saturating cast
        let z = (point[2] / z_scale * 255.0) as u8;
        let cell = &mut image[[row, col]];
        *cell = (*cell).max(z);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_box_facing_x() {
        let bbox = FlatteningBox::from_pose([1.0, 2.0, 3.0], 0.0, &ProjectionConfig::default());

        assert_close(bbox.min[0], 1.0);
        assert_close(bbox.max[0], 3.0);
        assert_close(bbox.min[1], 1.5);
        assert_close(bbox.max[1], 2.5);
        assert_eq!(bbox.min[2], 0.0);
        assert_eq!(bbox.max[2], 3.0);
    }

    #[test]
    fn test_box_facing_y() {
        let config = ProjectionConfig::default();
        let bbox = FlatteningBox::from_pose([0.0, 0.0, 1.0], FRAC_PI_2, &config);

        assert_close(bbox.min[0], -0.5);
        assert_close(bbox.max[0], 0.5);
        assert_close(bbox.min[1], 0.0);
        assert_close(bbox.max[1], 2.0);
    }

    #[test]
    fn test_projection_keeps_tallest_cell() {
        let bbox = FlatteningBox::from_pose([1.0, 2.0, 3.0], 0.0, &ProjectionConfig::default());
        let points = [
            [1.2, 1.6, 1.0],
            [1.2, 1.6, 2.0],
            [2.7, 2.2, 0.5],
            // Outside the box
            [5.0, 2.0, 1.0],
            [1.2, 1.6, 3.5],
        ];

        let image = project_height_image(&points, &bbox, 0.5).unwrap();

        assert_eq!(image.dim(), (2, 4));
        // 2.0 / 3.5 * 255
        assert_eq!(image[[0, 0]], 145);
        // 0.5 / 3.5 * 255
        assert_eq!(image[[1, 3]], 36);
        assert_eq!(image.iter().filter(|&&v| v > 0).count(), 2);
    }

    #[test]
    fn test_projection_rejects_bad_resolution() {
        let bbox = FlatteningBox::from_pose([0.0, 0.0, 1.0], 0.0, &ProjectionConfig::default());
        assert!(matches!(
            project_height_image(&[], &bbox, 0.0),
            Err(FlattenError::InvalidProjection(_))
        ));
        assert!(matches!(
            project_height_image(&[], &bbox, 10.0),
            Err(FlattenError::InvalidProjection(_))
        ));
    }
}
