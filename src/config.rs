//! Tunables for flattening and height-image projection.
//!
//! Both structs default to the constants the pipeline was calibrated with.
//! They deserialize with every field optional so hosts can override a
//! single value from JSON or YAML.

use serde::{Deserialize, Serialize};

/// Parameters of the flattening pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Cells of constant padding added on every side before edge detection.
    /// Default: 2
    pub pad_width: usize,

    /// Fill value of the padding. Sits outside the plausible depth range so
    /// the image border always produces a gradient.
    /// Default: 200.0
    pub pad_value: f64,

    /// Gradient magnitudes strictly above this become edge pixels.
    /// Default: 5.0
    pub edge_threshold: f64,

    /// Contours with fewer points (after chain compression) are dropped.
    /// Default: 8
    pub min_contour_len: usize,

    /// Background is zeroed when its mean original depth is at or below this.
    /// Default: 1.0
    pub ground_mean_threshold: f64,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            pad_width: 2,
            pad_value: 200.0,
            edge_threshold: 5.0,
            min_contour_len: 8,
            ground_mean_threshold: 1.0,
        }
    }
}

impl FlattenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_threshold(mut self, threshold: f64) -> Self {
        self.edge_threshold = threshold;
        self
    }

    pub fn with_min_contour_len(mut self, len: usize) -> Self {
        self.min_contour_len = len;
        self
    }

    pub fn with_ground_mean_threshold(mut self, threshold: f64) -> Self {
        self.ground_mean_threshold = threshold;
        self
    }
}

/// Size of the robot-aligned box rasterized into a height image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Extent across the heading, centered on the robot (meters).
    /// Default: 1.0
    pub flattening_width: f64,

    /// Extent along the heading, starting at the robot (meters).
    /// Default: 2.0
    pub flattening_length: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            flattening_width: 1.0,
            flattening_length: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlattenConfig::default();
        assert_eq!(config.pad_width, 2);
        assert_eq!(config.pad_value, 200.0);
        assert_eq!(config.edge_threshold, 5.0);
        assert_eq!(config.min_contour_len, 8);
        assert_eq!(config.ground_mean_threshold, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FlattenConfig = serde_json::from_str(r#"{"edge_threshold": 12.5}"#).unwrap();
        assert_eq!(config.edge_threshold, 12.5);
        assert_eq!(config.min_contour_len, 8);

        let projection: ProjectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(projection, ProjectionConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = FlattenConfig::new()
            .with_edge_threshold(3.0)
            .with_min_contour_len(4)
            .with_ground_mean_threshold(0.5);
        assert_eq!(config.edge_threshold, 3.0);
        assert_eq!(config.min_contour_len, 4);
        assert_eq!(config.ground_mean_threshold, 0.5);
        assert_eq!(config.pad_width, 2);
    }
}
