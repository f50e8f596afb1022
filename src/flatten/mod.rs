//! Depth-image flattening pipeline.
//!
//! Regions of a depth/height image that are enclosed by strong edges are
//! replaced by their mean depth, and an empty-looking background is forced
//! to zero. The pipeline runs five stages in sequence:
//!
//! 1. **Edge map**: pad, Sobel magnitude, binarize (`filters::edge`)
//! 2. **Contours**: border following, short contours dropped (`selection::contour`)
//! 3. **Labels**: stroke and fill every contour but the last (`labels`)
//! 4. **Resolution**: pending edge cells take a neighbor's value (`resolve`)
//! 5. **Aggregation**: region means, ground suppression (`aggregate`)
//!
//! Each call allocates its own working grids and keeps no state.

pub mod aggregate;
pub mod labels;
pub mod resolve;

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use crate::config::FlattenConfig;
use crate::error::FlattenError;
use crate::filters::core::{max_value, DepthSample};
use crate::filters::edge::build_edge_map;
use crate::selection::contour::extract_contours;

pub use aggregate::{RegionAccumulator, RegionStats};
pub use labels::{Cell, LabeledMap, RegionId};
pub use resolve::{get_surround, DegenerateNeighborhood};

/// Smallest supported side length; the resolver needs a 3x3 neighborhood.
pub const MIN_SIDE: usize = 3;

/// What a flattening call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Contours that survived the length filter.
    pub contours: usize,
    /// Regions labeled (one fewer than the contours, or none).
    pub regions: usize,
    /// Edge cells with no resolvable neighbor, forced to background.
    pub degenerate_cells: usize,
    /// Whether the background was zeroed.
    pub ground_suppressed: bool,
}

/// A flattened image together with its report.
#[derive(Debug, Clone)]
pub struct Flattened<T> {
    pub image: Array2<T>,
    pub report: FlattenReport,
}

/// Flatten a depth image with the default configuration.
///
/// # Errors
/// `FlattenError::InvalidInputShape` for images smaller than 3x3.
pub fn flatten<T: DepthSample>(image: ArrayView2<T>) -> Result<Array2<T>, FlattenError> {
    flatten_with(image, &FlattenConfig::default()).map(|flattened| flattened.image)
}

/// Flatten a depth image.
///
/// When no contour survives extraction the input is returned unchanged.
///
/// # Arguments
/// * `image` - Depth image (height, width), 0 = unknown
/// * `config` - Pipeline parameters
///
/// # Errors
/// `FlattenError::InvalidInputShape` for images smaller than 3x3.
pub fn flatten_with<T: DepthSample>(
    image: ArrayView2<T>,
    config: &FlattenConfig,
) -> Result<Flattened<T>, FlattenError> {
    let (height, width) = image.dim();
    if height < MIN_SIDE || width < MIN_SIDE {
        return Err(FlattenError::InvalidInputShape { height, width });
    }

    let max_depth = max_value(image);
    let edges = build_edge_map(image, config);
    let contours = extract_contours(edges.view(), config.min_contour_len);
    debug!(height, width, max_depth, contours = contours.len(), "extracted contours");

    if contours.is_empty() {
        return Ok(Flattened {
            image: image.to_owned(),
            report: FlattenReport::default(),
        });
    }

    let mut labeled = labels::label_regions(edges.view(), &contours, config.pad_width);
    if let Some(last) = labeled.region_count().checked_sub(1) {
        debug!(
            first_label = Cell::Region(RegionId(0)).label_value(max_depth),
            last_label = Cell::Region(RegionId(last as u32)).label_value(max_depth),
            "labeled regions"
        );
    }
    let mut stats = RegionStats::new(labeled.region_count());
    let degenerate_cells = resolve::resolve_boundaries(labeled.cells_mut(), image, &mut stats);

    let mut output = image.to_owned();
    aggregate::apply_region_means(&mut output, labeled.cells(), &stats.means());
    let ground_suppressed = aggregate::suppress_ground(
        &mut output,
        image,
        labeled.cells(),
        config.ground_mean_threshold,
    );

    let report = FlattenReport {
        contours: contours.len(),
        regions: labeled.region_count(),
        degenerate_cells,
        ground_suppressed,
    };
    debug!(?report, "flattened image");

    Ok(Flattened { image: output, report })
}

/// Flatten independent images in parallel. Results keep the input order.
pub fn flatten_batch<T: DepthSample>(images: &[Array2<T>]) -> Vec<Result<Array2<T>, FlattenError>> {
    images.par_iter().map(|image| flatten(image.view())).collect()
}
