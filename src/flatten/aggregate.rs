//! Region averaging and ground suppression.

use ndarray::{Array2, ArrayView2, Zip};

use crate::filters::core::DepthSample;
use crate::flatten::labels::{Cell, RegionId};

/// Running sum and count of original depths under one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionAccumulator {
    pub sum: u64,
    pub count: u64,
}

impl RegionAccumulator {
    /// Truncated mean, or None when no cell contributed.
    pub fn mean(&self) -> Option<u64> {
        (self.count > 0).then(|| self.sum / self.count)
    }
}

/// Per-region accumulators indexed by `RegionId`.
#[derive(Debug, Clone, Default)]
pub struct RegionStats {
    regions: Vec<RegionAccumulator>,
}

impl RegionStats {
    pub fn new(region_count: usize) -> Self {
        Self {
            regions: vec![RegionAccumulator::default(); region_count],
        }
    }

    pub fn add(&mut self, id: RegionId, value: u64) {
        if let Some(acc) = self.regions.get_mut(id.index()) {
            acc.sum += value;
            acc.count += 1;
        }
    }

    pub fn get(&self, id: RegionId) -> RegionAccumulator {
        self.regions.get(id.index()).copied().unwrap_or_default()
    }

    /// Mean per region; regions nothing fell into report 0.
    pub fn means(&self) -> Vec<u64> {
        self.regions.iter().map(|acc| acc.mean().unwrap_or(0)).collect()
    }
}

/// Replace every region cell of `output` with its region's mean.
pub fn apply_region_means<T: DepthSample>(
    output: &mut Array2<T>,
    cells: ArrayView2<Cell>,
    means: &[u64],
) {
    Zip::from(output).and(cells).for_each(|out, &cell| {
        if let Cell::Region(id) = cell {
            if let Some(&mean) = means.get(id.index()) {
                *out = T::from_mean(mean);
            }
        }
    });
}

/// Mean original depth over background cells, None if there are none.
pub fn background_mean<T: DepthSample>(
    original: ArrayView2<T>,
    cells: ArrayView2<Cell>,
) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    Zip::from(original).and(cells).for_each(|&value, &cell| {
        if cell == Cell::Background {
            sum += value.to_f64();
            count += 1;
        }
    });
    (count > 0).then(|| sum / count as f64)
}

/// Zero background cells of `output` when the background reads as no signal.
///
/// # Returns
/// True when the background mean was at or below `threshold` and the
/// background was zeroed.
pub fn suppress_ground<T: DepthSample>(
    output: &mut Array2<T>,
    original: ArrayView2<T>,
    cells: ArrayView2<Cell>,
    threshold: f64,
) -> bool {
    match background_mean(original, cells) {
        Some(mean) if mean <= threshold => {
            Zip::from(output).and(cells).for_each(|out, &cell| {
                if cell == Cell::Background {
                    *out = T::default();
                }
            });
            true
        }
        _ => false,
    }
}
