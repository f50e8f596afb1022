//! Region labeler: turns the binary edge map into a map of tagged cells.
//!
//! Every contour except the last one in extraction order gets a fresh
//! region id; its outline is stroked and its interior filled with that id
//! in the padded working grid. Later contours overwrite earlier ones.

use ndarray::{s, Array2, ArrayView2};

use crate::selection::contour::Contour;
use crate::selection::raster::{fill_polygon, stroke_closed};

/// Zero-based index of a filled contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u32);

impl RegionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One cell of the labeled map.
///
/// The variant order is significant: the boundary resolver's fallback picks
/// the maximum, and regions must outrank background (later regions outrank
/// earlier ones).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// No edge and not inside any labeled contour.
    Background,
    /// Inside or on the outline of a labeled contour.
    Region(RegionId),
    /// Edge pixel awaiting resolution.
    Edge,
}

impl Cell {
    /// The raw label value this cell stands for in an image whose maximum
    /// depth is `max_depth`: 0 for background, 255 for a pending edge and
    /// `max_depth + 1 + id` for a region.
    pub fn label_value(self, max_depth: u64) -> u64 {
        match self {
            Cell::Background => 0,
            Cell::Edge => 255,
            Cell::Region(id) => max_depth + 1 + id.0 as u64,
        }
    }
}

/// Labeled map of the unpadded image plus the number of regions it holds.
#[derive(Clone, Debug)]
pub struct LabeledMap {
    cells: Array2<Cell>,
    region_count: usize,
}

impl LabeledMap {
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn cells_mut(&mut self) -> &mut Array2<Cell> {
        &mut self.cells
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }

    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }
}

/// Label the padded edge map with one region per contour, skipping the last.
///
/// # Arguments
/// * `edges` - Padded binary edge map (0 / non-zero)
/// * `contours` - Contours in extraction order, in padded coordinates
/// * `pad` - Padding width to strip from the result
pub fn label_regions(edges: ArrayView2<u8>, contours: &[Contour], pad: usize) -> LabeledMap {
    let mut grid = edges.mapv(|v| if v == 0 { Cell::Background } else { Cell::Edge });

    let labeled = &contours[..contours.len().saturating_sub(1)];
    for (index, contour) in labeled.iter().enumerate() {
        let cell = Cell::Region(RegionId(index as u32));
        stroke_closed(&mut grid, &contour.points, cell);
        fill_polygon(&mut grid, &contour.points, cell);
    }

    let (height, width) = grid.dim();
    let cells = grid
        .slice(s![pad..height - pad, pad..width - pad])
        .to_owned();

    LabeledMap {
        cells,
        region_count: labeled.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::contour::Point;

    fn square(lo: i32, hi: i32) -> Contour {
        Contour {
            points: vec![
                Point::new(lo, lo),
                Point::new(lo, hi),
                Point::new(hi, hi),
                Point::new(hi, lo),
            ],
            is_hole: false,
        }
    }

    #[test]
    fn test_last_contour_is_not_labeled() {
        let edges = Array2::<u8>::zeros((12, 12));
        let contours = vec![square(3, 8), square(0, 11)];

        let labeled = label_regions(edges.view(), &contours, 2);

        assert_eq!(labeled.region_count(), 1);
        assert_eq!(labeled.dim(), (8, 8));
        // Padded (5, 5) is inside the first square
        assert_eq!(labeled.cells()[[3, 3]], Cell::Region(RegionId(0)));
        // Padded (2, 2) lies outside the stroke of the first square
        assert_eq!(labeled.cells()[[0, 0]], Cell::Background);
    }

    #[test]
    fn test_single_contour_labels_nothing() {
        let mut edges = Array2::<u8>::zeros((9, 9));
        edges[[4, 4]] = 255;
        let labeled = label_regions(edges.view(), &[square(2, 6)], 2);

        assert_eq!(labeled.region_count(), 0);
        assert_eq!(labeled.cells()[[2, 2]], Cell::Edge);
        assert!(labeled
            .cells()
            .iter()
            .all(|c| matches!(c, Cell::Background | Cell::Edge)));
    }

    #[test]
    fn test_later_contours_overwrite_and_labels_exceed_max() {
        let edges = Array2::<u8>::zeros((14, 14));
        let contours = vec![square(2, 11), square(5, 8), square(0, 13)];
        let max_depth = 254;

        let labeled = label_regions(edges.view(), &contours, 2);

        assert_eq!(labeled.region_count(), 2);
        // Center belongs to the inner (later) square
        assert_eq!(labeled.cells()[[4, 4]], Cell::Region(RegionId(1)));
        // Between the squares keeps the first id
        assert_eq!(labeled.cells()[[1, 1]], Cell::Region(RegionId(0)));

        let mut values: Vec<u64> = (0..2)
            .map(|i| Cell::Region(RegionId(i)).label_value(max_depth))
            .collect();
        assert!(values.iter().all(|&v| v > max_depth));
        values.dedup();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_cell_order_ranks_regions_above_background() {
        assert!(Cell::Background < Cell::Region(RegionId(0)));
        assert!(Cell::Region(RegionId(0)) < Cell::Region(RegionId(3)));
    }
}
