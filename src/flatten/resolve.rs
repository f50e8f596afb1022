//! Boundary resolver: assigns every pending edge cell a definite value.
//!
//! Contour strokes leave ambiguous borders between regions. Each `Edge`
//! cell is resolved from its neighborhood in raster order, in place, so a
//! resolved cell feeds into the neighborhoods examined after it.

use ndarray::{s, Array2, ArrayView2};
use thiserror::Error;
use tracing::warn;

use crate::filters::core::DepthSample;
use crate::flatten::aggregate::RegionStats;
use crate::flatten::labels::Cell;

/// Every neighbor of the cell is itself a pending edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no resolvable neighbor around cell ({row}, {col})")]
pub struct DegenerateNeighborhood {
    pub row: usize,
    pub col: usize,
}

/// Collect the neighborhood of a cell in raster order.
///
/// Corners use the 2x2 block anchored at the corner, border cells the three
/// cells along the border centered on them (both include the cell itself),
/// and interior cells the eight surrounding cells.
fn neighborhood(cells: ArrayView2<Cell>, row: usize, col: usize) -> Vec<Cell> {
    let (height, width) = cells.dim();
    let last_row = height - 1;
    let last_col = width - 1;
    let on_row_border = row == 0 || row == last_row;
    let on_col_border = col == 0 || col == last_col;

    let block = |rows: std::ops::Range<usize>, cols: std::ops::Range<usize>| -> Vec<Cell> {
        cells.slice(s![rows, cols]).iter().copied().collect()
    };

    if on_row_border && on_col_border {
        let rows = if row == 0 { 0..2 } else { height - 2..height };
        let cols = if col == 0 { 0..2 } else { width - 2..width };
        block(rows, cols)
    } else if on_row_border {
        block(row..row + 1, col - 1..col + 2)
    } else if on_col_border {
        block(row - 1..row + 2, col..col + 1)
    } else {
        let mut around = block(row - 1..row + 2, col - 1..col + 2);
        around.remove(4);
        around
    }
}

/// First region in scan order that occurs more than once.
///
/// An exact triple and any repeat both qualify, so whichever repeated
/// region is met first wins even when a later one occurs more often.
fn first_repeated_region(neighbors: &[Cell]) -> Option<Cell> {
    neighbors.iter().copied().find(|&candidate| {
        matches!(candidate, Cell::Region(_))
            && neighbors.iter().filter(|&&n| n == candidate).count() >= 2
    })
}

/// Resolve the cell at (`row`, `col`) from its current neighborhood.
///
/// Interior cells first try `first_repeated_region`; everything else falls
/// back to the largest non-edge neighbor (regions over background, later
/// regions over earlier ones).
///
/// # Errors
/// `DegenerateNeighborhood` when no non-edge neighbor exists.
pub fn get_surround(
    cells: ArrayView2<Cell>,
    row: usize,
    col: usize,
) -> Result<Cell, DegenerateNeighborhood> {
    let (height, width) = cells.dim();
    let neighbors = neighborhood(cells, row, col);

    let interior = row > 0 && col > 0 && row + 1 < height && col + 1 < width;
    if interior {
        if let Some(region) = first_repeated_region(&neighbors) {
            return Ok(region);
        }
    }

    neighbors
        .into_iter()
        .filter(|&c| c != Cell::Edge)
        .max()
        .ok_or(DegenerateNeighborhood { row, col })
}

/// Resolve every `Edge` cell and accumulate original depths per region.
///
/// A degenerate neighborhood resolves to `Background`.
///
/// # Returns
/// Number of cells that hit a degenerate neighborhood.
pub fn resolve_boundaries<T: DepthSample>(
    cells: &mut Array2<Cell>,
    original: ArrayView2<T>,
    stats: &mut RegionStats,
) -> usize {
    let (height, width) = cells.dim();
    let mut degenerate = 0;

    for row in 0..height {
        for col in 0..width {
            let mut cell = cells[[row, col]];
            if cell == Cell::Edge {
                cell = get_surround(cells.view(), row, col).unwrap_or_else(|err| {
                    warn!(row = err.row, col = err.col, "{err}; resolving to background");
                    degenerate += 1;
                    Cell::Background
                });
                cells[[row, col]] = cell;
            }
            if let Cell::Region(id) = cell {
                stats.add(id, original[[row, col]].to_u64());
            }
        }
    }

    degenerate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::labels::RegionId;
    use ndarray::array;

    const B: Cell = Cell::Background;
    const E: Cell = Cell::Edge;

    fn r(id: u32) -> Cell {
        Cell::Region(RegionId(id))
    }

    #[test]
    fn test_corner_takes_max_of_block() {
        let cells = array![[E, r(7), B], [r(7), B, B], [B, B, B]];
        assert_eq!(get_surround(cells.view(), 0, 0), Ok(r(7)));
    }

    #[test]
    fn test_bottom_right_corner() {
        let cells = array![[B, B, B], [B, r(1), r(2)], [B, E, E]];
        assert_eq!(get_surround(cells.view(), 2, 2), Ok(r(2)));
    }

    #[test]
    fn test_top_border_uses_horizontal_triple() {
        let cells = array![
            [B, B, E, r(4)],
            [r(9), r(9), r(9), r(9)],
            [B, B, B, B],
        ];
        // Row below is ignored on the border
        assert_eq!(get_surround(cells.view(), 0, 2), Ok(r(4)));
        assert_eq!(get_surround(cells.view(), 0, 1), Ok(B));
    }

    #[test]
    fn test_left_border_uses_vertical_triple() {
        let cells = array![[r(3), B, B], [E, r(5), r(5)], [B, r(5), B]];
        assert_eq!(get_surround(cells.view(), 1, 0), Ok(r(3)));
    }

    #[test]
    fn test_interior_triple_found_first_wins() {
        let cells = array![[r(1), r(2), r(1)], [r(2), E, r(2)], [B, r(1), B]];
        assert_eq!(get_surround(cells.view(), 1, 1), Ok(r(1)));
    }

    #[test]
    fn test_interior_pair_before_triple_wins() {
        let cells = array![[r(2), r(1), r(2)], [r(1), E, r(1)], [B, B, B]];
        assert_eq!(get_surround(cells.view(), 1, 1), Ok(r(2)));
    }

    #[test]
    fn test_interior_without_repeat_falls_back_to_max() {
        let cells = array![[r(1), r(2), B], [B, E, E], [B, r(3), B]];
        assert_eq!(get_surround(cells.view(), 1, 1), Ok(r(3)));
    }

    #[test]
    fn test_repeated_background_does_not_win() {
        let cells = array![[B, B, B], [B, E, r(0)], [B, B, B]];
        assert_eq!(get_surround(cells.view(), 1, 1), Ok(r(0)));
    }

    #[test]
    fn test_degenerate_neighborhood() {
        let cells = Array2::from_elem((3, 3), E);
        assert_eq!(
            get_surround(cells.view(), 0, 0),
            Err(DegenerateNeighborhood { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_resolve_leaves_no_edges_and_accumulates() {
        let mut cells = array![[r(0), E, r(0)], [r(0), E, r(0)], [B, B, B]];
        let original = array![[10u8, 12, 10], [11, 9, 10], [0, 0, 0]];
        let mut stats = RegionStats::new(1);

        let degenerate = resolve_boundaries(&mut cells, original.view(), &mut stats);

        assert_eq!(degenerate, 0);
        assert!(cells.iter().all(|&c| c != E));
        assert_eq!(cells[[0, 1]], r(0));
        assert_eq!(cells[[1, 1]], r(0));
        assert_eq!(stats.get(RegionId(0)).count, 6);
        assert_eq!(stats.get(RegionId(0)).sum, 62);
    }

    #[test]
    fn test_resolve_all_edges_falls_back_to_background() {
        let mut cells = Array2::from_elem((3, 3), E);
        let original = Array2::<u8>::zeros((3, 3));
        let mut stats = RegionStats::new(0);

        let degenerate = resolve_boundaries(&mut cells, original.view(), &mut stats);

        assert_eq!(degenerate, 1);
        assert!(cells.iter().all(|&c| c == B));
    }
}
