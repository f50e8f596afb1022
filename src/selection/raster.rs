//! Polygon rasterization into label grids.
//!
//! Used by the region labeler to paint a contour's outline and interior
//! with one region value. Both operations clip to the grid.

use ndarray::Array2;

use crate::selection::contour::Point;

/// Offsets of the radius-1 brush used for the 2-pixel stroke.
const BRUSH: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
fn put<T: Copy>(grid: &mut Array2<T>, x: i32, y: i32, value: T) {
    let (height, width) = grid.dim();
    if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
        grid[[y as usize, x as usize]] = value;
    }
}

/// Visit every pixel of the Bresenham line from `a` to `b`, end points included.
fn for_each_line_pixel(a: Point, b: Point, mut visit: impl FnMut(i32, i32)) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);

    loop {
        visit(x, y);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw the closed outline through `points` with a 2-pixel stroke.
pub fn stroke_closed<T: Copy>(grid: &mut Array2<T>, points: &[Point], value: T) {
    let n = points.len();
    if n == 0 {
        return;
    }

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        for_each_line_pixel(a, b, |x, y| {
            for (bx, by) in BRUSH {
                put(grid, x + bx, y + by, value);
            }
        });
    }
}

/// Fill the polygon interior using an even-odd scanline rule at pixel centers.
///
/// Pixels exactly on the outline may be left out; pair with
/// `stroke_closed` to cover them.
pub fn fill_polygon<T: Copy>(grid: &mut Array2<T>, points: &[Point], value: T) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    let n = points.len();
    let mut crossings: Vec<f64> = Vec::with_capacity(n);

    for y in min_y..=max_y {
        crossings.clear();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            // Half-open on y so shared vertices are counted once
            if (a.y <= y && y < b.y) || (b.y <= y && y < a.y) {
                let t = (y - a.y) as f64 / (b.y - a.y) as f64;
                crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
            }
        }
        crossings.sort_by(|l, r| l.total_cmp(r));

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil() as i32;
            let end = pair[1].floor() as i32;
            for x in start..=end {
                put(grid, x, y, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(2, 2),
            Point::new(2, 6),
            Point::new(6, 6),
            Point::new(6, 2),
        ]
    }

    #[test]
    fn test_fill_square_interior() {
        let mut grid = Array2::<u8>::zeros((10, 10));
        fill_polygon(&mut grid, &square(), 9);

        assert_eq!(grid[[4, 4]], 9);
        assert_eq!(grid[[3, 5]], 9);
        assert_eq!(grid[[0, 0]], 0);
        assert_eq!(grid[[8, 8]], 0);
    }

    #[test]
    fn test_stroke_covers_outline_and_brush() {
        let mut grid = Array2::<u8>::zeros((10, 10));
        stroke_closed(&mut grid, &square(), 7);

        // Outline
        for i in 2..=6 {
            assert_eq!(grid[[2, i]], 7);
            assert_eq!(grid[[6, i]], 7);
            assert_eq!(grid[[i, 2]], 7);
            assert_eq!(grid[[i, 6]], 7);
        }
        // Brush reaches one pixel outside
        assert_eq!(grid[[1, 4]], 7);
        assert_eq!(grid[[4, 7]], 7);
        // Interior and diagonal corner untouched
        assert_eq!(grid[[4, 4]], 0);
        assert_eq!(grid[[1, 1]], 0);
    }

    #[test]
    fn test_stroke_clips_at_grid_border() {
        let mut grid = Array2::<u8>::zeros((4, 4));
        let pts = vec![Point::new(0, 0), Point::new(3, 0), Point::new(3, 3)];
        stroke_closed(&mut grid, &pts, 1);
        assert_eq!(grid[[0, 0]], 1);
        assert_eq!(grid[[3, 3]], 1);
    }

    #[test]
    fn test_bresenham_diagonal() {
        let mut visited = Vec::new();
        for_each_line_pixel(Point::new(0, 0), Point::new(3, 3), |x, y| visited.push((x, y)));
        assert_eq!(visited, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }
}
