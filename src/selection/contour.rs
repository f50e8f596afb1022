//! Contour extraction from binary edge maps.
//!
//! Borders are traced with Suzuki-Abe border following (8-connectivity).
//! Both outer borders and hole borders are returned as one flat list; the
//! nesting is not recorded. Each border is compressed to the points where
//! the chain direction changes, so straight horizontal, vertical and
//! diagonal runs keep only their end points.

use ndarray::{Array2, ArrayView2};

/// An integer pixel coordinate (x = column, y = row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A closed border of a foreground region.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Polygon vertices in tracing order.
    pub points: Vec<Point>,
    /// True when the border separates a hole from its enclosing region.
    pub is_hole: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Chain code directions as (d_row, d_col), counterclockwise on screen from east.
const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),   // 0: E
    (-1, 1),  // 1: NE
    (-1, 0),  // 2: N
    (-1, -1), // 3: NW
    (0, -1),  // 4: W
    (1, -1),  // 5: SW
    (1, 0),   // 6: S
    (1, 1),   // 7: SE
];

/// Extract every border of the non-zero pixels of `mask`.
///
/// Pixels outside the map count as background. Contours come back in
/// extraction order: the most recently discovered border first, so the
/// first border met in a raster scan is the last element.
pub fn find_contours(mask: ArrayView2<u8>) -> Vec<Contour> {
    let (height, width) = mask.dim();
    if height == 0 || width == 0 {
        return Vec::new();
    }

    // Working labels with a one-pixel zero frame:
    // 0 = background, 1 = unvisited foreground, n > 1 = traced by border n,
    // -n = traced by border n with a background pixel to its east.
    let mut f = Array2::<i32>::zeros((height + 2, width + 2));
    for ((y, x), &v) in mask.indexed_iter() {
        if v != 0 {
            f[[y + 1, x + 1]] = 1;
        }
    }

    let mut contours = Vec::new();
    let mut nbd = 1i32;

    for i in 1..=height {
        for j in 1..=width {
            let here = f[[i, j]];
            let (is_hole, from) = if here == 1 && f[[i, j - 1]] == 0 {
                (false, (i, j - 1))
            } else if here >= 1 && f[[i, j + 1]] == 0 {
                (true, (i, j + 1))
            } else {
                continue;
            };

            nbd += 1;
            let chain = trace_border(&mut f, (i, j), from, nbd);
            contours.push(Contour {
                points: compress_chain(&chain),
                is_hole,
            });
        }
    }

    contours.reverse();
    contours
}

/// Direction index of the step from `from` to its 8-neighbor `to`.
#[inline]
fn direction_between(from: (usize, usize), to: (usize, usize)) -> usize {
    let dr = to.0 as isize - from.0 as isize;
    let dc = to.1 as isize - from.1 as isize;
    DIRECTIONS
        .iter()
        .position(|&d| d == (dr, dc))
        .unwrap_or(0)
}

#[inline]
fn step(p: (usize, usize), dir: usize) -> (usize, usize) {
    let (dr, dc) = DIRECTIONS[dir];
    ((p.0 as isize + dr) as usize, (p.1 as isize + dc) as usize)
}

/// Follow one border starting at `start`, whose background neighbor is `from`.
///
/// Marks the traced pixels in `f` with `nbd` and returns the full pixel
/// chain in framed coordinates.
fn trace_border(
    f: &mut Array2<i32>,
    start: (usize, usize),
    from: (usize, usize),
    nbd: i32,
) -> Vec<(usize, usize)> {
    // Clockwise search from the background neighbor for the first foreground pixel
    let from_dir = direction_between(start, from);
    let first = (0..8)
        .map(|k| (from_dir + 8 - k) % 8)
        .map(|dir| step(start, dir))
        .find(|&p| f[p] != 0);

    let Some(first) = first else {
        // Isolated pixel
        f[start] = -nbd;
        return vec![start];
    };

    let mut chain = Vec::new();
    let mut prev = first;
    let mut current = start;

    loop {
        chain.push(current);

        // Counterclockwise search starting just after the previous pixel
        let back_dir = direction_between(current, prev);
        let mut east_is_background = false;
        let mut next = prev;
        for k in 1..=8 {
            let dir = (back_dir + k) % 8;
            let candidate = step(current, dir);
            if f[candidate] != 0 {
                next = candidate;
                break;
            }
            if dir == 0 {
                east_is_background = true;
            }
        }

        if east_is_background {
            f[current] = -nbd;
        } else if f[current] == 1 {
            f[current] = nbd;
        }

        if next == start && current == first {
            break;
        }
        prev = current;
        current = next;
    }

    chain
}

/// Keep only the chain points where the step direction changes.
///
/// The chain is cyclic: the first point is compared against the step that
/// closes the loop.
fn compress_chain(chain: &[(usize, usize)]) -> Vec<Point> {
    let to_point = |p: &(usize, usize)| Point::new(p.1 as i32 - 1, p.0 as i32 - 1);

    if chain.len() < 3 {
        return chain.iter().map(to_point).collect();
    }

    let n = chain.len();
    (0..n)
        .filter(|&k| {
            let incoming = direction_between(chain[(k + n - 1) % n], chain[k]);
            let outgoing = direction_between(chain[k], chain[(k + 1) % n]);
            incoming != outgoing
        })
        .map(|k| to_point(&chain[k]))
        .collect()
}

/// Extract contours and drop those with fewer than `min_len` points.
pub fn extract_contours(mask: ArrayView2<u8>, min_len: usize) -> Vec<Contour> {
    find_contours(mask)
        .into_iter()
        .filter(|c| c.len() >= min_len)
        .collect()
}
