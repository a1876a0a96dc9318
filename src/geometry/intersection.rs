//! Self-intersection detection for closed polygons
//!
//! Every pair of non-adjacent edges is tested, so the cost is O(n²) in the
//! vertex count. Hand-drawn shapes have tens of vertices; there is no
//! spatial index for larger inputs.

use crate::domain::Point;

/// Check whether any two non-adjacent edges of a closed polygon cross
///
/// Edge `i` runs from `points[i]` to `points[(i + 1) % n]`. Polygons with
/// fewer than 4 vertices have no non-adjacent edge pairs and are never
/// self-intersecting.
pub fn is_polygon_self_intersecting(points: &[Point]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        let a1 = points[i];
        let a2 = points[(i + 1) % n];

        // j == i + 1 shares a vertex with i and is skipped by the range start.
        for j in (i + 2)..n {
            // Closing edge shares points[0] with edge 0
            if j == (i + n - 1) % n {
                continue;
            }

            let b1 = points[j];
            let b2 = points[(j + 1) % n];

            if segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }

    false
}

/// Parametric segment test for `p1-p2` against `p3-p4`
///
/// Segments with a zero denominator (parallel, including collinear overlap)
/// are reported as not intersecting. Otherwise both parameters must lie in
/// the closed range `[0, 1]`, so touching at an endpoint counts.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);

    if denominator == 0.0 {
        return false;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;

    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}
