//! Canonical placement: orientation, centering, unit-diameter scaling.
//!
//! `normalize` composes the three in-place passes in the order orientation →
//! centralize → standardize. Scaling happens about the origin, so centering
//! first keeps the chosen center pinned there and the composition is
//! idempotent up to floating error.

use nalgebra::Vector2;

use super::types::{GeomCfg, Polygon};
use super::util::incmod;

/// Signed area of the vertex cycle (shoelace sum). Positive for
/// counter-clockwise traversal.
pub fn signed_area(pts: &[Vector2<f64>]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    0.5 * a
}

/// Make the traversal counter-clockwise and start it at the canonical vertex.
///
/// The canonical first vertex is the one with minimal y-coordinate, ties
/// broken by maximal x-coordinate. Applying the function twice is the same
/// as applying it once.
pub fn correct_orientation(pts: &mut [Vector2<f64>]) {
    if pts.len() < 3 {
        return;
    }
    if signed_area(pts) < 0.0 {
        pts.reverse();
    }
    let mut first = 0;
    for (i, p) in pts.iter().enumerate() {
        let best = pts[first];
        if p.y < best.y || (p.y == best.y && p.x > best.x) {
            first = i;
        }
    }
    pts.rotate_left(first);
}

/// Area centroid of a counter-clockwise vertex cycle; falls back to the
/// vertex mean when the enclosed area degenerates.
fn area_centroid(pts: &[Vector2<f64>]) -> Vector2<f64> {
    let n = pts.len();
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        let w = p.x * q.y - q.x * p.y;
        a += w;
        cx += (p.x + q.x) * w;
        cy += (p.y + q.y) * w;
    }
    a *= 0.5;
    if a.abs() < 1e-18 {
        let sum = pts.iter().fold(Vector2::zeros(), |acc, p| acc + p);
        return sum / (n.max(1) as f64);
    }
    Vector2::new(cx / (6.0 * a), cy / (6.0 * a))
}

/// Incircle center of a triangle: vertices weighted by the length of the
/// opposite edge. With edge i running from vertex i to vertex i+1, the edge
/// opposite vertex i is edge i+1.
fn incircle_center(pts: &[Vector2<f64>]) -> Vector2<f64> {
    let l: Vec<f64> = (0..3)
        .map(|i| (pts[incmod(i, 3)] - pts[i]).norm())
        .collect();
    let perimeter: f64 = l.iter().sum();
    if perimeter <= 0.0 {
        return pts[0];
    }
    let mut c = Vector2::zeros();
    for i in 0..3 {
        c += pts[i] * l[incmod(i, 3)];
    }
    c / perimeter
}

/// Translate the polygon so its reference center sits at the origin.
///
/// Triangles center on the incircle, everything else on the area centroid.
pub fn centralize(pts: &mut [Vector2<f64>]) {
    if pts.is_empty() {
        return;
    }
    let c = if pts.len() == 3 {
        incircle_center(pts)
    } else {
        area_centroid(pts)
    };
    for p in pts.iter_mut() {
        *p -= c;
    }
}

/// Maximum pairwise vertex distance.
pub fn diameter(pts: &[Vector2<f64>]) -> f64 {
    let mut d = 0.0;
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            let dij = (pts[j] - pts[i]).norm();
            if dij > d {
                d = dij;
            }
        }
    }
    d
}

/// Scale uniformly about the origin so the diameter becomes 1.
///
/// A degenerate polygon (diameter below `cfg.eps_diam`) is left unchanged
/// rather than divided by zero.
pub fn standardize(pts: &mut [Vector2<f64>], cfg: &GeomCfg) {
    let d = diameter(pts);
    if d <= cfg.eps_diam {
        return;
    }
    let s = 1.0 / d;
    for p in pts.iter_mut() {
        *p *= s;
    }
}

/// Full canonicalization: orient, center, scale to unit diameter.
pub fn normalize(poly: &mut Polygon, cfg: &GeomCfg) {
    correct_orientation(&mut poly.pts);
    centralize(&mut poly.pts);
    standardize(&mut poly.pts, cfg);
}
