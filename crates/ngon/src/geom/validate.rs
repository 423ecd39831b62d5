//! Validity checking and in-place simplification of vertex cycles.
//!
//! `check` is the non-mutating simplicity predicate used on accepted or
//! externally supplied polygons; `simplify` strips degenerate structure
//! (coincident vertices, collinear runs, spikes) until a fixpoint;
//! `simplify_check` composes the two. Callers decide acceptance by comparing
//! the post-simplification vertex count against the count they asked for;
//! a legitimate simplification below the requested n is not an error here.
//!
//! The crossing test is the classical sign-of-cross-product segment
//! predicate over all pairs of non-adjacent edges. O(n²) is fine at fixture
//! sizes; a sweep would only pay off far beyond them.

use nalgebra::Vector2;

use super::types::GeomCfg;
use super::util::cross;

/// Proper crossing between segments `a`-`b` and `c`-`d`.
///
/// Endpoints straddling strictly on both segments; touching within
/// `cfg.eps_cross` does not count as a crossing.
fn segments_cross(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
    cfg: &GeomCfg,
) -> bool {
    let abc = cross(a, b, c);
    let abd = cross(a, b, d);
    let cda = cross(c, d, a);
    let cdb = cross(c, d, b);
    abc * abd < -cfg.eps_cross && cda * cdb < -cfg.eps_cross
}

/// Non-mutating simplicity check.
///
/// Reports whether `pts` forms a simple polygon: at least 3 vertices, no
/// coincident adjacent vertices, no proper crossing between non-adjacent
/// edges. Degenerate inputs (fewer than 3 vertices) report false without
/// fault.
pub fn check(pts: &[Vector2<f64>], cfg: &GeomCfg) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let j = (i + 1) % n;
        if (pts[j] - pts[i]).norm() <= cfg.eps_point {
            return false;
        }
    }
    for i in 0..n {
        let j = (i + 1) % n;
        for k in (i + 2)..n {
            let l = (k + 1) % n;
            // Adjacent at the wraparound (edge n-1→0 shares vertex 0 with
            // edge 0→1).
            if l == i {
                continue;
            }
            if segments_cross(pts[i], pts[j], pts[k], pts[l], cfg) {
                return false;
            }
        }
    }
    true
}

/// Remove degenerate structure in place until nothing changes.
///
/// Strips coincident consecutive vertices, then middle vertices of collinear
/// triples (both straight-through runs and zero-area spikes). Each removal
/// can expose a new degeneracy at the seam, hence the fixpoint loop; the
/// loop terminates because every pass removes at least one vertex. The new
/// vertex count is the vector's length on return.
pub fn simplify(pts: &mut Vec<Vector2<f64>>, cfg: &GeomCfg) {
    loop {
        let before = pts.len();
        drop_coincident(pts, cfg);
        drop_collinear(pts, cfg);
        if pts.len() == before || pts.len() < 3 {
            break;
        }
    }
}

fn drop_coincident(pts: &mut Vec<Vector2<f64>>, cfg: &GeomCfg) {
    let mut i = 0;
    while pts.len() >= 2 && i < pts.len() {
        let j = (i + 1) % pts.len();
        if (pts[j] - pts[i]).norm() <= cfg.eps_point {
            pts.remove(j);
        } else {
            i += 1;
        }
    }
}

fn drop_collinear(pts: &mut Vec<Vector2<f64>>, cfg: &GeomCfg) {
    let mut i = 0;
    while pts.len() >= 3 && i < pts.len() {
        let n = pts.len();
        let prev = pts[(i + n - 1) % n];
        let next = pts[(i + 1) % n];
        if cross(prev, pts[i], next).abs() <= cfg.eps_cross {
            pts.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Simplify in place, then report simplicity of what is left.
///
/// Returns true iff the simplified cycle is a simple polygon. Callers that
/// wanted exactly n vertices must additionally compare `pts.len()` against n
/// after the call.
pub fn simplify_check(pts: &mut Vec<Vector2<f64>>, cfg: &GeomCfg) -> bool {
    simplify(pts, cfg);
    check(pts, cfg)
}
