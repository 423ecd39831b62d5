//! Basic polygon types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons for coincidence, collinearity/crossing,
//!   and degenerate-diameter checks.
//! - `Polygon`: owned vertex cycle, the unit of work of the whole pipeline.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two vertices closer than this coincide.
    pub eps_point: f64,
    /// Cross products smaller than this in magnitude count as collinear;
    /// segment crossings must exceed it to count as proper.
    pub eps_cross: f64,
    /// Diameters below this are degenerate; standardization leaves them be.
    pub eps_diam: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_point: 1e-12,
            eps_cross: 1e-12,
            eps_diam: 1e-12,
        }
    }
}

/// Closed vertex cycle in R² (vertex n-1 adjacent to vertex 0).
///
/// Invariants while "valid":
/// - at least 3 vertices, no two adjacent vertices coincident;
/// - no two non-adjacent edges cross (simple polygon).
/// The buffer is exclusively owned; validity is (re-)established by
/// `simplify_check`, not assumed on construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub pts: Vec<Vector2<f64>>,
}

impl Polygon {
    #[inline]
    pub fn new() -> Self {
        Self { pts: Vec::new() }
    }

    #[inline]
    pub fn from_points(pts: Vec<Vector2<f64>>) -> Self {
        Self { pts }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Build from a flat `[x_0, y_0, x_1, y_1, ...]` coordinate buffer.
    /// A trailing odd coordinate is dropped.
    pub fn from_flat(coords: &[f64]) -> Self {
        let pts = coords
            .chunks_exact(2)
            .map(|c| Vector2::new(c[0], c[1]))
            .collect();
        Self { pts }
    }

    /// Flatten back into `[x_0, y_0, x_1, y_1, ...]` order.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.pts.len() * 2);
        for p in &self.pts {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }
}
