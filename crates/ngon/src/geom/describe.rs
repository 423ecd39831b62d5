//! Edge-sequence description: coordinate deltas, lengths, turning angles.

use std::f64::consts::PI;

use nalgebra::Vector2;

use super::types::Polygon;
use super::util::decmod;

/// Per-edge description of an oriented polygon.
///
/// `l[i]` is the length of the edge from vertex i to vertex i+1 (mod n);
/// `phi[i]` is the signed exterior turning angle at vertex i, in radians,
/// positive for a counter-clockwise turn. The arrays describe the polygon
/// they were computed from; mutating the polygon afterwards without
/// re-describing leaves them stale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeDescriptors {
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
    pub l: Vec<f64>,
    pub phi: Vec<f64>,
}

impl EdgeDescriptors {
    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.l.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.l.is_empty()
    }

    /// Turning angles divided by π, the unit the fingerprint pipeline uses.
    pub fn angles_in_pi_units(&self) -> Vec<f64> {
        self.phi.iter().map(|a| a / PI).collect()
    }
}

/// Describe each edge of an already-oriented polygon.
///
/// The turning angle at vertex i is the angle between the incoming edge
/// (i-1 → i) and the outgoing edge (i → i+1), computed as the arctangent of
/// their cross and dot products. Does not normalize or re-orient; callers
/// run `normalize` first when they want canonical descriptors.
pub fn describe(poly: &Polygon) -> EdgeDescriptors {
    let n = poly.len();
    let mut d = EdgeDescriptors {
        dx: vec![0.0; n],
        dy: vec![0.0; n],
        l: vec![0.0; n],
        phi: vec![0.0; n],
    };
    if n == 0 {
        return d;
    }
    let edge = |i: usize| -> Vector2<f64> { poly.pts[(i + 1) % n] - poly.pts[i] };
    for i in 0..n {
        let e = edge(i);
        d.dx[i] = e.x;
        d.dy[i] = e.y;
        d.l[i] = e.norm();
    }
    for i in 0..n {
        let inc = edge(decmod(i, n));
        let out = edge(i);
        let cross = inc.x * out.y - inc.y * out.x;
        let dot = inc.dot(&out);
        d.phi[i] = cross.atan2(dot);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn unit_square_turns_left_by_right_angles() {
        let poly = Polygon::from_points(vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]);
        let d = describe(&poly);
        for i in 0..4 {
            assert!((d.l[i] - 1.0).abs() < 1e-12);
            assert!((d.phi[i] - FRAC_PI_2).abs() < 1e-12);
        }
        let units = d.angles_in_pi_units();
        assert!(units.iter().all(|u| (u - 0.5).abs() < 1e-12));
    }

    #[test]
    fn clockwise_traversal_turns_negative() {
        let poly = Polygon::from_points(vec![
            vector![0.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
            vector![1.0, 0.0],
        ]);
        let d = describe(&poly);
        assert!(d.phi.iter().all(|&a| (a + FRAC_PI_2).abs() < 1e-12));
    }
}
