use super::*;
use nalgebra::vector;
use std::f64::consts::FRAC_PI_2;

fn irregular_pentagon() -> Polygon {
    Polygon::from_points(vec![
        vector![0.1, -0.4],
        vector![0.9, 0.2],
        vector![0.5, 1.1],
        vector![-0.3, 0.8],
        vector![-0.7, 0.1],
    ])
}

#[test]
fn orientation_is_positive_and_idempotent() {
    let mut poly = irregular_pentagon();
    // Feed it in clockwise order.
    poly.pts.reverse();
    correct_orientation(&mut poly.pts);
    assert!(signed_area(&poly.pts) > 0.0);
    let once = poly.clone();
    correct_orientation(&mut poly.pts);
    assert_eq!(poly, once);
    // Canonical first vertex: minimal y, maximal x on ties.
    for p in &poly.pts {
        assert!(p.y >= poly.pts[0].y);
    }
}

#[test]
fn normalize_yields_unit_diameter() {
    let cfg = GeomCfg::default();
    let mut poly = irregular_pentagon();
    normalize(&mut poly, &cfg);
    assert!((diameter(&poly.pts) - 1.0).abs() < 1e-9);
    assert!(signed_area(&poly.pts) > 0.0);
}

#[test]
fn normalize_is_idempotent() {
    let cfg = GeomCfg::default();
    let mut poly = irregular_pentagon();
    normalize(&mut poly, &cfg);
    let once = poly.clone();
    normalize(&mut poly, &cfg);
    for (p, q) in poly.pts.iter().zip(once.pts.iter()) {
        assert!((p - q).norm() < 1e-9);
    }
}

#[test]
fn normalize_triangle_centers_incircle_at_origin() {
    let cfg = GeomCfg::default();
    let mut poly = Polygon::from_points(vec![
        vector![0.0, 0.0],
        vector![4.0, 0.0],
        vector![1.0, 2.5],
    ]);
    normalize(&mut poly, &cfg);
    // Incircle center of the normalized triangle must be the origin: the
    // incircle radius equals the distance from the center to every edge.
    let pts = &poly.pts;
    let dist_to_edge = |i: usize| -> f64 {
        let a = pts[i];
        let b = pts[(i + 1) % 3];
        let e = b - a;
        (e.x * (-a.y) - e.y * (-a.x)).abs() / e.norm()
    };
    let d0 = dist_to_edge(0);
    assert!((dist_to_edge(1) - d0).abs() < 1e-9);
    assert!((dist_to_edge(2) - d0).abs() < 1e-9);
}

#[test]
fn degenerate_polygon_is_left_unscaled() {
    let cfg = GeomCfg::default();
    let mut pts = vec![vector![0.3, 0.3]; 4];
    standardize(&mut pts, &cfg);
    assert!(pts.iter().all(|p| (p - vector![0.3, 0.3]).norm() == 0.0));
}

#[test]
fn canonical_square_round_trip() {
    // Diameter is exactly 1 already; normalize must only re-index.
    let cfg = GeomCfg::default();
    let mut poly = Polygon::from_points(vec![
        vector![0.5, 0.0],
        vector![0.0, 0.5],
        vector![-0.5, 0.0],
        vector![0.0, -0.5],
    ]);
    normalize(&mut poly, &cfg);
    assert!((diameter(&poly.pts) - 1.0).abs() < 1e-12);
    let d = describe(&poly);
    let side = 0.5_f64.sqrt();
    for i in 0..4 {
        assert!((d.l[i] - side).abs() < 1e-9);
        assert!((d.phi[i] - FRAC_PI_2).abs() < 1e-9);
    }
}

#[test]
fn describe_matches_flat_layout_round_trip() {
    let poly = irregular_pentagon();
    let flat = poly.to_flat();
    let back = Polygon::from_flat(&flat);
    assert_eq!(poly, back);
}
