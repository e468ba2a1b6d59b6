use super::*;
use nalgebra::vector;
use proptest::prelude::*;

fn unit_square() -> PointSet {
    PointSet::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
}

fn ring_area(ring: &[Point2]) -> f64 {
    0.5 * (0..ring.len())
        .map(|i| {
            let p = ring[i];
            let q = ring[(i + 1) % ring.len()];
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
}

#[test]
fn unit_square_end_to_end() {
    let cfg = MbgCfg::default();
    let pts = unit_square();

    match compute(&GeometryRequest::new(pts.clone(), GeomKind::RectangleArea), &cfg).unwrap() {
        BoundingGeometry::Rectangle(r) => {
            assert!((r.area - 1.0).abs() < 1e-12);
            assert!((r.width - 1.0).abs() < 1e-12 && (r.height - 1.0).abs() < 1e-12);
            let rem = r.angle_degrees().rem_euclid(90.0);
            assert!(rem < 1e-9 || (90.0 - rem) < 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }

    match compute(&GeometryRequest::new(pts.clone(), GeomKind::Circle), &cfg).unwrap() {
        BoundingGeometry::Circle { center, radius } => {
            assert!((center - vector![0.5, 0.5]).norm() < 1e-12);
            assert!((radius - 0.70710678).abs() < 1e-6);
        }
        other => panic!("unexpected {other:?}"),
    }

    match compute(&GeometryRequest::new(pts, GeomKind::Ellipse), &cfg).unwrap() {
        BoundingGeometry::Ellipse {
            center,
            major,
            minor,
            ..
        } => {
            assert!((center - vector![0.5, 0.5]).norm() < 1e-6);
            assert!((major - minor).abs() < 1e-6);
            assert!((major - 0.70710678).abs() < 1e-2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn hull_and_envelope_bypass_solvers() {
    let cfg = MbgCfg::default();
    let pts = PointSet::from_xy(&[(0.0, 0.0), (4.0, 1.0), (1.0, 3.0), (1.5, 1.5)]).unwrap();

    let hull = compute(&GeometryRequest::new(pts.clone(), GeomKind::ConvexHull), &cfg).unwrap();
    assert_eq!(hull.kind(), GeomKind::ConvexHull);
    let ring = hull.polygon(cfg.render_tolerance).unwrap();
    assert_eq!(ring.len(), 3);
    assert!((ring_area(&ring) - 5.5).abs() < 1e-12);

    let env = compute(&GeometryRequest::new(pts, GeomKind::Envelope), &cfg).unwrap();
    let ring = env.polygon(cfg.render_tolerance).unwrap();
    assert_eq!(ring[0], vector![0.0, 0.0]);
    assert_eq!(ring[2], vector![4.0, 3.0]);
    assert!((ring_area(&ring) - 12.0).abs() < 1e-12);
}

#[test]
fn circle_polygon_uses_radius_not_squared_radius() {
    let cfg = MbgCfg::default();
    let pts = PointSet::from_xy(&[(-3.0, 0.0), (3.0, 0.0), (0.0, 1.0)]).unwrap();
    let g = compute(&GeometryRequest::new(pts, GeomKind::Circle), &cfg).unwrap();
    let ring = g.polygon(cfg.render_tolerance).unwrap();
    for p in &ring {
        assert!((p.norm() - 3.0).abs() < 1e-9);
    }
}

#[test]
fn ellipse_solution_encloses_input() {
    let cfg = MbgCfg {
        tolerance: 1e-6,
        ..MbgCfg::default()
    };
    let pts = PointSet::from_xy(&[(0.0, 0.0), (5.0, 1.0), (6.0, 3.0), (2.0, 2.5), (-1.0, 1.0)])
        .unwrap();
    let g = compute(&GeometryRequest::new(pts.clone(), GeomKind::Ellipse), &cfg).unwrap();
    let BoundingGeometry::Ellipse {
        solution,
        major,
        minor,
        ..
    } = &g
    else {
        panic!("expected ellipse");
    };
    assert!(major > minor);
    let ring = g.polygon(1e-4).unwrap();
    assert!(ring.len() >= 8);
    for q in &ring {
        assert!(((q - solution.center).norm() - major).abs() <= major - minor + 1e-9);
    }
    for p in pts.points() {
        assert!(solution.contains_eps(*p, 1e-3));
    }
}

#[test]
fn failures_carry_feature_context() {
    let cfg = MbgCfg::default();
    let twins = PointSet::from_xy(&[(2.0, 2.0), (2.0, 2.0)]).unwrap();
    let err = compute_feature(
        "parcel 17",
        &GeometryRequest::new(twins, GeomKind::RectangleArea),
        &cfg,
    )
    .unwrap_err();
    assert_eq!(err.feature, "parcel 17");
    assert!(matches!(err.source, MbgError::DegenerateInput { .. }));
    assert!(err.to_string().contains("<parcel 17>"));
}

#[test]
fn invalid_config_is_rejected_before_solving() {
    let cfg = MbgCfg {
        tolerance: 0.0,
        ..MbgCfg::default()
    };
    let err = compute(&GeometryRequest::new(unit_square(), GeomKind::Circle), &cfg).unwrap_err();
    assert!(matches!(err, MbgError::InvalidConfig { .. }));
}

#[test]
fn point_set_and_kind_parsing() {
    assert!(PointSet::new(Vec::new()).is_err());
    assert!(PointSet::from_xy(&[(f64::NAN, 0.0)]).is_err());
    for k in GeomKind::ALL {
        assert_eq!(k.as_str().parse::<GeomKind>().unwrap(), k);
    }
    assert_eq!(GeomKind::default(), GeomKind::RectangleArea);
    assert!("hexagon".parse::<GeomKind>().is_err());
}

fn arb_cloud() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 3..16)
}

fn hull_area(coords: &[(f64, f64)]) -> f64 {
    let pts: Vec<Point2> = coords.iter().map(|&(x, y)| vector![x, y]).collect();
    ring_area(&convex_hull(&pts))
}

proptest! {
    #[test]
    fn rectangle_contains_points_and_beats_envelope(coords in arb_cloud()) {
        prop_assume!(hull_area(&coords) > 1.0);
        let pts = PointSet::from_xy(&coords).unwrap();
        let r = min_area_rect(pts.points(), &MbgCfg::default()).unwrap();
        for p in pts.points() {
            prop_assert!(r.contains_eps(*p, 1e-6));
        }
        let env = envelope(pts.points()).unwrap();
        prop_assert!(r.area <= ring_area(&env) * (1.0 + 1e-9) + 1e-9);
    }

    #[test]
    fn ball_contains_points(coords in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..32)) {
        let pts = PointSet::from_xy(&coords).unwrap();
        let b = min_enclosing_ball(pts.points(), &MbgCfg::default()).unwrap();
        for p in pts.points() {
            prop_assert!(b.contains_eps(*p, 1e-6));
        }
    }

    #[test]
    fn ellipse_contains_points(coords in arb_cloud()) {
        prop_assume!(hull_area(&coords) > 1.0);
        let cfg = MbgCfg { tolerance: 1e-3, ..MbgCfg::default() };
        let pts = PointSet::from_xy(&coords).unwrap();
        let e = min_volume_ellipse(pts.points(), &cfg).unwrap();
        for p in pts.points() {
            prop_assert!(e.contains_eps(*p, 0.05), "level {}", e.level(*p));
        }
    }

    #[test]
    fn repeated_runs_are_identical(coords in arb_cloud()) {
        prop_assume!(hull_area(&coords) > 1.0);
        let cfg = MbgCfg::default();
        let pts = PointSet::from_xy(&coords).unwrap();
        for kind in GeomKind::ALL {
            let req = GeometryRequest::new(pts.clone(), kind);
            prop_assert_eq!(compute(&req, &cfg).unwrap(), compute(&req, &cfg).unwrap());
        }
    }
}
