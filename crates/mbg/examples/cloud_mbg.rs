//! Print every bounding geometry kind for a few sampled clouds.
//!
//! Usage:
//!   cargo run -p mbg --example cloud_mbg -- 5
//!
//! The optional argument is the number of clouds (default 3).

use mbg::prelude::*;

fn main() {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let cfg = MbgCfg::default();
    for index in 0..count {
        let pts = draw_cloud(CloudCfg::default(), ReplayToken { seed: 2025, index });
        let hull = match PointSet::new(convex_hull(&pts)) {
            Ok(h) => h,
            Err(err) => {
                eprintln!("cloud {index}: {err}");
                continue;
            }
        };
        for kind in GeomKind::ALL {
            let req = GeometryRequest::new(hull.clone(), kind);
            match compute_feature(&format!("cloud {index}"), &req, &cfg) {
                Ok(g) => println!("cloud {index} {kind}: {}", describe(&g)),
                Err(err) => eprintln!("{err}"),
            }
        }
    }
}

fn describe(g: &BoundingGeometry) -> String {
    match g {
        BoundingGeometry::ConvexHull { ring } => format!("{} vertices", ring.len()),
        BoundingGeometry::Envelope { ring } => {
            format!("({:.3}, {:.3}) .. ({:.3}, {:.3})", ring[0].x, ring[0].y, ring[2].x, ring[2].y)
        }
        BoundingGeometry::Rectangle(r) => format!(
            "area={:.4} width={:.4} height={:.4} angle={:.2}°",
            r.area,
            r.width,
            r.height,
            r.angle_degrees()
        ),
        BoundingGeometry::Circle { center, radius } => {
            format!("center=({:.4}, {:.4}) radius={:.4}", center.x, center.y, radius)
        }
        BoundingGeometry::Ellipse {
            center,
            major,
            minor,
            angle,
            case,
            ..
        } => format!(
            "center=({:.4}, {:.4}) major={:.4} minor={:.4} angle={:.2} ({case:?})",
            center.x, center.y, major, minor, angle
        ),
    }
}
