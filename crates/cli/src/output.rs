//! GeoJSON-style feature collection for computed bounding geometry.

use anyhow::Result;
use mbg::{BoundingGeometry, Point2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Polygon,
    pub properties: Properties,
}

/// Polygon with a single closed exterior ring.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// Descriptor fields; only those of the computed kind are present.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Properties {
    pub group: String,
    pub geom_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub height: Option<f64>,
    /// Degrees.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub center: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub major: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub minor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation_case: Option<String>,
}

fn closed_ring(ring: &[Point2]) -> Vec<[f64; 2]> {
    let mut out: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
    if let Some(first) = out.first().copied() {
        out.push(first);
    }
    out
}

#[inline]
fn xy(p: &Point2) -> [f64; 2] {
    [p.x, p.y]
}

/// Build the output feature for one group.
pub fn feature(group: &str, g: &BoundingGeometry, render_tolerance: f64) -> Result<Feature> {
    let ring = g.polygon(render_tolerance)?;
    let mut props = Properties {
        group: group.to_string(),
        geom_type: g.kind().to_string(),
        ..Properties::default()
    };
    match g {
        BoundingGeometry::ConvexHull { .. } | BoundingGeometry::Envelope { .. } => {}
        BoundingGeometry::Rectangle(r) => {
            props.area = Some(r.area);
            props.width = Some(r.width);
            props.height = Some(r.height);
            props.angle = Some(r.angle_degrees());
            props.center = Some(xy(&r.center));
        }
        BoundingGeometry::Circle { center, radius } => {
            props.center = Some(xy(center));
            props.radius = Some(*radius);
        }
        BoundingGeometry::Ellipse {
            center,
            major,
            minor,
            angle,
            case,
            ..
        } => {
            props.center = Some(xy(center));
            props.major = Some(*major);
            props.minor = Some(*minor);
            props.angle = Some(*angle);
            props.rotation_case = Some(format!("{case:?}"));
        }
    }
    Ok(Feature {
        kind: "Feature".to_string(),
        geometry: Polygon {
            kind: "Polygon".to_string(),
            coordinates: vec![closed_ring(&ring)],
        },
        properties: props,
    })
}
