//! Point tables → per-group point sets.
//!
//! Input is a CSV or Parquet table with one row per vertex. Rows are grouped
//! into features (`none`), a single group (`all`), or by an attribute (`list`).
//! Groups are listed in key order, numerically when every key is a number.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use mbg::Point2;
use polars::prelude::*;

/// How input rows are grouped before computing bounding geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Grouping {
    /// One geometry per feature id.
    #[default]
    None,
    /// One geometry for every input point.
    All,
    /// One geometry per distinct value of an attribute field.
    List,
}

/// Where to read points from and how to group them.
#[derive(Clone, Debug)]
pub struct InputSpec {
    pub path: PathBuf,
    pub x_col: String,
    pub y_col: String,
    pub feature_col: String,
    pub field: Option<String>,
    pub grouping: Grouping,
}

/// A labelled point group, e.g. `fid=12` or `landuse=forest`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    pub label: String,
    pub points: Vec<Point2>,
}

impl InputSpec {
    /// Column holding the group key, if the grouping needs one.
    fn key_column(&self) -> Result<Option<&str>> {
        match self.grouping {
            Grouping::All => Ok(None),
            Grouping::None => Ok(Some(self.feature_col.as_str())),
            Grouping::List => match self.field.as_deref() {
                Some(f) => Ok(Some(f)),
                None => bail!("attribute <field> must be set with <group=list>"),
            },
        }
    }
}

fn scan(path: &Path) -> Result<LazyFrame> {
    let lf = if path.extension().is_some_and(|e| e == "parquet") {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
    };
    lf.with_context(|| format!("opening {}", path.display()))
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("column <{name}> not found"))?
        .cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("row {row}: missing value in <{name}>")))
        .collect()
}

fn key_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df
        .column(name)
        .with_context(|| format!("field <{name}> not found in input table"))?
        .cast(&DataType::String)?;
    let keys = series
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect();
    Ok(keys)
}

/// Read the table and split it into labelled point groups.
pub fn load_groups(spec: &InputSpec) -> Result<Vec<PointGroup>> {
    let key = spec.key_column()?;
    let mut cols = vec![col(spec.x_col.as_str()), col(spec.y_col.as_str())];
    if let Some(k) = key {
        cols.push(col(k));
    }
    let df = scan(&spec.path)?
        .select(cols)
        .collect()
        .with_context(|| format!("reading {}", spec.path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input table");

    let xs = float_column(&df, &spec.x_col)?;
    let ys = float_column(&df, &spec.y_col)?;
    let keys = key.map(|k| key_column(&df, k)).transpose()?;
    Ok(group_points(&xs, &ys, key.zip(keys.as_deref())))
}

/// Compare group keys the way the key column sorts: by value when every key
/// parses as a number, lexically otherwise.
fn key_order(keys: &[&str]) -> impl Fn(&str, &str) -> Ordering {
    let numeric = keys.iter().all(|k| k.trim().parse::<f64>().is_ok());
    move |a: &str, b: &str| {
        if numeric {
            let (x, y) = (a.trim().parse::<f64>(), b.trim().parse::<f64>());
            if let (Ok(x), Ok(y)) = (x, y) {
                return x.total_cmp(&y).then_with(|| a.cmp(b));
            }
        }
        a.cmp(b)
    }
}

/// Group coordinates by key, sorted by key; a single `all` group without keys.
pub fn group_points(xs: &[f64], ys: &[f64], keys: Option<(&str, &[String])>) -> Vec<PointGroup> {
    let points = xs.iter().zip(ys).map(|(&x, &y)| Point2::new(x, y));
    let Some((field, keys)) = keys else {
        let points: Vec<Point2> = points.collect();
        return if points.is_empty() {
            Vec::new()
        } else {
            vec![PointGroup {
                label: "all".to_string(),
                points,
            }]
        };
    };
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, Vec<Point2>)> = Vec::new();
    for (p, k) in points.zip(keys) {
        let slot = *index.entry(k.as_str()).or_insert_with(|| {
            grouped.push((k.as_str(), Vec::new()));
            grouped.len() - 1
        });
        grouped[slot].1.push(p);
    }
    let distinct: Vec<&str> = grouped.iter().map(|(k, _)| *k).collect();
    let order = key_order(&distinct);
    grouped.sort_by(|(a, _), (b, _)| order(*a, *b));
    grouped
        .into_iter()
        .map(|(k, points)| PointGroup {
            label: format!("{field}={k}"),
            points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn group_points_sorts_by_key() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 2.0, 3.0];
        let keys: Vec<String> = ["b", "a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let groups = group_points(&xs, &ys, Some(("zone", &keys)));
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["zone=a", "zone=b", "zone=c"]);
        assert_eq!(groups[1].points, [Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)]);

        let all = group_points(&xs, &ys, None);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].points.len(), 4);
        assert!(group_points(&[], &[], None).is_empty());
    }

    #[test]
    fn numeric_keys_sort_by_value() {
        let xs = [0.0; 4];
        let ys = [0.0; 4];
        let keys: Vec<String> = ["10", "2", "1", "10"].iter().map(|s| s.to_string()).collect();
        let groups = group_points(&xs, &ys, Some(("fid", &keys)));
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["fid=1", "fid=2", "fid=10"]);
        assert_eq!(groups[2].points.len(), 2);
    }

    #[test]
    fn load_groups_from_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        fs::write(
            &path,
            "fid,x,y,landuse\n1,0,0,forest\n1,1,0,forest\n1,0,1,forest\n2,5,5,water\n2,6,5,water\n2,5,7,water\n",
        )
        .unwrap();
        let mut spec = InputSpec {
            path,
            x_col: "x".into(),
            y_col: "y".into(),
            feature_col: "fid".into(),
            field: None,
            grouping: Grouping::None,
        };
        let groups = load_groups(&spec).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "fid=1");
        assert_eq!(groups[1].points[2], Point2::new(5.0, 7.0));

        spec.grouping = Grouping::All;
        assert_eq!(load_groups(&spec).unwrap()[0].points.len(), 6);

        spec.grouping = Grouping::List;
        assert!(load_groups(&spec).is_err(), "list grouping needs a field");
        spec.field = Some("landuse".into());
        let groups = load_groups(&spec).unwrap();
        assert_eq!(groups[1].label, "landuse=water");

        spec.field = Some("missing".into());
        assert!(load_groups(&spec).is_err());
    }
}
