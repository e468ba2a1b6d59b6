use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mbg::bounding::convex_hull;
use mbg::{compute_feature, BoundingGeometry, FeatureError, GeomKind, GeometryRequest, MbgCfg, PointSet};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod output;
mod provenance;

use input::{Grouping, InputSpec, PointGroup};
use output::FeatureCollection;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "mbg")]
#[command(about = "Minimum bounding geometry for point features")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute one bounding geometry per feature/group and write a feature collection
    Run(RunArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// CSV or Parquet table with one row per vertex
    #[arg(long)]
    input: PathBuf,
    /// Output feature collection (JSON)
    #[arg(long)]
    out: PathBuf,
    /// convex_hull, envelope, rectangle_area, circle or ellipse
    #[arg(long, default_value = "rectangle_area")]
    geom_type: GeomKind,
    #[arg(long, value_enum, default_value_t = Grouping::None)]
    group: Grouping,
    /// Attribute field used with --group list
    #[arg(long)]
    field: Option<String>,
    /// Feature id column used with --group none
    #[arg(long, default_value = "fid")]
    feature_col: String,
    #[arg(long, default_value = "x")]
    x_col: String,
    #[arg(long, default_value = "y")]
    y_col: String,
    /// Khachiyan tolerance (ellipse)
    #[arg(long, default_value_t = 0.01)]
    tolerance: f64,
    /// Max arc-to-chord distance for rendered circles/ellipses
    #[arg(long, default_value_t = 0.001)]
    render_tolerance: f64,
    /// Log and skip groups that fail instead of aborting the run
    #[arg(long)]
    skip_failed: bool,
}

/// Per-run counts, logged and recorded in provenance.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    written: usize,
    skipped: Vec<String>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(&args).map(|_| ()),
        Action::Report => report(),
    }
}

fn run(args: &RunArgs) -> Result<Summary> {
    tracing::info!(
        input = %args.input.display(),
        out = %args.out.display(),
        geom_type = %args.geom_type,
        group = ?args.group,
        "run"
    );
    let cfg = MbgCfg {
        tolerance: args.tolerance,
        render_tolerance: args.render_tolerance,
        ..MbgCfg::default()
    };
    cfg.validate()?;

    let spec = InputSpec {
        path: args.input.clone(),
        x_col: args.x_col.clone(),
        y_col: args.y_col.clone(),
        feature_col: args.feature_col.clone(),
        field: args.field.clone(),
        grouping: args.group,
    };
    let groups = input::load_groups(&spec)?;

    let mut summary = Summary::default();
    let mut features = Vec::with_capacity(groups.len());
    for group in groups {
        match bound_group(&group, args.geom_type, &cfg) {
            Ok(g) => features.push(output::feature(&group.label, &g, cfg.render_tolerance)?),
            Err(err) if args.skip_failed => {
                tracing::warn!(%err, "skipping group");
                summary.skipped.push(group.label);
            }
            Err(err) => {
                tracing::error!(%err, "aborting");
                return Err(err.into());
            }
        }
    }
    summary.written = features.len();

    write_output(&args.out, &FeatureCollection::new(features))?;
    let payload = Payload::new(serde_json::json!({
        "geom_type": args.geom_type.as_str(),
        "group": format!("{:?}", args.group).to_lowercase(),
        "field": args.field,
        "tolerance": cfg.tolerance,
        "render_tolerance": cfg.render_tolerance,
        "skipped": summary.skipped,
    }))
    .with_input(args.input.to_string_lossy());
    provenance::write_sidecar(&args.out, payload)?;
    tracing::info!(written = summary.written, skipped = summary.skipped.len(), "done");
    Ok(summary)
}

/// Hull one group and compute its geometry; every failure carries the group label.
fn bound_group(
    group: &PointGroup,
    kind: GeomKind,
    cfg: &MbgCfg,
) -> Result<BoundingGeometry, FeatureError> {
    let points = PointSet::new(group.points.clone())
        .map_err(|e| FeatureError::new(&group.label, e))?;
    let hull = PointSet::new(convex_hull(points.points()))
        .map_err(|e| FeatureError::new(&group.label, e))?;
    tracing::info!(group = %group.label, points = points.len(), hull = hull.len(), "group");
    compute_feature(&group.label, &GeometryRequest::new(hull, kind), cfg)
}

fn write_output(out: &Path, fc: &FeatureCollection) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(fc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new(serde_json::json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
