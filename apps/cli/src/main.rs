// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gmlsplit - split a CityGML city model into one file per building.
//!
//! Each in-bounds building is written to `<output>/BuildingN.xml`, wrapped
//! in the input document's skeleton and annotated with a WGS84 reference
//! point (`unityReferencePoint`) a downstream loader can anchor it by.
//!
//! ```text
//! gmlsplit --input city.gml --output out/ --source-crs EPSG:25832
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gmlsplit_core::CoordFormat;
use gmlsplit_geodesy::{Crs, ToWgs84};
use gmlsplit_processing::{split_city_model, BoundingRegion, SplitOptions};

/// Split a CityGML city model into one file per building
#[derive(Parser, Debug)]
#[command(name = "gmlsplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split a CityGML city model into one file per building", long_about = None)]
struct Args {
    /// Input city model file
    #[arg(short, long)]
    input: PathBuf,

    /// Existing directory the per-building files are written into
    #[arg(short, long)]
    output: PathBuf,

    /// Source CRS of the input geometry (EPSG code or proj-string)
    #[arg(short = 'p', long)]
    source_crs: String,

    /// Bounding region as x1,y1,x2,y2 in the source CRS (top-left,
    /// bottom-right); buildings outside it are skipped
    #[arg(long)]
    bounds: Option<BoundingRegion>,

    /// Characters stripped from each position's first coordinate before
    /// numeric parsing
    #[arg(long, default_value_t = 2)]
    coord_prefix: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let crs = validate_run(&args.input, &args.output, &args.source_crs)?;
    let transform = ToWgs84::new(&crs);

    let options = SplitOptions {
        bounds: args.bounds.unwrap_or_default(),
        format: CoordFormat {
            strip_len: args.coord_prefix,
        },
    };

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        source_crs = %crs.definition,
        "splitting city model"
    );
    let summary = split_city_model(&args.input, &args.output, &transform, options)
        .context("splitting failed")?;

    info!(
        "{} written, {} out of bounds, {} failed",
        summary.written, summary.out_of_bounds, summary.failed
    );
    Ok(())
}

/// Check the run configuration before any processing starts. A missing
/// input file, missing output directory or unsupported CRS aborts the run
/// with a non-zero exit.
fn validate_run(input: &Path, output: &Path, source_crs: &str) -> anyhow::Result<Crs> {
    if !input.is_file() {
        bail!("input file {} does not exist", input.display());
    }
    if !output.is_dir() {
        bail!("output directory {} does not exist", output.display());
    }
    Crs::parse(source_crs).with_context(|| format!("cannot use {source_crs:?} as source CRS"))
}
