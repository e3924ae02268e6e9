// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver loop
//!
//! Parses the input once, builds the template once, then walks every
//! feature container of the original document and exports each building
//! under a `Building{N}` name from a single run-wide counter. Per-building
//! failures are logged and counted; only a parse failure aborts the run.

use std::path::Path;

use tracing::{debug, info, warn};

use gmlsplit_core::{CoordFormat, Document, ElementRole, NamespaceScope};
use gmlsplit_geodesy::CrsTransform;

use crate::bounds::BoundingRegion;
use crate::error::Result;
use crate::exporter::{BuildingExporter, ExportOutcome};
use crate::skeleton;

/// Run parameters that are constant across buildings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    pub bounds: BoundingRegion,
    pub format: CoordFormat,
}

/// Per-run counters, one increment per building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub written: usize,
    pub out_of_bounds: usize,
    pub failed: usize,
}

impl SplitSummary {
    /// Buildings seen in total.
    pub fn total(&self) -> usize {
        self.written + self.out_of_bounds + self.failed
    }
}

/// Split a city model file into one document per building.
pub fn split_city_model<T: CrsTransform>(
    input: &Path,
    output_dir: &Path,
    transform: &T,
    options: SplitOptions,
) -> Result<SplitSummary> {
    let document = Document::parse_file(input)?;
    split_document(&document, output_dir, transform, options)
}

/// Split an already-parsed city model.
pub fn split_document<T: CrsTransform>(
    document: &Document,
    output_dir: &Path,
    transform: &T,
    options: SplitOptions,
) -> Result<SplitSummary> {
    if let Some(encoding) = &document.source_encoding {
        if !encoding.eq_ignore_ascii_case("utf-8") {
            debug!(source_encoding = encoding.as_str(), "output files are UTF-8");
        }
    }

    let template = skeleton::extract_template(document);
    let scope = NamespaceScope::from_element(&document.root);
    let exporter = BuildingExporter::new(transform, options.bounds, options.format, output_dir);

    let mut summary = SplitSummary::default();
    let mut counter = 0usize;
    for container in document
        .root
        .children_elements()
        .filter(|c| c.role() == ElementRole::FeatureContainer)
    {
        for building in container
            .children_elements()
            .filter(|c| c.role() == ElementRole::Building)
        {
            counter += 1;
            let name = format!("Building{counter}");
            match exporter.export(&template, &scope, building, &name) {
                Ok(ExportOutcome::Written(_)) => summary.written += 1,
                Ok(ExportOutcome::OutOfBounds) => summary.out_of_bounds += 1,
                Err(err) => {
                    warn!("{name} failed: {err}");
                    summary.failed += 1;
                }
            }
        }
    }

    info!(
        written = summary.written,
        out_of_bounds = summary.out_of_bounds,
        failed = summary.failed,
        "split complete"
    );
    Ok(summary)
}
