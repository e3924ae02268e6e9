// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-building export
//!
//! Runs the full chain for one building: reference point, bounds check,
//! reprojection, reference-point subtree, template fill, serialization.
//! Every failure here is scoped to the building being exported; the driver
//! decides whether to continue.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use gmlsplit_core::{CoordFormat, Document, Element, NamespaceScope};
use gmlsplit_geodesy::CrsTransform;

use crate::bounds::BoundingRegion;
use crate::error::{Error, Result};
use crate::reference_point;
use crate::skeleton::first_container_mut;

/// Identifier the downstream loader looks the anchor up by.
pub const REFERENCE_POINT_ID: &str = "unityReferencePoint";

/// Result of exporting one building.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// An output file was written at this path
    Written(PathBuf),
    /// The reference point fell outside the bounding region; no file
    OutOfBounds,
}

/// Exports single buildings into self-contained documents.
pub struct BuildingExporter<'a, T: CrsTransform> {
    transform: &'a T,
    bounds: BoundingRegion,
    format: CoordFormat,
    output_dir: &'a Path,
}

impl<'a, T: CrsTransform> BuildingExporter<'a, T> {
    pub fn new(
        transform: &'a T,
        bounds: BoundingRegion,
        format: CoordFormat,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            transform,
            bounds,
            format,
            output_dir,
        }
    }

    /// Export one building under the given name. The original building and
    /// the template are left untouched; both are deep-copied before any
    /// mutation.
    pub fn export(
        &self,
        template: &Document,
        scope: &NamespaceScope,
        building: &Element,
        name: &str,
    ) -> Result<ExportOutcome> {
        let point = reference_point::compute(building, self.format)?;
        if point.numeric_prefixes > 0 {
            warn!(
                building = name,
                positions = point.numeric_prefixes,
                "stripped coordinate prefixes contained digits; check --coord-prefix"
            );
        }

        if !self.bounds.contains(point.x, point.y) {
            info!("{name} out of bounds!");
            return Ok(ExportOutcome::OutOfBounds);
        }

        debug!(
            building = name,
            x = point.x,
            y = point.y,
            z = point.z,
            "reference point in source CRS"
        );
        let (lon, lat, height) = self.transform.transform(point.x, point.y, point.z)?;

        let mut exported = building.clone();
        exported.push_element(reference_subtree(scope, lon, lat, height));

        let mut output = template.clone();
        let container =
            first_container_mut(&mut output.root).ok_or(Error::MissingContainer)?;
        container.push_element(exported);

        let path = self.output_dir.join(format!("{name}.xml"));
        output.write_file(&path).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        info!("{name} written!");
        Ok(ExportOutcome::Written(path))
    }
}

/// The anchor subtree appended to each exported building:
/// `<gml:AbstractFeature gml:id="unityReferencePoint"><gml:point>
/// <gml:pos srsDimension="3">lon lat height</gml:pos></gml:point>
/// </gml:AbstractFeature>`, under whatever prefix the document binds to
/// the GML namespace.
fn reference_subtree(scope: &NamespaceScope, lon: f64, lat: f64, height: f64) -> Element {
    let mut pos = Element::new(scope.gml_name("pos"));
    pos.set_attr("srsDimension", "3");
    pos.push_text(format!("{lon} {lat} {height}"));

    let mut point = Element::new(scope.gml_name("point"));
    point.push_element(pos);

    let mut anchor = Element::new(scope.gml_name("AbstractFeature"));
    anchor.set_attr(scope.gml_name("id"), REFERENCE_POINT_ID);
    anchor.push_element(point);
    anchor
}
