// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference-point computation
//!
//! The anchor a downstream loader places the building at: the arithmetic
//! mean of all vertex x/y values (duplicates included, no deduplication) and
//! the maximum z. Horizontally that is a stable centroid; vertically it is
//! the apex, which anchors the building at its rooftop rather than its
//! volumetric center.

use gmlsplit_core::{CoordFormat, Element, ElementRole};

use crate::error::{Error, Result};

/// A building's representative point in the source CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Number of position elements that contributed
    pub position_count: usize,
    /// How many stripped coordinate prefixes contained digits
    pub numeric_prefixes: usize,
}

/// Compute the reference point of one building subtree.
///
/// Positions are visited in document order, but the reduction is
/// commutative, so the result does not depend on it. A building without
/// any position is an [`Error::EmptyGeometry`].
pub fn compute(building: &Element, format: CoordFormat) -> Result<ReferencePoint> {
    let mut x_sum = 0.0;
    let mut y_sum = 0.0;
    // Below any representable height, so negative elevations survive the max.
    let mut z_max = f64::NEG_INFINITY;
    let mut count = 0usize;
    let mut numeric_prefixes = 0usize;

    for position in building.find_descendants(ElementRole::Position) {
        let vertex = format.decode(&position.text())?;
        x_sum += vertex.x;
        y_sum += vertex.y;
        z_max = z_max.max(vertex.z);
        count += 1;
        if vertex.prefix_was_numeric {
            numeric_prefixes += 1;
        }
    }

    if count == 0 {
        return Err(Error::EmptyGeometry);
    }

    Ok(ReferencePoint {
        x: x_sum / count as f64,
        y: y_sum / count as f64,
        z: z_max,
        position_count: count,
        numeric_prefixes,
    })
}
