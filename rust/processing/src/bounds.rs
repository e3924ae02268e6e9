// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial bounds filter
//!
//! Buildings whose reference point falls outside a fixed rectangle are
//! skipped before reprojection. The test is strictly interior on both axes
//! and never looks at the height.

use std::str::FromStr;

/// Axis-aligned rectangle in the source CRS, given as top-left and
/// bottom-right corners: `x1 < x2` and `y1 > y2` where y grows northward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for BoundingRegion {
    /// The district the tool was originally run against.
    fn default() -> Self {
        Self {
            x1: 310_661.476_651,
            y1: 5_995_856.558_156,
            x2: 311_805.657_554,
            y2: 5_994_955.660_174,
        }
    }
}

impl BoundingRegion {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// True when `(x, y)` lies strictly inside the region. Points exactly
    /// on a boundary line are rejected.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.x1 && x < self.x2 && y < self.y1 && y > self.y2
    }
}

/// Parses `x1,y1,x2,y2` and validates the corner convention.
impl FromStr for BoundingRegion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number {:?} in bounds", part.trim()))
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?;
        if values.len() != 4 {
            return Err(format!("expected x1,y1,x2,y2 (4 numbers), got {}", values.len()));
        }
        let region = Self::new(values[0], values[1], values[2], values[3]);
        if region.x1 >= region.x2 || region.y1 <= region.y2 {
            return Err("bounds must satisfy x1 < x2 and y1 > y2 (top-left, bottom-right)".to_string());
        }
        Ok(region)
    }
}
