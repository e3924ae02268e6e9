// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate transform seam
//!
//! The pipeline only ever needs one direction: source CRS to WGS84
//! geographic. [`CrsTransform`] is the trait the pipeline depends on;
//! [`ToWgs84`] is the production implementation. Tests substitute their
//! own implementations to exercise the pipeline without projection math.

use crate::crs::Crs;
use crate::error::Result;
use crate::projection::Projection;

/// Transforms one 3D position into WGS84 geographic coordinates.
///
/// The returned tuple is `(lon, lat, h)` in degrees and metres, in the
/// order the transform produces them. Heights pass through unchanged.
pub trait CrsTransform {
    fn transform(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)>;
}

/// Transform from a source CRS to WGS84 geographic coordinates.
#[derive(Debug, Clone)]
pub struct ToWgs84 {
    projection: Projection,
}

impl ToWgs84 {
    pub fn new(source: &Crs) -> Self {
        Self {
            projection: source.projection().clone(),
        }
    }
}

impl CrsTransform for ToWgs84 {
    fn transform(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (lon, lat) = self.projection.inverse(x, y)?;
        Ok((lon, lat, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geographic_source_is_identity() {
        let transform = ToWgs84::new(&Crs::wgs84());
        let (lon, lat, h) = transform.transform(9.5, 53.5, 42.0).expect("transform");
        assert_eq!((lon, lat, h), (9.5, 53.5, 42.0));
    }

    #[test]
    fn test_utm_origin_maps_to_central_meridian() {
        let crs = Crs::parse("EPSG:32632").expect("crs");
        let transform = ToWgs84::new(&crs);
        let (lon, lat, h) = transform.transform(500_000.0, 0.0, 12.0).expect("transform");
        assert_relative_eq!(lon, 9.0, epsilon = 1e-9);
        assert_relative_eq!(lat, 0.0, epsilon = 1e-9);
        assert_eq!(h, 12.0);
    }

    #[test]
    fn test_height_passes_through() {
        let crs = Crs::parse("EPSG:25832").expect("crs");
        let transform = ToWgs84::new(&crs);
        let (_, _, h) = transform
            .transform(565_000.0, 5_930_000.0, -3.25)
            .expect("transform");
        assert_eq!(h, -3.25);
    }

    #[test]
    fn test_bad_planar_input_is_an_error() {
        let crs = Crs::parse("EPSG:32632").expect("crs");
        let transform = ToWgs84::new(&crs);
        assert!(transform.transform(f64::NAN, 0.0, 0.0).is_err());
    }
}
