// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference ellipsoids
//!
//! Only the two ellipsoids the supported CRS families use: WGS84 (GPS, UTM
//! 326xx/327xx) and GRS80 (ETRS89, 258xx). Their parameters differ in the
//! 10th significant digit of the flattening, but they are kept distinct so
//! proj-strings resolve to what they name.

/// A reference ellipsoid given by semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    /// WGS 84 (EPSG ellipsoid 7030)
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// GRS 1980 (EPSG ellipsoid 7019)
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_222_101,
    };

    /// First eccentricity squared: `e^2 = f(2 - f)`
    #[inline]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Third flattening: `n = f / (2 - f)`
    #[inline]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// Semi-minor axis (metres)
    #[inline]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }
}
