// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map projections
//!
//! Static-dispatch projection enum with `forward` (geographic -> planar) and
//! `inverse` (planar -> geographic) in degrees and metres.
//!
//! The transverse Mercator implementation uses the Krüger series in the
//! third flattening `n`, truncated at `n^3`. Within a UTM zone that is
//! accurate to well under a millimetre, which is orders of magnitude tighter
//! than the building centroids this crate serves.

use std::f64::consts::PI;

use crate::ellipsoid::Ellipsoid;
use crate::error::{Error, Result};

/// Parameters of a transverse Mercator projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmParams {
    pub ellipsoid: Ellipsoid,
    /// Central meridian (degrees)
    pub central_meridian: f64,
    /// Scale factor at the central meridian
    pub scale_factor: f64,
    /// False easting (metres)
    pub false_easting: f64,
    /// False northing (metres)
    pub false_northing: f64,
}

impl TmParams {
    /// UTM zone parameters on the given ellipsoid.
    pub fn utm(zone: u8, north: bool, ellipsoid: Ellipsoid) -> Self {
        Self {
            ellipsoid,
            central_meridian: f64::from(zone) * 6.0 - 183.0,
            scale_factor: 0.9996,
            false_easting: 500_000.0,
            false_northing: if north { 0.0 } else { 10_000_000.0 },
        }
    }
}

/// A map projection between geographic and planar coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Identity: input already is lon/lat degrees
    Geographic,
    /// Transverse Mercator (UTM, ETRS89 zones, custom `+proj=tmerc`)
    TransverseMercator(TmParams),
    /// Spherical Web Mercator (EPSG:3857)
    WebMercator,
}

/// Web Mercator sphere radius (WGS84 semi-major axis).
const WEB_MERCATOR_RADIUS: f64 = Ellipsoid::WGS84.a;

/// Latitude bound of the Web Mercator square (degrees).
const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779;

impl Projection {
    /// True when `forward`/`inverse` are the identity.
    #[inline]
    pub fn is_geographic(&self) -> bool {
        matches!(self, Self::Geographic)
    }

    /// Geographic -> planar. Input in degrees, output in metres
    /// (degrees for [`Projection::Geographic`]).
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::Transform(format!(
                "latitude {lat} out of range [-90, 90]"
            )));
        }
        match self {
            Self::Geographic => Ok((lon, lat)),
            Self::TransverseMercator(params) => Kruger::new(params).forward(lon, lat),
            Self::WebMercator => {
                let lat = lat.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
                let x = WEB_MERCATOR_RADIUS * lon.to_radians();
                let y = WEB_MERCATOR_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
                Ok((x, y))
            }
        }
    }

    /// Planar -> geographic. Returns (lon, lat) in degrees.
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Transform(format!("non-finite input ({x}, {y})")));
        }
        match self {
            Self::Geographic => Ok((x, y)),
            Self::TransverseMercator(params) => Kruger::new(params).inverse(x, y),
            Self::WebMercator => {
                let lon = (x / WEB_MERCATOR_RADIUS).to_degrees();
                let lat =
                    (2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - PI / 2.0).to_degrees();
                Ok((lon, lat))
            }
        }
    }
}

/// Precomputed Krüger series coefficients for one parameter set.
struct Kruger {
    /// Rectifying radius times scale factor
    ka: f64,
    /// First eccentricity
    e: f64,
    /// Forward coefficients alpha_1..3
    alpha: [f64; 3],
    /// Inverse coefficients beta_1..3
    beta: [f64; 3],
    /// Conformal-to-geodetic latitude coefficients delta_1..3
    delta: [f64; 3],
    lambda0: f64,
    x0: f64,
    y0: f64,
}

impl Kruger {
    fn new(params: &TmParams) -> Self {
        let n = params.ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;

        let rect_radius =
            params.ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        Self {
            ka: params.scale_factor * rect_radius,
            e: params.ellipsoid.e2().sqrt(),
            alpha: [
                n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3,
                13.0 / 48.0 * n2 - 3.0 / 5.0 * n3,
                61.0 / 240.0 * n3,
            ],
            beta: [
                n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3,
                n2 / 48.0 + n3 / 15.0,
                17.0 / 480.0 * n3,
            ],
            delta: [
                2.0 * n - 2.0 / 3.0 * n2 - 2.0 * n3,
                7.0 / 3.0 * n2 - 8.0 / 5.0 * n3,
                56.0 / 15.0 * n3,
            ],
            lambda0: params.central_meridian.to_radians(),
            x0: params.false_easting,
            y0: params.false_northing,
        }
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        let dlam = (lon.to_radians() - self.lambda0 + PI).rem_euclid(2.0 * PI) - PI;
        if dlam.abs() > 60f64.to_radians() {
            return Err(Error::Transform(format!(
                "longitude {lon} too far from central meridian {}",
                self.lambda0.to_degrees()
            )));
        }

        let sin_phi = lat.to_radians().sin();
        // Tangent of the conformal latitude
        let t = (sin_phi.atanh() - self.e * (self.e * sin_phi).atanh()).sinh();

        let xi = t.atan2(dlam.cos());
        let eta = (dlam.sin() / t.hypot(1.0)).atanh();

        let mut easting = eta;
        let mut northing = xi;
        for (j, a_j) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            easting += a_j * (k * xi).cos() * (k * eta).sinh();
            northing += a_j * (k * xi).sin() * (k * eta).cosh();
        }

        Ok((self.x0 + self.ka * easting, self.y0 + self.ka * northing))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let xi = (y - self.y0) / self.ka;
        let eta = (x - self.x0) / self.ka;
        if xi.abs() > PI / 2.0 || eta.abs() > 1.5 {
            return Err(Error::Transform(format!(
                "planar coordinates ({x}, {y}) outside the projection domain"
            )));
        }

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b_j) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_p -= b_j * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b_j * (k * xi).cos() * (k * eta).sinh();
        }

        // Conformal latitude, then the geodetic correction series
        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let mut phi = chi;
        for (j, d_j) in self.delta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            phi += d_j * (k * chi).sin();
        }

        let lambda = self.lambda0 + eta_p.sinh().atan2(xi_p.cos());

        let lon = lambda.to_degrees();
        let lat = phi.to_degrees();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::Transform(format!(
                "inverse projection of ({x}, {y}) did not converge"
            )));
        }
        Ok((lon, lat))
    }
}
