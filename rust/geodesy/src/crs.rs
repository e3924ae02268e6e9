// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CRS identifier parsing
//!
//! Accepts EPSG codes (`EPSG:25832`, bare `25832`, legacy `+init=EPSG:25832`)
//! and the proj-string subset the supported projections cover. Anything else
//! is an [`Error::UnsupportedCrs`], reported before any building is
//! processed.

use crate::ellipsoid::Ellipsoid;
use crate::error::{Error, Result};
use crate::projection::{Projection, TmParams};

/// A resolved coordinate reference system.
#[derive(Debug, Clone)]
pub struct Crs {
    /// The identifier as given
    pub definition: String,
    projection: Projection,
}

impl Crs {
    /// Resolve a CRS identifier.
    pub fn parse(definition: &str) -> Result<Self> {
        let def = definition.trim();
        let projection = if let Some(code) = parse_epsg_code(def) {
            projection_from_epsg(code).ok_or_else(|| Error::UnsupportedCrs(def.to_string()))?
        } else if def.starts_with('+') {
            parse_proj_string(def)?
        } else {
            return Err(Error::UnsupportedCrs(def.to_string()));
        };

        Ok(Self {
            definition: def.to_string(),
            projection,
        })
    }

    /// WGS84 geographic coordinates (EPSG:4326).
    pub fn wgs84() -> Self {
        Self {
            definition: "EPSG:4326".to_string(),
            projection: Projection::Geographic,
        }
    }

    /// The projection between this CRS and geographic coordinates.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// True for geographic (degree-valued) systems.
    pub fn is_geographic(&self) -> bool {
        self.projection.is_geographic()
    }
}

/// Extract an EPSG code from `EPSG:n`, bare `n` or `+init=EPSG:n`.
fn parse_epsg_code(def: &str) -> Option<u32> {
    let def = def
        .strip_prefix("+init=")
        .unwrap_or(def);
    let tail = match def.get(..5) {
        Some(head) if head.eq_ignore_ascii_case("epsg:") => &def[5..],
        _ => def,
    };
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

fn projection_from_epsg(code: u32) -> Option<Projection> {
    match code {
        // Geographic systems (WGS84, ETRS89, NAD83)
        4326 | 4258 | 4269 => Some(Projection::Geographic),
        // Web Mercator (and its informal ancestor)
        3857 | 900_913 => Some(Projection::WebMercator),
        // UTM on WGS84, northern and southern zones
        32601..=32660 => Some(Projection::TransverseMercator(TmParams::utm(
            (code - 32600) as u8,
            true,
            Ellipsoid::WGS84,
        ))),
        32701..=32760 => Some(Projection::TransverseMercator(TmParams::utm(
            (code - 32700) as u8,
            false,
            Ellipsoid::WGS84,
        ))),
        // ETRS89 / UTM zones 28N..38N
        25828..=25838 => Some(Projection::TransverseMercator(TmParams::utm(
            (code - 25800) as u8,
            true,
            Ellipsoid::GRS80,
        ))),
        _ => None,
    }
}

fn parse_proj_string(def: &str) -> Result<Projection> {
    let mut proj = None;
    let mut zone = None;
    let mut south = false;
    let mut lon_0 = 0.0;
    let mut k_0 = 1.0;
    let mut x_0 = 0.0;
    let mut y_0 = 0.0;
    let mut ellipsoid = Ellipsoid::WGS84;

    for token in def.split_whitespace() {
        let token = token.strip_prefix('+').unwrap_or(token);
        let (key, value) = match token.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (token, None),
        };
        match key {
            "proj" => proj = value.map(str::to_string),
            "zone" => {
                zone = Some(value.and_then(|v| v.parse::<u8>().ok()).ok_or_else(|| {
                    Error::UnsupportedCrs(format!("invalid +zone in {def:?}"))
                })?);
            }
            "south" => south = true,
            "lon_0" => lon_0 = parse_num(value, "lon_0", def)?,
            "k" | "k_0" => k_0 = parse_num(value, key, def)?,
            "x_0" => x_0 = parse_num(value, "x_0", def)?,
            "y_0" => y_0 = parse_num(value, "y_0", def)?,
            "ellps" | "datum" => {
                ellipsoid = match value {
                    Some(v) if v.eq_ignore_ascii_case("WGS84") => Ellipsoid::WGS84,
                    Some(v) if v.eq_ignore_ascii_case("GRS80")
                        || v.eq_ignore_ascii_case("ETRS89") =>
                    {
                        Ellipsoid::GRS80
                    }
                    Some(v) => {
                        return Err(Error::UnsupportedCrs(format!(
                            "unsupported ellipsoid {v:?} in {def:?}"
                        )))
                    }
                    None => ellipsoid,
                };
            }
            // Units, axis order and the like are accepted silently as long
            // as the projection itself is supported.
            _ => {}
        }
    }

    match proj.as_deref() {
        Some("longlat") | Some("latlong") => Ok(Projection::Geographic),
        Some("merc") | Some("webmerc") => Ok(Projection::WebMercator),
        Some("utm") => {
            let zone = zone
                .filter(|z| (1..=60).contains(z))
                .ok_or_else(|| Error::UnsupportedCrs(format!("+proj=utm needs +zone=1..60: {def:?}")))?;
            Ok(Projection::TransverseMercator(TmParams::utm(
                zone, !south, ellipsoid,
            )))
        }
        Some("tmerc") => Ok(Projection::TransverseMercator(TmParams {
            ellipsoid,
            central_meridian: lon_0,
            scale_factor: k_0,
            false_easting: x_0,
            false_northing: y_0,
        })),
        _ => Err(Error::UnsupportedCrs(def.to_string())),
    }
}

fn parse_num(value: Option<&str>, key: &str, def: &str) -> Result<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| Error::UnsupportedCrs(format!("invalid +{key} in {def:?}")))
}
