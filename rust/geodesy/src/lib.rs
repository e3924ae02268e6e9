// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # gmlsplit Geodesy
//!
//! Coordinate reference systems and the projected-to-geographic transform
//! the splitting pipeline treats as an external capability.
//!
//! Pure-Rust numerics: transverse Mercator (Krüger series) for the UTM and
//! ETRS89 zone families, spherical Web Mercator, and geographic identity.
//! CRS identifiers are accepted as EPSG codes (`EPSG:25832`, `25832`,
//! `+init=EPSG:25832`) or proj-strings (`+proj=utm +zone=32`,
//! `+proj=tmerc +lon_0=9 …`).
//!
//! ```rust,ignore
//! use gmlsplit_geodesy::{Crs, CrsTransform, ToWgs84};
//!
//! let crs = Crs::parse("EPSG:32632")?;
//! let transform = ToWgs84::new(&crs);
//! let (lon, lat, h) = transform.transform(500_000.0, 0.0, 12.0)?;
//! ```

pub mod crs;
pub mod ellipsoid;
pub mod error;
pub mod projection;
pub mod transform;

pub use crs::Crs;
pub use ellipsoid::Ellipsoid;
pub use error::{Error, Result};
pub use projection::{Projection, TmParams};
pub use transform::{CrsTransform, ToWgs84};
