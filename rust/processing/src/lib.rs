// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # gmlsplit Processing
//!
//! The per-building splitting pipeline: skeleton extraction, reference-point
//! computation, bounds filtering, export and the driver loop.
//!
//! ```rust,ignore
//! use gmlsplit_geodesy::{Crs, ToWgs84};
//! use gmlsplit_processing::{split_city_model, SplitOptions};
//!
//! let crs = Crs::parse("EPSG:25832")?;
//! let transform = ToWgs84::new(&crs);
//! let summary = split_city_model(input, output_dir, &transform, SplitOptions::default())?;
//! println!("{} buildings written", summary.written);
//! ```

pub mod bounds;
pub mod error;
pub mod exporter;
pub mod pipeline;
pub mod reference_point;
pub mod skeleton;

pub use bounds::BoundingRegion;
pub use error::{Error, Result};
pub use exporter::{BuildingExporter, ExportOutcome, REFERENCE_POINT_ID};
pub use pipeline::{split_city_model, split_document, SplitOptions, SplitSummary};
pub use reference_point::ReferencePoint;
pub use skeleton::extract_template;
