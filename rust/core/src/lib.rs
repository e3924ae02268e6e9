// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # gmlsplit Core
//!
//! Document model for CityGML-shaped XML built on [quick-xml](https://docs.rs/quick-xml).
//! Provides the structural operations the splitting pipeline needs:
//!
//! - **Tree model**: ordered, namespace-preserving element tree with value
//!   semantics (deep copy via `Clone`)
//! - **Role classification**: mapping qualified tag names to the semantic
//!   roles the pipeline cares about (feature container, building, position)
//! - **Position decoding**: parsing `gml:pos` coordinate triples, including
//!   the fixed-length prefix strip on the first component
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gmlsplit_core::{Document, ElementRole};
//!
//! let doc = Document::parse_str(xml)?;
//! for member in doc.root.children_elements() {
//!     if member.role() == ElementRole::FeatureContainer {
//!         println!("container with {} features", member.children_elements().count());
//!     }
//! }
//! ```

pub mod document;
pub mod error;
pub mod namespace;
pub mod position;

pub use document::{Attribute, Document, Element, Node};
pub use error::{Error, Result};
pub use namespace::{classify_local, local_name, name_prefix, ElementRole, NamespaceScope};
pub use position::{CoordFormat, DecodedPosition};
