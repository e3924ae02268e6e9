// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Qualified-name helpers and semantic role classification
//!
//! CityGML documents in the wild bind the same namespaces to different
//! prefixes, so the pipeline recognizes elements by the local part of the
//! tag name only. The namespace URIs stay available through
//! [`NamespaceScope`] so new elements can be created under the prefix the
//! document actually declares.

use rustc_hash::FxHashMap;

use crate::document::Element;

/// The GML namespace URI family (`…/gml`, `…/gml/3.2`).
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// Semantic role of an element within a city model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// `cityObjectMember`: groups building features under the root
    FeatureContainer,
    /// `Building`: one structure's geometry subtree
    Building,
    /// `pos`: one 3D vertex as coordinate text
    Position,
    Other,
}

/// Classify a local tag name (prefix already removed).
#[inline]
pub fn classify_local(local: &str) -> ElementRole {
    match local {
        "cityObjectMember" => ElementRole::FeatureContainer,
        "Building" => ElementRole::Building,
        "pos" => ElementRole::Position,
        _ => ElementRole::Other,
    }
}

/// Local part of a qualified name (`bldg:Building` -> `Building`).
#[inline]
pub fn local_name(qualified: &str) -> &str {
    match qualified.rfind(':') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

/// Prefix part of a qualified name, if any (`bldg:Building` -> `bldg`).
#[inline]
pub fn name_prefix(qualified: &str) -> Option<&str> {
    qualified.rfind(':').map(|pos| &qualified[..pos])
}

/// Prefix -> namespace URI table collected from one element's `xmlns`
/// declarations (normally the document root).
#[derive(Debug, Clone, Default)]
pub struct NamespaceScope {
    prefixes: FxHashMap<String, String>,
    /// Declaration order, for deterministic lookup among duplicates
    order: Vec<String>,
}

impl NamespaceScope {
    /// Collect `xmlns` / `xmlns:p` attributes from an element.
    pub fn from_element(element: &Element) -> Self {
        let mut scope = Self::default();
        for attr in &element.attributes {
            let prefix = if attr.name == "xmlns" {
                Some("")
            } else {
                attr.name.strip_prefix("xmlns:")
            };
            if let Some(prefix) = prefix {
                if !scope.prefixes.contains_key(prefix) {
                    scope.order.push(prefix.to_string());
                }
                scope.prefixes.insert(prefix.to_string(), attr.value.clone());
            }
        }
        scope
    }

    /// URI bound to a prefix (`""` for the default namespace).
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// First declared prefix bound to `uri_base` or a versioned form of it
    /// (`uri_base` followed by `/`, as in `…/gml/3.2`).
    pub fn prefix_for(&self, uri_base: &str) -> Option<&str> {
        self.order
            .iter()
            .find(|p| {
                self.prefixes.get(p.as_str()).is_some_and(|uri| {
                    uri.strip_prefix(uri_base)
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
                })
            })
            .map(String::as_str)
    }

    /// Prefix bound to the GML namespace, if declared.
    pub fn gml_prefix(&self) -> Option<&str> {
        self.prefix_for(GML_NAMESPACE)
    }

    /// Build a qualified name under the GML prefix of this scope, falling
    /// back to the bare local name when no GML binding exists.
    pub fn gml_name(&self, local: &str) -> String {
        match self.gml_prefix() {
            Some("") | None => local.to_string(),
            Some(prefix) => format!("{prefix}:{local}"),
        }
    }
}
