// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Template extraction
//!
//! Every output file wraps its single building in the same shell: the input
//! root with its namespace declarations and metadata children, plus exactly
//! one emptied feature container. The template is built once and deep-copied
//! per export.

use gmlsplit_core::{Document, Element, ElementRole, Node};

/// Build the reusable output shell from a parsed city model.
///
/// The first feature container is kept but stripped of its buildings; later
/// feature containers are dropped; all other root children survive. An input
/// without any feature container yields a template without one, which is
/// fine because such an input also has no buildings to export.
pub fn extract_template(document: &Document) -> Document {
    let mut template = document.clone();

    let mut container_kept = false;
    template.root.retain_child_elements(|child| {
        if child.role() != ElementRole::FeatureContainer {
            return true;
        }
        if container_kept {
            false
        } else {
            container_kept = true;
            true
        }
    });

    if let Some(container) = first_container_mut(&mut template.root) {
        container.retain_child_elements(|child| child.role() != ElementRole::Building);
    }

    template
}

/// First feature container among the direct children, mutable.
pub(crate) fn first_container_mut(root: &mut Element) -> Option<&mut Element> {
    root.children.iter_mut().find_map(|node| match node {
        Node::Element(e) if e.role() == ElementRole::FeatureContainer => Some(e),
        _ => None,
    })
}
