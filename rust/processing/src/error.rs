// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while splitting a city model.
///
/// [`Error::Document`] from the initial parse is fatal to the run; every
/// other variant is caught at the exporter boundary and fails only the
/// building it belongs to.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no positions in building")]
    EmptyGeometry,

    #[error(transparent)]
    Document(#[from] gmlsplit_core::Error),

    #[error(transparent)]
    Transform(#[from] gmlsplit_geodesy::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: gmlsplit_core::Error,
    },

    #[error("document has no feature container to receive the building")]
    MissingContainer,
}
