// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geodesy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a CRS or transforming coordinates
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported CRS identifier: {0}")]
    UnsupportedCrs(String),

    #[error("transform failed: {0}")]
    Transform(String),
}
