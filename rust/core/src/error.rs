// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, decoding or writing documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    NoRoot,

    #[error("invalid position text: {0}")]
    InvalidPosition(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
