// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the survey pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors. Everything recoverable is a diagnostic instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The survey markup could not be read.
    #[error("survey parse error: {0}")]
    Parse(#[from] roofline_core::Error),

    /// A face catalog snapshot could not be written or read.
    #[error(transparent)]
    Catalog(#[from] roofline_topology::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
