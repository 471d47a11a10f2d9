// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for face catalog operations.
//!
//! Reconstruction itself never fails; malformed topology is reported through
//! diagnostics. Only snapshot (de)serialization can return an [`Error`].

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
