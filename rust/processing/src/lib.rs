// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofline Processing
//!
//! End-to-end survey pipeline: reads survey markup, builds the point and
//! segment tables, reconstructs every face loop and collects the results
//! with their diagnostics.
//!
//! ```rust,no_run
//! use roofline_processing::{process_survey, ProcessingConfig};
//!
//! let content = std::fs::read_to_string("survey.xml")?;
//! let result = process_survey(&content, &ProcessingConfig::from_env())?;
//!
//! for face in result.catalog.valid_faces() {
//!     println!("{}: {} points", face.id, face.face_loop.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Progress is reported through `tracing`; install a subscriber to see it.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::ProcessingConfig;
pub use error::{Error, Result};
pub use pipeline::{process_document, process_survey};
pub use types::{SurveyResult, SurveyStats};
