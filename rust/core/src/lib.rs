// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofline Core
//!
//! Reader for roof survey exports and the typed records they contain.
//!
//! ## Overview
//!
//! - **XML Reading**: a [quick-xml](https://docs.rs/quick-xml) based reader for the
//!   attribute-only XML dialect used by survey exports
//! - **Typed Records**: points, lines and face polygons produced by a single
//!   validated parse step
//! - **Diagnostics**: structured, non-fatal problem reports shared by every
//!   stage of the pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use roofline_core::SurveyDocument;
//!
//! let content = r#"<SURVEY>
//!   <POINTS><POINT ID="A" DATA="0,0"/><POINT ID="B" DATA="10,0"/></POINTS>
//!   <LINES><LINE ID="S1" PATH="A,B" TYPE="EAVE" LENGTH="10"/></LINES>
//! </SURVEY>"#;
//!
//! let doc = SurveyDocument::parse(content).unwrap();
//! assert_eq!(doc.points.len(), 2);
//! assert_eq!(doc.lines[0].path, ["A", "B"]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for records and diagnostics

pub mod attributes;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod records;
pub mod xml;

pub use attributes::{AttributeBag, FieldError};
pub use diagnostic::{Diagnostic, DiagnosticKind, EntityKind};
pub use document::{SurveyDocument, UNKNOWN_ID};
pub use error::{Error, Result};
pub use records::{Coord, FaceRecord, LineRecord, PointRecord};
pub use xml::{parse_xml, Element};
