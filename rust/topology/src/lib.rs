// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofline Topology
//!
//! Turns parsed survey records into closed face loops.
//!
//! The build runs leaf-first, each step taking the previous immutable table
//! as input:
//!
//! 1. [`PointTable`]: point identifier → coordinate
//! 2. [`SegmentTable`]: segment identifier → resolved coordinate path
//! 3. [`reconstruct_loop`]: a face's unordered segment list → one closed loop
//! 4. [`FaceCatalog`]: polygon identifier → loop + metadata
//!
//! Connectivity is detected by exact coordinate equality. Reconstruction is
//! greedy: the first unused segment (in listed order) that continues the
//! chain is taken, and nothing is ever backtracked. Problems along the way
//! are returned as [`roofline_core::Diagnostic`] values, never as errors.

pub mod catalog;
pub mod error;
pub mod face_loop;
pub mod geometry;
pub mod point_table;
pub mod reconstruct;
pub mod segment_table;
pub mod serialization;

pub use catalog::{Face, FaceCatalog, FaceMetadata, FaceStatus};
pub use error::{Error, Result};
pub use face_loop::{FaceLoop, MIN_POLYGON_POINTS};
pub use geometry::coord_point;
pub use point_table::{PointTable, Projection};
pub use reconstruct::{reconstruct_loop, Reconstruction};
pub use segment_table::{Segment, SegmentTable};
pub use serialization::CatalogSnapshot;
