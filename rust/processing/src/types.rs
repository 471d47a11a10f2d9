// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline output types.

use roofline_core::Diagnostic;
use roofline_topology::{FaceCatalog, FaceStatus, SegmentTable};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Everything a survey run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResult {
    pub segments: SegmentTable,
    pub catalog: FaceCatalog,
    /// Parse, point, segment and face diagnostics, in that order.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: SurveyStats,
}

impl SurveyResult {
    /// Serializes the whole result to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes only the face catalog.
    pub fn catalog_json(&self) -> Result<String> {
        Ok(self.catalog.to_json()?)
    }

    /// Diagnostics attached to one entity.
    pub fn diagnostics_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.id == id)
    }
}

/// Survey processing statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyStats {
    /// Points in the point table.
    pub points: usize,
    /// Segments in the segment table.
    pub segments: usize,
    /// Faces reconstructed, before any invalid ones were dropped.
    pub faces: usize,
    pub complete_faces: usize,
    pub incomplete_faces: usize,
    pub empty_faces: usize,
    pub degenerate_faces: usize,
    pub diagnostics: usize,
    /// Time spent reading the markup (ms).
    pub parse_time_ms: u64,
    /// Time spent building tables and faces (ms).
    pub build_time_ms: u64,
    /// Total processing time (ms).
    pub total_time_ms: u64,
}

impl SurveyStats {
    pub(crate) fn count_faces(&mut self, catalog: &FaceCatalog) {
        self.faces = catalog.len();
        self.complete_faces = catalog.count_status(FaceStatus::Complete);
        self.incomplete_faces = catalog.count_status(FaceStatus::Incomplete);
        self.empty_faces = catalog.count_status(FaceStatus::Empty);
        self.degenerate_faces = catalog.count_status(FaceStatus::Degenerate);
    }
}
