// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face catalog: face identifier → reconstructed loop + metadata.
//!
//! This is the terminal artifact of a survey run. Renderers and exporters
//! consume it; nothing in it is mutated after it is built.

use roofline_core::{Diagnostic, DiagnosticKind, EntityKind, FaceRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::face_loop::{FaceLoop, MIN_POLYGON_POINTS};
use crate::reconstruct::reconstruct_loop;
use crate::segment_table::SegmentTable;
use crate::serialization::CatalogSnapshot;

/// Descriptive fields of a face, coerced but not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceMetadata {
    pub area: Option<f64>,
    pub area_unit: String,
    pub slope: Option<f64>,
    pub slope_unit: String,
    pub orientation: String,
    pub category: String,
    pub material: String,
    pub level: String,
}

impl From<&FaceRecord> for FaceMetadata {
    fn from(record: &FaceRecord) -> Self {
        Self {
            area: record.area,
            area_unit: record.area_unit.clone(),
            slope: record.slope,
            slope_unit: record.slope_unit.clone(),
            orientation: record.orientation.clone(),
            category: record.category.clone(),
            material: record.material.clone(),
            level: record.level.clone(),
        }
    }
}

/// How far reconstruction of a face got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceStatus {
    /// Every segment resolved and the loop closed on its own.
    Complete,
    /// A polygon was built, but a segment was missing or the chain broke.
    Incomplete,
    /// The face lists no segments.
    Empty,
    /// Fewer than three distinct coordinates; not renderable.
    Degenerate,
}

impl FaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceStatus::Complete => "complete",
            FaceStatus::Incomplete => "incomplete",
            FaceStatus::Empty => "empty",
            FaceStatus::Degenerate => "degenerate",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Polygon identifier; the catalog key.
    pub id: String,
    /// Identifier of the enclosing `FACE` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_id: Option<String>,
    #[serde(rename = "loop")]
    pub face_loop: FaceLoop,
    /// Segments in stitching order.
    pub segments: Vec<String>,
    /// Per stitched segment: `true` when walked start → end.
    pub orientations: Vec<bool>,
    /// The loop was closed by appending its first coordinate.
    #[serde(default)]
    pub forced_closure: bool,
    pub status: FaceStatus,
    #[serde(flatten)]
    pub metadata: FaceMetadata,
}

impl Face {
    /// Reconstructs one face from its record.
    pub fn build(record: &FaceRecord, segments: &SegmentTable) -> (Self, Vec<Diagnostic>) {
        let reconstruction = reconstruct_loop(&record.id, &record.segments, segments);
        let complete = reconstruction.is_complete();
        let mut diagnostics = reconstruction.diagnostics;
        let face_loop = reconstruction.face_loop;

        let status = if record.segments.is_empty() {
            FaceStatus::Empty
        } else {
            let distinct_points = face_loop.distinct_points();
            if distinct_points < MIN_POLYGON_POINTS {
                diagnostics.push(Diagnostic::new(
                    EntityKind::Face,
                    record.id.clone(),
                    DiagnosticKind::DegenerateLoop { distinct_points },
                ));
                FaceStatus::Degenerate
            } else if complete {
                FaceStatus::Complete
            } else {
                FaceStatus::Incomplete
            }
        };

        let face = Face {
            id: record.id.clone(),
            face_id: record.face_id.clone(),
            face_loop,
            segments: reconstruction.used,
            orientations: reconstruction.orientations,
            forced_closure: reconstruction.forced_closure,
            status,
            metadata: FaceMetadata::from(record),
        };
        (face, diagnostics)
    }

    /// The loop can be drawn as a polygon.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        matches!(self.status, FaceStatus::Complete | FaceStatus::Incomplete)
    }
}

/// Faces keyed by identifier, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogSnapshot", into = "CatalogSnapshot")]
pub struct FaceCatalog {
    faces: Vec<Face>,
    index: FxHashMap<String, usize>,
}

impl FaceCatalog {
    /// Reconstructs every face record against the segment table.
    pub fn build(records: &[FaceRecord], segments: &SegmentTable) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let faces = records.iter().map(|record| {
            let (face, face_diagnostics) = Face::build(record, segments);
            diagnostics.extend(face_diagnostics);
            face
        });
        let catalog = Self::from_faces(faces);
        (catalog, diagnostics)
    }

    /// Collects already built faces. A repeated identifier replaces the
    /// earlier face but keeps its position.
    pub fn from_faces<I: IntoIterator<Item = Face>>(faces: I) -> Self {
        let mut catalog = Self::default();
        for face in faces {
            match catalog.index.get(&face.id) {
                Some(&slot) => catalog.faces[slot] = face,
                None => {
                    catalog.index.insert(face.id.clone(), catalog.faces.len());
                    catalog.faces.push(face);
                }
            }
        }
        catalog
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Face> {
        self.index.get(id).map(|&slot| &self.faces[slot])
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Face> {
        self.faces.iter()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Faces whose loop can be drawn as a polygon.
    pub fn valid_faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.iter().filter(|f| f.is_renderable())
    }

    /// Drops faces that cannot be rendered.
    pub fn into_renderable(self) -> Self {
        Self::from_faces(self.faces.into_iter().filter(Face::is_renderable))
    }

    /// Distinct materials in order of first appearance.
    pub fn materials(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.faces
            .iter()
            .map(|f| f.metadata.material.as_str())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    /// Number of faces with the given status.
    pub fn count_status(&self, status: FaceStatus) -> usize {
        self.faces.iter().filter(|f| f.status == status).count()
    }
}

impl<'a> IntoIterator for &'a FaceCatalog {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_table::{PointTable, Projection};
    use roofline_core::{Coord, LineRecord, PointRecord};

    fn segments() -> SegmentTable {
        let points: Vec<_> = [
            ("A", [0.0, 0.0]),
            ("B", [10.0, 0.0]),
            ("C", [10.0, 10.0]),
            ("D", [0.0, 10.0]),
        ]
        .iter()
        .map(|(id, xy)| PointRecord {
            id: id.to_string(),
            coord: Coord::from_slice(xy),
        })
        .collect();
        let (points, _) = PointTable::build(&points, Projection::Native);

        let lines: Vec<_> = [("S1", "A", "B"), ("S2", "B", "C"), ("S3", "D", "C"), ("S4", "A", "D")]
            .iter()
            .map(|(id, a, b)| LineRecord {
                id: id.to_string(),
                path: vec![a.to_string(), b.to_string()],
                category: "EAVE".to_string(),
                length: Some(10.0),
                unit: "ft".to_string(),
                slope: None,
                slope_unit: String::new(),
                level: "1".to_string(),
            })
            .collect();
        SegmentTable::build(&points, &lines).0
    }

    fn record(id: &str, members: &[&str], material: &str) -> FaceRecord {
        FaceRecord {
            id: id.to_string(),
            face_id: Some(format!("FACE-{id}")),
            segments: members.iter().map(|s| s.to_string()).collect(),
            area: Some(100.0),
            area_unit: "sqft".to_string(),
            slope: Some(6.0),
            slope_unit: "in/ft".to_string(),
            orientation: "180".to_string(),
            category: "ROOF".to_string(),
            material: material.to_string(),
            level: "1".to_string(),
        }
    }

    #[test]
    fn complete_face_keeps_metadata() {
        let (catalog, diagnostics) =
            FaceCatalog::build(&[record("P1", &["S1", "S2", "S3", "S4"], "Shingle")], &segments());

        assert!(diagnostics.is_empty());
        let face = catalog.get("P1").unwrap();
        assert_eq!(face.status, FaceStatus::Complete);
        assert_eq!(face.face_loop.len(), 5);
        assert!(face.face_loop.is_closed());
        assert_eq!(face.face_id.as_deref(), Some("FACE-P1"));
        assert_eq!(face.metadata.area, Some(100.0));
        assert_eq!(face.metadata.material, "Shingle");
        assert!(face.is_renderable());
        assert!(!face.forced_closure);
        assert_eq!(face.orientations, [true, true, false, false]);
    }

    #[test]
    fn statuses() {
        let (catalog, diagnostics) = FaceCatalog::build(
            &[
                record("P1", &["S1", "S2", "S3", "S4"], "Shingle"),
                record("P2", &["S1", "S2", "S3", "S9"], "Shingle"),
                record("P3", &[], "Metal"),
                record("P4", &["S1"], "Metal"),
            ],
            &segments(),
        );

        assert_eq!(catalog.get("P1").unwrap().status, FaceStatus::Complete);
        assert_eq!(catalog.get("P2").unwrap().status, FaceStatus::Incomplete);
        assert_eq!(catalog.get("P3").unwrap().status, FaceStatus::Empty);
        assert_eq!(catalog.get("P4").unwrap().status, FaceStatus::Degenerate);
        assert_eq!(catalog.count_status(FaceStatus::Complete), 1);

        let valid: Vec<_> = catalog.valid_faces().map(|f| f.id.as_str()).collect();
        assert_eq!(valid, ["P1", "P2"]);

        assert!(diagnostics.iter().any(|d| d.id == "P3" && d.kind == DiagnosticKind::EmptyFace));
        assert!(diagnostics
            .iter()
            .any(|d| d.id == "P4" && d.kind == DiagnosticKind::DegenerateLoop { distinct_points: 2 }));
    }

    #[test]
    fn duplicate_face_ids_last_write_wins() {
        let (catalog, _) = FaceCatalog::build(
            &[
                record("P1", &["S1"], "Shingle"),
                record("P2", &["S1", "S2", "S3", "S4"], "Tile"),
                record("P1", &["S1", "S2", "S3", "S4"], "Metal"),
            ],
            &segments(),
        );

        assert_eq!(catalog.len(), 2);
        let ids: Vec<_> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["P1", "P2"]);
        assert_eq!(catalog.get("P1").unwrap().metadata.material, "Metal");
    }

    #[test]
    fn materials_and_renderable_filter() {
        let (catalog, _) = FaceCatalog::build(
            &[
                record("P1", &["S1", "S2", "S3", "S4"], "Shingle"),
                record("P2", &[], "Metal"),
                record("P3", &["S4", "S3", "S2", "S1"], "Shingle"),
            ],
            &segments(),
        );

        assert_eq!(catalog.materials(), ["Shingle", "Metal"]);

        let renderable = catalog.into_renderable();
        assert_eq!(renderable.len(), 2);
        assert!(renderable.get("P2").is_none());
        assert!(renderable.get("P3").is_some());
    }
}
