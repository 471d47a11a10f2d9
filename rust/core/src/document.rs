// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Survey document: the validated parse step from elements to records.
//!
//! Layout of a survey export:
//!
//! ```text
//! POINTS/POINT        ID, DATA="x,y[,z]"
//! LINES/LINE          ID, PATH="P1,P2", TYPE, LENGTH, UOM, PITCH="a,b", PITCHUOM, STOREY
//! FACES/FACE          ID
//!   POLYGON           ID, PATH="L1,L2,..", SIZE, SIZEUOM, PITCH, PITCHUOM,
//!                     ORIENTATION, TYPE, MAT, STOREY
//! ```
//!
//! Identifiers and geometry (`ID`, `DATA`, `PATH`) are required; an element
//! missing one is skipped. Numeric metadata that fails to parse is kept as
//! `None`. Both cases are reported as `MalformedField` diagnostics.

use crate::attributes::{AttributeBag, FieldError};
use crate::diagnostic::{Diagnostic, EntityKind};
use crate::error::Result;
use crate::records::{FaceRecord, LineRecord, PointRecord};
use crate::xml::{parse_xml, Element};

/// Placeholder identifier for elements without an `ID`.
pub const UNKNOWN_ID: &str = "?";

/// Typed contents of one survey file, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDocument {
    pub points: Vec<PointRecord>,
    pub lines: Vec<LineRecord>,
    pub faces: Vec<FaceRecord>,
    /// Problems found while reading records.
    pub diagnostics: Vec<Diagnostic>,
}

impl SurveyDocument {
    /// Parses survey XML text.
    ///
    /// Fails only on malformed markup; record-level problems end up in
    /// [`SurveyDocument::diagnostics`].
    pub fn parse(content: &str) -> Result<Self> {
        let root = parse_xml(content)?;
        Ok(Self::from_element(&root))
    }

    /// Extracts records from an already parsed element tree.
    pub fn from_element(root: &Element) -> Self {
        let mut doc = Self::default();

        for element in root.select("POINTS", "POINT") {
            if let Some(point) = doc.read_point(&element.attributes) {
                doc.points.push(point);
            }
        }

        for element in root.select("LINES", "LINE") {
            if let Some(line) = doc.read_line(&element.attributes) {
                doc.lines.push(line);
            }
        }

        for face in root.select("FACES", "FACE") {
            let face_id = face.attr("ID").map(str::to_string);
            let mut polygons = face.children_named("POLYGON").peekable();

            if polygons.peek().is_none() {
                let owner = face_id.as_deref().unwrap_or(UNKNOWN_ID);
                doc.diagnostics.push(Diagnostic::reference_not_found(
                    EntityKind::Face,
                    owner,
                    EntityKind::Polygon,
                    owner,
                ));
                continue;
            }

            for polygon in polygons {
                if let Some(record) = doc.read_polygon(&polygon.attributes, face_id.clone()) {
                    doc.faces.push(record);
                }
            }
        }

        doc
    }

    fn read_point(&mut self, attrs: &AttributeBag) -> Option<PointRecord> {
        let id = self.required_id(EntityKind::Point, attrs)?;
        match attrs.float_list("DATA") {
            Ok(coord) => Some(PointRecord { id, coord }),
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::malformed_field(EntityKind::Point, id, &e));
                None
            }
        }
    }

    fn read_line(&mut self, attrs: &AttributeBag) -> Option<LineRecord> {
        let id = self.required_id(EntityKind::Segment, attrs)?;
        let path = match attrs.id_list("PATH") {
            Ok(path) if path.is_empty() => {
                let error = FieldError::Malformed {
                    attribute: "PATH".to_string(),
                    value: attrs.text_or_empty("PATH").to_string(),
                };
                self.diagnostics
                    .push(Diagnostic::malformed_field(EntityKind::Segment, id, &error));
                return None;
            }
            Ok(path) => path,
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::malformed_field(EntityKind::Segment, id, &e));
                return None;
            }
        };

        let length = self.optional(EntityKind::Segment, &id, attrs.float("LENGTH"));
        let slope = self
            .optional(EntityKind::Segment, &id, attrs.float_list("PITCH"))
            .map(|v| v.into_vec());

        Some(LineRecord {
            path,
            category: attrs.text_or_empty("TYPE").to_string(),
            length,
            unit: attrs.text_or_empty("UOM").to_string(),
            slope,
            slope_unit: attrs.text_or_empty("PITCHUOM").to_string(),
            level: attrs.text_or_empty("STOREY").to_string(),
            id,
        })
    }

    fn read_polygon(&mut self, attrs: &AttributeBag, face_id: Option<String>) -> Option<FaceRecord> {
        let id = self.required_id(EntityKind::Polygon, attrs)?;
        let segments = match attrs.id_list("PATH") {
            Ok(segments) => segments,
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::malformed_field(EntityKind::Polygon, id, &e));
                return None;
            }
        };

        let area = self.optional(EntityKind::Polygon, &id, attrs.float("SIZE"));
        let slope = self.optional(EntityKind::Polygon, &id, attrs.float("PITCH"));

        Some(FaceRecord {
            face_id,
            segments,
            area,
            area_unit: attrs.text_or_empty("SIZEUOM").to_string(),
            slope,
            slope_unit: attrs.text_or_empty("PITCHUOM").to_string(),
            orientation: attrs.text_or_empty("ORIENTATION").to_string(),
            category: attrs.text_or_empty("TYPE").to_string(),
            material: attrs.text_or_empty("MAT").to_string(),
            level: attrs.text_or_empty("STOREY").to_string(),
            id,
        })
    }

    fn required_id(&mut self, entity: EntityKind, attrs: &AttributeBag) -> Option<String> {
        match attrs.text("ID") {
            Ok(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Ok(raw) => {
                let error = FieldError::Malformed {
                    attribute: "ID".to_string(),
                    value: raw.to_string(),
                };
                self.diagnostics
                    .push(Diagnostic::malformed_field(entity, UNKNOWN_ID, &error));
                None
            }
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::malformed_field(entity, UNKNOWN_ID, &e));
                None
            }
        }
    }

    /// Keeps a metadata value. Absent values are simply `None`; malformed
    /// ones are flagged.
    fn optional<T>(
        &mut self,
        entity: EntityKind,
        id: &str,
        value: std::result::Result<T, FieldError>,
    ) -> Option<T> {
        match value {
            Ok(value) => Some(value),
            Err(FieldError::Missing(_)) => None,
            Err(e) => {
                self.diagnostics
                    .push(Diagnostic::malformed_field(entity, id, &e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    const SURVEY: &str = r#"<?xml version="1.0"?>
<EAGLEVIEW_EXPORT>
  <STRUCTURES>
    <ROOF ID="ROOF1">
      <POINTS>
        <POINT ID="C1" DATA="0,0,0"/>
        <POINT ID="C2" DATA="10,0,0"/>
        <POINT ID="C3" DATA="10,10,2.5"/>
        <POINT ID="BAD" DATA="1,x,2"/>
        <POINT DATA="5,5,5"/>
      </POINTS>
      <LINES>
        <LINE ID="L1" PATH="C1,C2" TYPE="EAVE" LENGTH="10" UOM="ft" PITCH="0,0" PITCHUOM="in/ft" STOREY="1"/>
        <LINE ID="L2" PATH="C2,C3" TYPE="RAKE" LENGTH="abc" UOM="ft" PITCH="6,12" PITCHUOM="in/ft" STOREY="1"/>
        <LINE ID="L3" TYPE="HIP"/>
      </LINES>
      <FACES>
        <FACE ID="F1">
          <POLYGON ID="P1" PATH="L1,L2" SIZE="50.5" SIZEUOM="sqft" PITCH="6" PITCHUOM="in/ft"
                   ORIENTATION="180" TYPE="ROOF" MAT="Asphalt Shingle" STOREY="1"/>
        </FACE>
        <FACE ID="F2"/>
      </FACES>
    </ROOF>
  </STRUCTURES>
</EAGLEVIEW_EXPORT>"#;

    #[test]
    fn test_points_are_read_and_bad_ones_flagged() {
        let doc = SurveyDocument::parse(SURVEY).unwrap();

        let ids: Vec<_> = doc.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["C1", "C2", "C3"]);
        assert_eq!(doc.points[2].coord.as_slice(), &[10.0, 10.0, 2.5]);

        assert!(doc.diagnostics.iter().any(|d| d.entity == EntityKind::Point
            && d.id == "BAD"
            && matches!(&d.kind, DiagnosticKind::MalformedField { attribute, .. } if attribute == "DATA")));
        assert!(doc.diagnostics.iter().any(|d| d.entity == EntityKind::Point
            && d.id == UNKNOWN_ID
            && matches!(&d.kind, DiagnosticKind::MalformedField { attribute, .. } if attribute == "ID")));
    }

    #[test]
    fn test_lines_keep_metadata_verbatim() {
        let doc = SurveyDocument::parse(SURVEY).unwrap();

        assert_eq!(doc.lines.len(), 2);
        let l1 = &doc.lines[0];
        assert_eq!(l1.path, ["C1", "C2"]);
        assert_eq!(l1.category, "EAVE");
        assert_eq!(l1.length, Some(10.0));
        assert_eq!(l1.slope.as_deref(), Some(&[0.0, 0.0][..]));
        assert_eq!(l1.slope_unit, "in/ft");

        let l2 = &doc.lines[1];
        assert_eq!(l2.length, None);
        assert_eq!(l2.slope.as_deref(), Some(&[6.0, 12.0][..]));
        assert!(doc.diagnostics.iter().any(|d| d.id == "L2"
            && matches!(&d.kind, DiagnosticKind::MalformedField { attribute, .. } if attribute == "LENGTH")));
        assert!(doc.diagnostics.iter().any(|d| d.id == "L3"
            && matches!(&d.kind, DiagnosticKind::MalformedField { attribute, .. } if attribute == "PATH")));
    }

    #[test]
    fn test_faces_and_missing_polygon() {
        let doc = SurveyDocument::parse(SURVEY).unwrap();

        assert_eq!(doc.faces.len(), 1);
        let face = &doc.faces[0];
        assert_eq!(face.id, "P1");
        assert_eq!(face.face_id.as_deref(), Some("F1"));
        assert_eq!(face.segments, ["L1", "L2"]);
        assert_eq!(face.area, Some(50.5));
        assert_eq!(face.slope, Some(6.0));
        assert_eq!(face.material, "Asphalt Shingle");
        assert_eq!(face.orientation, "180");

        assert!(doc.diagnostics.contains(&Diagnostic::reference_not_found(
            EntityKind::Face,
            "F2",
            EntityKind::Polygon,
            "F2",
        )));
    }

    #[test]
    fn test_every_polygon_of_a_face_is_read() {
        let doc = SurveyDocument::parse(
            r#"<R><FACES><FACE ID="F"><POLYGON ID="A" PATH="L1"/><POLYGON ID="B" PATH=""/></FACE></FACES></R>"#,
        )
        .unwrap();

        let ids: Vec<_> = doc.faces.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert!(doc.faces[1].segments.is_empty());
        assert!(doc.faces.iter().all(|f| f.face_id.as_deref() == Some("F")));
        assert_eq!(doc.faces[0].area, None);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_line_with_blank_path_is_skipped() {
        let doc = SurveyDocument::parse(r#"<R><LINES><LINE ID="L9" PATH=" , " TYPE="VALLEY"/></LINES></R>"#).unwrap();

        assert!(doc.lines.is_empty());
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(doc.diagnostics[0].id, "L9");
        assert_eq!(
            doc.diagnostics[0].kind,
            DiagnosticKind::MalformedField {
                attribute: "PATH".to_string(),
                reason: "attribute PATH has malformed value \" , \"".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_markup_is_fatal() {
        assert!(SurveyDocument::parse("<R><POINTS></R>").is_err());
    }
}
