// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment table: segment identifier → resolved coordinate path + metadata.
//!
//! Point identifiers are resolved against a [`PointTable`]. A point that
//! cannot be resolved is dropped from the path and diagnosed; the segment is
//! still built from whatever remains.

use roofline_core::{Coord, Diagnostic, EntityKind, LineRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::point_table::PointTable;

/// A line segment (or polyline) with its geometry resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    /// Coordinates in path order. Start is the first entry, end the last.
    pub path: Vec<Coord>,
    pub category: String,
    pub length: Option<f64>,
    pub unit: String,
    pub slope: Option<Vec<f64>>,
    pub slope_unit: String,
    pub level: String,
}

impl Segment {
    #[inline]
    pub fn start(&self) -> Option<&Coord> {
        self.path.first()
    }

    #[inline]
    pub fn end(&self) -> Option<&Coord> {
        self.path.last()
    }

    /// Whether the segment has any geometry to contribute to a loop.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Immutable lookup of segments by identifier, remembering document order.
///
/// Serializes as the list of segments in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct SegmentTable {
    segments: FxHashMap<String, Segment>,
    /// Identifiers in order of first appearance.
    order: Vec<String>,
}

impl SegmentTable {
    /// Builds the table from parsed line records and a point table.
    ///
    /// Duplicate identifiers overwrite earlier ones (last write wins) but keep
    /// the position of their first appearance.
    pub fn build(points: &PointTable, records: &[LineRecord]) -> (Self, Vec<Diagnostic>) {
        let mut table = Self::default();
        table.segments.reserve(records.len());
        let mut diagnostics = Vec::new();

        for record in records {
            let mut path = Vec::with_capacity(record.path.len());
            for point_id in &record.path {
                match points.get(point_id) {
                    Some(coord) => path.push(coord.clone()),
                    None => diagnostics.push(Diagnostic::reference_not_found(
                        EntityKind::Segment,
                        record.id.clone(),
                        EntityKind::Point,
                        point_id.clone(),
                    )),
                }
            }

            table.insert(Segment {
                id: record.id.clone(),
                path,
                category: record.category.clone(),
                length: record.length,
                unit: record.unit.clone(),
                slope: record.slope.clone(),
                slope_unit: record.slope_unit.clone(),
                level: record.level.clone(),
            });
        }

        (table, diagnostics)
    }

    fn insert(&mut self, segment: Segment) {
        if !self.segments.contains_key(&segment.id) {
            self.order.push(segment.id.clone());
        }
        self.segments.insert(segment.id.clone(), segment);
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.segments.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Segments in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.order.iter().filter_map(|id| self.segments.get(id))
    }

    /// Distinct segment categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.iter()
            .map(|s| s.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

impl From<Vec<Segment>> for SegmentTable {
    fn from(segments: Vec<Segment>) -> Self {
        let mut table = Self::default();
        for segment in segments {
            table.insert(segment);
        }
        table
    }
}

impl From<SegmentTable> for Vec<Segment> {
    fn from(table: SegmentTable) -> Self {
        let SegmentTable { mut segments, order } = table;
        order.iter().filter_map(|id| segments.remove(id)).collect()
    }
}
