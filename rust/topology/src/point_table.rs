// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point table: point identifier → coordinate.

use std::str::FromStr;

use roofline_core::{Coord, Diagnostic, DiagnosticKind, EntityKind, PointRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// How point coordinates are taken from the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Keep every component as written (2D or 3D).
    #[default]
    Native,
    /// Keep only `(x, y)`; points with fewer than two components are rejected.
    Planar,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Native => "native",
            Projection::Planar => "planar",
        }
    }

    /// Projects a source coordinate; `None` when it has fewer components than
    /// the projection keeps.
    fn apply(&self, coord: &Coord) -> Option<Coord> {
        match self {
            Projection::Native => Some(coord.clone()),
            Projection::Planar => coord.get(..PLANAR_COMPONENTS).map(Coord::from_slice),
        }
    }
}

/// Components kept by [`Projection::Planar`].
const PLANAR_COMPONENTS: usize = 2;

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "3d" => Ok(Projection::Native),
            "planar" | "2d" => Ok(Projection::Planar),
            other => Err(format!("unknown projection: {other}")),
        }
    }
}

/// Immutable lookup of point coordinates by identifier.
#[derive(Debug, Clone, Default)]
pub struct PointTable {
    points: FxHashMap<String, Coord>,
    projection: Projection,
}

impl PointTable {
    /// Builds the table from parsed point records.
    ///
    /// Duplicate identifiers keep the last coordinate.
    pub fn build(records: &[PointRecord], projection: Projection) -> (Self, Vec<Diagnostic>) {
        let mut points = FxHashMap::default();
        points.reserve(records.len());
        let mut diagnostics = Vec::new();

        for record in records {
            match projection.apply(&record.coord) {
                Some(coord) => {
                    points.insert(record.id.clone(), coord);
                }
                None => diagnostics.push(Diagnostic::new(
                    EntityKind::Point,
                    record.id.clone(),
                    DiagnosticKind::InsufficientDimensions {
                        components: record.coord.len(),
                        required: PLANAR_COMPONENTS,
                    },
                )),
            }
        }

        (Self { points, projection }, diagnostics)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Coord> {
        self.points.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}
