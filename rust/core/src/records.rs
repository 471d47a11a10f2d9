// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed survey records produced by the validated parse step.

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A spatial coordinate with two or three components.
///
/// Equality is exact component equality; it is the only connectivity test
/// used when stitching segments together.
pub type Coord = SmallVec<[f64; 3]>;

/// `POINTS/POINT`: a named coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    pub id: String,
    pub coord: Coord,
}

/// `LINES/LINE`: a segment as a path of point identifiers plus metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRecord {
    pub id: String,
    /// Point identifiers in path order (`PATH`).
    pub path: Vec<String>,
    /// Category label such as `RIDGE` or `EAVE` (`TYPE`).
    pub category: String,
    /// Measured length (`LENGTH`), `None` if absent or malformed.
    pub length: Option<f64>,
    /// Unit of measure for the length (`UOM`).
    pub unit: String,
    /// Slope vector (`PITCH`), `None` if absent or malformed.
    pub slope: Option<Vec<f64>>,
    /// Unit of the slope (`PITCHUOM`).
    pub slope_unit: String,
    /// Level or story label (`STOREY`).
    pub level: String,
}

/// `FACES/FACE/POLYGON`: a face boundary as an unordered list of segment
/// identifiers plus metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceRecord {
    /// Polygon identifier (`POLYGON@ID`).
    pub id: String,
    /// Identifier of the enclosing `FACE`, when it has one.
    pub face_id: Option<String>,
    /// Segment identifiers (`PATH`); order carries no meaning.
    pub segments: Vec<String>,
    /// Declared area (`SIZE`).
    pub area: Option<f64>,
    pub area_unit: String,
    /// Declared pitch (`PITCH`).
    pub slope: Option<f64>,
    pub slope_unit: String,
    pub orientation: String,
    /// Category label (`TYPE`).
    pub category: String,
    /// Material (`MAT`).
    pub material: String,
    /// Level or story label (`STOREY`).
    pub level: String,
}
