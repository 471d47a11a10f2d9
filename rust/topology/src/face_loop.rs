// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed coordinate loops.

use roofline_core::Coord;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Minimum number of distinct coordinates for a loop to be a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// An ordered sequence of coordinates. A non-empty loop produced by the
/// reconstructor is always closed (first == last).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceLoop {
    points: Vec<Coord>,
}

impl FaceLoop {
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coord> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Coord> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Coord> {
        self.points.last()
    }

    /// First and last coordinates are equal. Empty loops are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// The loop without its closing repeat of the first coordinate.
    pub fn vertices(&self) -> &[Coord] {
        if self.points.len() > 1 && self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Number of distinct coordinates (exact equality).
    pub fn distinct_points(&self) -> usize {
        let mut seen: FxHashSet<SmallVec<[u64; 3]>> = FxHashSet::default();
        for coord in &self.points {
            seen.insert(coord.iter().map(|v| coord_bits(*v)).collect());
        }
        seen.len()
    }

    /// Whether the loop has enough distinct coordinates to be rendered as a
    /// polygon.
    pub fn is_valid_polygon(&self) -> bool {
        self.distinct_points() >= MIN_POLYGON_POINTS
    }

    pub(crate) fn push(&mut self, coord: Coord) {
        self.points.push(coord);
    }

    pub(crate) fn extend<I: IntoIterator<Item = Coord>>(&mut self, coords: I) {
        self.points.extend(coords);
    }
}

/// Bit pattern of a component for hashing; `-0.0` and `0.0` compare equal so
/// they must hash equal too.
#[inline]
fn coord_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord {
        Coord::from_slice(&[x, y])
    }

    #[test]
    fn closed_square() {
        let face_loop = FaceLoop::new(vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)]);
        assert!(face_loop.is_closed());
        assert_eq!(face_loop.vertices().len(), 4);
        assert_eq!(face_loop.distinct_points(), 4);
        assert!(face_loop.is_valid_polygon());
    }

    #[test]
    fn empty_loop_is_not_closed() {
        let face_loop = FaceLoop::default();
        assert!(!face_loop.is_closed());
        assert!(face_loop.vertices().is_empty());
        assert_eq!(face_loop.distinct_points(), 0);
        assert!(!face_loop.is_valid_polygon());
    }

    #[test]
    fn back_and_forth_is_degenerate() {
        let face_loop = FaceLoop::new(vec![c(0.0, 0.0), c(5.0, 0.0), c(0.0, 0.0)]);
        assert_eq!(face_loop.distinct_points(), 2);
        assert!(!face_loop.is_valid_polygon());
    }

    #[test]
    fn negative_zero_is_the_same_point() {
        let face_loop = FaceLoop::new(vec![c(0.0, 0.0), c(-0.0, 0.0)]);
        assert_eq!(face_loop.distinct_points(), 1);
        assert!(face_loop.is_closed());
    }
}
