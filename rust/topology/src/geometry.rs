// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric queries on reconstructed loops and segments.
//!
//! Two-component coordinates are lifted to `z = 0`, so the same formulas
//! serve plan (2D) and model (3D) surveys.

use nalgebra::{Point3, Vector3};
use roofline_core::Coord;

use crate::face_loop::FaceLoop;
use crate::segment_table::Segment;

/// Returns a coordinate as a nalgebra Point3, missing components as zero.
pub fn coord_point(coord: &Coord) -> Point3<f64> {
    let get = |i: usize| coord.get(i).copied().unwrap_or(0.0);
    Point3::new(get(0), get(1), get(2))
}

impl FaceLoop {
    /// Newell's sum over the loop's edges: a vector normal to the loop whose
    /// length is twice the enclosed area.
    fn newell(&self) -> Vector3<f64> {
        let verts = self.vertices();
        let n = verts.len();
        let mut normal = Vector3::new(0.0, 0.0, 0.0);

        for i in 0..n {
            let curr = coord_point(&verts[i]);
            let next = coord_point(&verts[(i + 1) % n]);

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        normal
    }

    /// Unit normal following the right-hand rule for the loop's winding.
    ///
    /// Returns `None` for loops with fewer than 3 vertices or zero area.
    pub fn normal(&self) -> Option<Vector3<f64>> {
        if self.vertices().len() < 3 {
            return None;
        }

        let normal = self.newell();
        let len = normal.norm();
        if len < 1e-15 {
            return None; // degenerate loop
        }

        Some(normal / len)
    }

    /// Area enclosed by the loop, assuming it is planar.
    pub fn planar_area(&self) -> f64 {
        if self.vertices().len() < 3 {
            return 0.0;
        }
        self.newell().norm() / 2.0
    }

    /// Vertex average of the loop, not counting the closing repeat.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        let verts = self.vertices();
        if verts.is_empty() {
            return None;
        }

        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        for coord in verts {
            sum += coord_point(coord).coords;
        }

        Some(Point3::from(sum / verts.len() as f64))
    }
}

impl Segment {
    /// Euclidean length along the resolved path.
    ///
    /// This is computed from geometry; the declared `length` is kept as-is.
    pub fn path_length(&self) -> f64 {
        self.path
            .windows(2)
            .map(|pair| (coord_point(&pair[1]) - coord_point(&pair[0])).norm())
            .sum()
    }
}
