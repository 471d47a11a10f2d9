// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop reconstruction by chain chasing.
//!
//! A face lists its boundary segments in no particular order and with no
//! particular direction. The only join key is coordinate equality between
//! segment endpoints, so the loop is grown greedily from a seed segment: at
//! each step the first unused segment (in listed order) whose start or end
//! equals the current tail is appended, reversed when it is its end that
//! matches.
//!
//! The scan is O(k²) for a face of k segments. There is no backtracking: when
//! several segments share the tail (branching topology) the first listed one
//! wins, and when none does the chase stops and the partial loop is returned
//! with a [`DiagnosticKind::ChainBroken`] diagnostic.

use roofline_core::{Coord, Diagnostic, DiagnosticKind, EntityKind};
use rustc_hash::FxHashSet;

use crate::face_loop::FaceLoop;
use crate::segment_table::{Segment, SegmentTable};

/// Outcome of reconstructing one face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconstruction {
    pub face_loop: FaceLoop,
    /// Segment identifiers in the order they were stitched.
    pub used: Vec<String>,
    /// `true` if `used[i]` was traversed start → end, `false` if reversed.
    pub orientations: Vec<bool>,
    /// Listed identifiers that could not contribute geometry: absent from the
    /// segment table, or present with an empty path.
    pub unresolved: Vec<String>,
    /// The chase stopped before every resolvable segment was used.
    pub chain_broken: bool,
    /// The closing coordinate had to be appended because the chain did not
    /// return to its start.
    pub forced_closure: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconstruction {
    /// Every listed segment resolved and the chain closed on its own.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && !self.chain_broken && !self.forced_closure
    }

    fn diagnose(&mut self, face_id: &str, kind: DiagnosticKind) {
        self.diagnostics
            .push(Diagnostic::new(EntityKind::Face, face_id, kind));
    }
}

/// Stitches a face's segments into one closed loop.
///
/// `members` is the face's segment list as declared; repeated identifiers are
/// used once. Never fails: unresolved references, broken chains and empty
/// membership are reported in [`Reconstruction::diagnostics`].
///
/// # Example
///
/// ```
/// use roofline_core::{Coord, LineRecord, PointRecord};
/// use roofline_topology::{reconstruct_loop, PointTable, Projection, SegmentTable};
///
/// let point = |id: &str, x: f64, y: f64| PointRecord { id: id.into(), coord: Coord::from_slice(&[x, y]) };
/// let line = |id: &str, a: &str, b: &str| LineRecord {
///     id: id.into(),
///     path: vec![a.into(), b.into()],
///     category: String::new(),
///     length: None,
///     unit: String::new(),
///     slope: None,
///     slope_unit: String::new(),
///     level: String::new(),
/// };
///
/// let (points, _) = PointTable::build(
///     &[point("A", 0.0, 0.0), point("B", 1.0, 0.0), point("C", 0.0, 1.0)],
///     Projection::Native,
/// );
/// let (segments, _) = SegmentTable::build(&points, &[line("S1", "A", "B"), line("S2", "C", "B"), line("S3", "C", "A")]);
///
/// let members = ["S1".to_string(), "S3".to_string(), "S2".to_string()];
/// let result = reconstruct_loop("F1", &members, &segments);
/// assert!(result.is_complete());
/// assert_eq!(result.face_loop.len(), 4);
/// assert_eq!(result.used, ["S1", "S2", "S3"]);
/// ```
pub fn reconstruct_loop(face_id: &str, members: &[String], segments: &SegmentTable) -> Reconstruction {
    let mut result = Reconstruction::default();

    if members.is_empty() {
        result.diagnose(face_id, DiagnosticKind::EmptyFace);
        return result;
    }

    // Resolve membership once, keeping listed order.
    let mut listed = FxHashSet::default();
    let mut candidates: Vec<&Segment> = Vec::with_capacity(members.len());
    for id in members {
        if !listed.insert(id.as_str()) {
            continue;
        }
        match segments.get(id) {
            Some(segment) if segment.is_traversable() => candidates.push(segment),
            // Absent, or every point of its path failed to resolve.
            _ => {
                result.unresolved.push(id.clone());
                result.diagnose(
                    face_id,
                    DiagnosticKind::ReferenceNotFound {
                        kind: EntityKind::Segment,
                        id: id.clone(),
                    },
                );
            }
        }
    }

    let Some((seed, rest)) = candidates.split_first() else {
        return result;
    };

    let mut face_loop = FaceLoop::new(seed.path.clone());
    result.used.push(seed.id.clone());
    result.orientations.push(true);

    let mut used = vec![false; rest.len()];
    let mut remaining = rest.len();

    while remaining > 0 {
        let Some(tail) = face_loop.last().cloned() else {
            break;
        };

        match find_continuation(rest, &used, &tail) {
            Some((index, forward)) => {
                let path = &rest[index].path;
                if forward {
                    face_loop.extend(path.iter().skip(1).cloned());
                } else {
                    face_loop.extend(path.iter().rev().skip(1).cloned());
                }
                used[index] = true;
                remaining -= 1;
                result.used.push(rest[index].id.clone());
                result.orientations.push(forward);
            }
            None => {
                let stranded = rest
                    .iter()
                    .zip(&used)
                    .filter(|(_, taken)| !**taken)
                    .map(|(s, _)| s.id.clone())
                    .collect();
                result.chain_broken = true;
                result.diagnose(face_id, DiagnosticKind::ChainBroken { tail, stranded });
                break;
            }
        }
    }

    close_loop(&mut face_loop, face_id, &mut result);
    result.face_loop = face_loop;
    result
}

/// First unused segment, in listed order, that starts or ends at `tail`.
/// Returns its index and whether it is traversed forward.
fn find_continuation(candidates: &[&Segment], used: &[bool], tail: &Coord) -> Option<(usize, bool)> {
    candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| !used[*i])
        .find_map(|(i, segment)| {
            if segment.start() == Some(tail) {
                Some((i, true))
            } else if segment.end() == Some(tail) {
                Some((i, false))
            } else {
                None
            }
        })
}

/// Appends the first coordinate if the loop does not already end on it.
fn close_loop(face_loop: &mut FaceLoop, face_id: &str, result: &mut Reconstruction) {
    let (Some(first), Some(last)) = (face_loop.first(), face_loop.last()) else {
        return;
    };
    if first == last {
        return;
    }

    let first = first.clone();
    if !result.chain_broken {
        let tail = last.clone();
        result.diagnose(
            face_id,
            DiagnosticKind::ChainBroken {
                tail,
                stranded: Vec::new(),
            },
        );
    }
    face_loop.push(first);
    result.forced_closure = true;
}
