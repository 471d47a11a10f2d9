// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured diagnostics for recoverable survey problems.
//!
//! Nothing short of malformed markup stops a survey from being processed.
//! Everything else (dangling references, broken chains, degenerate faces,
//! unreadable fields) is recorded as a [`Diagnostic`] naming the entity that
//! owns the problem, so callers and tests can match on it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attributes::FieldError;
use crate::records::Coord;

/// Kind of survey entity a diagnostic or reference is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    Point = 0,
    Segment = 1,
    Polygon = 2,
    Face = 3,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Point => "point",
            EntityKind::Segment => "segment",
            EntityKind::Polygon => "polygon",
            EntityKind::Face => "face",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// The entity references an identifier that does not exist.
    /// For a `FACE` without a `POLYGON`, `id` is the face's own identifier.
    ReferenceNotFound { kind: EntityKind, id: String },

    /// Chain chasing stopped at `tail`. `stranded` lists the segments left
    /// unused; it is empty when every segment was consumed but the chain did
    /// not come back to its start and closure had to be forced.
    ChainBroken { tail: Coord, stranded: Vec<String> },

    /// The face lists no segments.
    EmptyFace,

    /// The reconstructed loop has fewer than three distinct coordinates.
    DegenerateLoop { distinct_points: usize },

    /// An attribute was missing or could not be coerced.
    MalformedField { attribute: String, reason: String },

    /// A point has too few components for the requested projection.
    InsufficientDimensions { components: usize, required: usize },
}

impl DiagnosticKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            DiagnosticKind::ChainBroken { .. } => "CHAIN_BROKEN",
            DiagnosticKind::EmptyFace => "EMPTY_FACE",
            DiagnosticKind::DegenerateLoop { .. } => "DEGENERATE_LOOP",
            DiagnosticKind::MalformedField { .. } => "MALFORMED_FIELD",
            DiagnosticKind::InsufficientDimensions { .. } => "INSUFFICIENT_DIMENSIONS",
        }
    }
}

/// A recoverable problem attached to one survey entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Kind of the entity that owns the problem.
    pub entity: EntityKind,
    /// Identifier of that entity (`?` when the element had no identifier).
    pub id: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(entity: EntityKind, id: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            entity,
            id: id.into(),
            kind,
        }
    }

    /// `owner` references `missing`, which does not exist.
    pub fn reference_not_found(
        entity: EntityKind,
        id: impl Into<String>,
        missing: EntityKind,
        missing_id: impl Into<String>,
    ) -> Self {
        Self::new(
            entity,
            id,
            DiagnosticKind::ReferenceNotFound {
                kind: missing,
                id: missing_id.into(),
            },
        )
    }

    /// An attribute of `id` could not be read.
    pub fn malformed_field(entity: EntityKind, id: impl Into<String>, error: &FieldError) -> Self {
        Self::new(
            entity,
            id,
            DiagnosticKind::MalformedField {
                attribute: error.attribute().to_string(),
                reason: error.to_string(),
            },
        )
    }

    #[inline]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ReferenceNotFound { kind, id } => {
                write!(f, "{kind} {id} not found")
            }
            DiagnosticKind::ChainBroken { tail, stranded } if stranded.is_empty() => {
                write!(f, "chain ends at {tail:?} without returning to its start")
            }
            DiagnosticKind::ChainBroken { tail, stranded } => {
                write!(
                    f,
                    "no continuation found at {tail:?}; unused segments: {}",
                    stranded.join(",")
                )
            }
            DiagnosticKind::EmptyFace => f.write_str("face lists no segments"),
            DiagnosticKind::DegenerateLoop { distinct_points } => {
                write!(f, "loop has only {distinct_points} distinct points")
            }
            DiagnosticKind::MalformedField { reason, .. } => f.write_str(reason),
            DiagnosticKind::InsufficientDimensions {
                components,
                required,
            } => write!(f, "{components} components, {required} required"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.entity, self.id, self.kind)
    }
}
