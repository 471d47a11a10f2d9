// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Survey processing: markup → tables → face catalog.

use std::time::Instant;

use rayon::prelude::*;
use roofline_core::{Diagnostic, FaceRecord, SurveyDocument};
use roofline_topology::{Face, FaceCatalog, PointTable, SegmentTable};

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::types::{SurveyResult, SurveyStats};

/// Process survey markup end to end.
///
/// Only malformed markup fails; every other problem ends up in
/// [`SurveyResult::diagnostics`].
pub fn process_survey(content: &str, config: &ProcessingConfig) -> Result<SurveyResult> {
    let total_start = Instant::now();

    tracing::info!(
        content_size = content.len(),
        projection = config.projection.as_str(),
        parallel = config.parallel,
        "Starting survey processing"
    );

    let document = SurveyDocument::parse(content)?;
    let parse_time = total_start.elapsed();
    tracing::debug!(
        points = document.points.len(),
        lines = document.lines.len(),
        faces = document.faces.len(),
        parse_time_ms = parse_time.as_millis(),
        "Parsed survey document"
    );

    let mut result = process_document(&document, config);
    result.stats.parse_time_ms = parse_time.as_millis() as u64;
    result.stats.total_time_ms = total_start.elapsed().as_millis() as u64;
    Ok(result)
}

/// Build the point table, segment table and face catalog of a parsed survey.
pub fn process_document(document: &SurveyDocument, config: &ProcessingConfig) -> SurveyResult {
    let build_start = Instant::now();
    let mut diagnostics = document.diagnostics.clone();

    let (points, point_diagnostics) = PointTable::build(&document.points, config.projection);
    tracing::debug!(points = points.len(), flagged = point_diagnostics.len(), "Built point table");
    diagnostics.extend(point_diagnostics);

    let (segments, segment_diagnostics) = SegmentTable::build(&points, &document.lines);
    tracing::debug!(
        segments = segments.len(),
        flagged = segment_diagnostics.len(),
        "Built segment table"
    );
    diagnostics.extend(segment_diagnostics);

    let (catalog, face_diagnostics) = build_catalog(&document.faces, &segments, config);
    tracing::debug!(faces = catalog.len(), flagged = face_diagnostics.len(), "Built face catalog");
    diagnostics.extend(face_diagnostics);

    let mut stats = SurveyStats {
        points: points.len(),
        segments: segments.len(),
        diagnostics: diagnostics.len(),
        ..SurveyStats::default()
    };
    stats.count_faces(&catalog);

    let catalog = if config.keep_invalid {
        catalog
    } else {
        catalog.into_renderable()
    };

    for diagnostic in &diagnostics {
        tracing::warn!(
            entity = %diagnostic.entity,
            id = %diagnostic.id,
            code = diagnostic.code(),
            kind = %diagnostic.kind,
            "Survey diagnostic"
        );
    }

    stats.build_time_ms = build_start.elapsed().as_millis() as u64;
    stats.total_time_ms = stats.build_time_ms;

    tracing::info!(
        points = stats.points,
        segments = stats.segments,
        faces = stats.faces,
        complete = stats.complete_faces,
        incomplete = stats.incomplete_faces,
        empty = stats.empty_faces,
        degenerate = stats.degenerate_faces,
        diagnostics = stats.diagnostics,
        build_time_ms = stats.build_time_ms,
        "Survey processing complete"
    );

    SurveyResult {
        segments,
        catalog,
        diagnostics,
        stats,
    }
}

/// Reconstructs every face, on the rayon pool when configured. Faces come
/// back in document order either way.
fn build_catalog(
    records: &[FaceRecord],
    segments: &SegmentTable,
    config: &ProcessingConfig,
) -> (FaceCatalog, Vec<Diagnostic>) {
    if !config.parallel {
        return FaceCatalog::build(records, segments);
    }

    let reconstruct = || {
        records
            .par_iter()
            .map(|record| Face::build(record, segments))
            .collect::<Vec<_>>()
    };

    let built = if config.worker_threads == 0 {
        reconstruct()
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build()
        {
            Ok(pool) => pool.install(reconstruct),
            Err(e) => {
                tracing::warn!(error = %e, "Could not build worker pool, using the global pool");
                reconstruct()
            }
        }
    };

    let mut diagnostics = Vec::new();
    let catalog = FaceCatalog::from_faces(built.into_iter().map(|(face, face_diagnostics)| {
        diagnostics.extend(face_diagnostics);
        face
    }));
    (catalog, diagnostics)
}
