// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for face catalogs.
//!
//! The snapshot lists faces in catalog order, each with its loop, the
//! segments it was stitched from, its status and flattened metadata. This is
//! the shape renderers and plotting front ends read.

use serde::{Deserialize, Serialize};

use crate::catalog::{Face, FaceCatalog};
use crate::error::{Error, Result};

/// Serializable representation of a face catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub faces: Vec<Face>,
}

impl FaceCatalog {
    /// Serializes the catalog to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a catalog from a JSON string produced by [`to_json`].
    ///
    /// [`to_json`]: FaceCatalog::to_json
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            faces: self.faces().to_vec(),
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self::from_faces(snapshot.faces)
    }
}

impl From<CatalogSnapshot> for FaceCatalog {
    fn from(snapshot: CatalogSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl From<FaceCatalog> for CatalogSnapshot {
    fn from(catalog: FaceCatalog) -> Self {
        CatalogSnapshot {
            faces: catalog.into_faces(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FaceMetadata, FaceStatus};
    use crate::face_loop::FaceLoop;
    use roofline_core::Coord;

    fn face(id: &str, status: FaceStatus) -> Face {
        let points = [[0.0, 0.0, 3.0], [4.0, 0.0, 3.0], [4.0, 4.0, 5.0], [0.0, 0.0, 3.0]];
        Face {
            id: id.to_string(),
            face_id: Some(format!("F{id}")),
            face_loop: FaceLoop::new(points.iter().map(|p| Coord::from_slice(p)).collect()),
            segments: vec!["L1".to_string(), "L2".to_string(), "L3".to_string()],
            orientations: vec![true, true, false],
            forced_closure: false,
            status,
            metadata: FaceMetadata {
                area: Some(8.0),
                area_unit: "sqft".to_string(),
                slope: None,
                slope_unit: "in/ft".to_string(),
                orientation: "90".to_string(),
                category: "ROOF".to_string(),
                material: "Tile".to_string(),
                level: "2".to_string(),
            },
        }
    }

    #[test]
    fn test_json_shape() {
        let catalog = FaceCatalog::from_faces([face("P1", FaceStatus::Complete)]);
        let json = catalog.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["faces"][0];
        assert_eq!(first["id"], "P1");
        assert_eq!(first["face_id"], "FP1");
        assert_eq!(first["status"], "complete");
        assert_eq!(first["material"], "Tile");
        assert_eq!(first["loop"].as_array().unwrap().len(), 4);
        assert_eq!(first["loop"][2][2], 5.0);
        assert!(first["slope"].is_null());
    }

    #[test]
    fn test_json_keeps_catalog_order() {
        let catalog = FaceCatalog::from_faces([
            face("P2", FaceStatus::Incomplete),
            face("P1", FaceStatus::Complete),
        ]);
        let restored = FaceCatalog::from_json(&catalog.to_json().unwrap()).unwrap();

        let ids: Vec<_> = restored.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["P2", "P1"]);
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            FaceCatalog::from_json("{\"faces\": 3}"),
            Err(Error::Serialization(_))
        ));
    }
}
