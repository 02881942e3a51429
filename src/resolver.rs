//! Asset id to on-disk source filename mapping.
//!
//! Kept apart from the catalog so public download names can change without
//! touching the files stored under the asset root. The two tables may disagree.

use std::collections::HashMap;

use crate::catalog::AssetId;
use crate::error::{Result, ServerError};

/// Source files shipped with the seed catalog, in id order.
const SOURCE_FILES: [(AssetId, &str); 18] = [
    (1, "PastedGraphic-5_1752023080506.png"),
    (2, "DoorStatus-Text-Transparent_1752541206118.png"),
    (3, "DoorStatus-Text-Solid_1752541206118.png"),
    (4, "PastedGraphic-3_1752023080506.png"),
    (5, "InternalTemp-Text-Transparent_1752541206118.png"),
    (6, "InternalTemp-Text-Solid_1752541206118.png"),
    (7, "PastedGraphic-1-2_1752023080506.png"),
    (8, "GpsLocation-Text-Transparent_1752541206118.png"),
    (9, "GpsLocation-Text-Solid_1752541206118.png"),
    (10, "PastedGraphic-2-1_1752023080506.png"),
    (11, "TripMileage-Text-Transparent_1752541206118.png"),
    (12, "TripMileage-Text-Solid_1752541206118.png"),
    (13, "PastedGraphic-6_1752023080506.png"),
    (14, "CargoStatus-Text-Transparent_1752541206118.png"),
    (15, "CargoStatus-Text-Solid_1752541206118.png"),
    (16, "PastedGraphic-4_1752023080506.png"),
    (17, "MotionAlert-Text-Transparent_1752541206118.png"),
    (18, "MotionAlert-Text-Solid_1752541206118.png"),
];

/// Read-only lookup table, built once at start-up.
#[derive(Debug, Clone)]
pub struct FileResolver {
    table: HashMap<AssetId, String>,
}

impl FileResolver {
    /// Resolver over the source files shipped with the seed catalog
    pub fn seeded() -> Self {
        Self::from_entries(
            SOURCE_FILES
                .iter()
                .map(|(id, name)| (*id, name.to_string())),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (AssetId, String)>) -> Self {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Source filename for an asset id
    pub fn resolve(&self, id: AssetId) -> Result<&str> {
        self.table
            .get(&id)
            .map(String::as_str)
            .ok_or(ServerError::ResolutionNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}
