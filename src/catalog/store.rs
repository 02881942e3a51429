//! In-memory asset catalog.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::record::{AssetId, AssetRecord, NewAsset, Variant, DEFAULT_CATEGORY};
use crate::error::{Result, ServerError};

/// Process-lifetime store of asset records.
///
/// Ids are assigned sequentially and never reused. Records are kept in id order,
/// which is also insertion order.
pub struct AssetCatalog {
    records: RwLock<BTreeMap<AssetId, AssetRecord>>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Build a catalog holding the given entries, ids starting at 1
    pub fn with_seed(seed: impl IntoIterator<Item = NewAsset>) -> Self {
        let catalog = Self::new();
        for asset in seed {
            catalog.create(asset);
        }
        catalog
    }

    /// All active records in insertion order
    pub fn list_active(&self) -> Vec<AssetRecord> {
        self.records
            .read()
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect()
    }

    /// Look up a record regardless of its active flag
    pub fn get_by_id(&self, id: AssetId) -> Result<AssetRecord> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(ServerError::RecordNotFound(id))
    }

    /// Store a new record under the next id
    pub fn create(&self, asset: NewAsset) -> AssetRecord {
        let mut records = self.records.write();
        let id = records.keys().next_back().map_or(1, |max| max + 1);

        let variant = asset
            .variant
            .or_else(|| Variant::from_display_name(&asset.name));
        let record = AssetRecord {
            id,
            name: asset.name,
            description: asset.description,
            filename: asset.filename,
            file_format: asset.file_format,
            dimensions: asset.dimensions,
            icon_name: asset.icon_name,
            category: asset
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            is_active: asset.is_active.unwrap_or(true),
            variant,
        };

        records.insert(id, record.clone());
        tracing::debug!("Created asset {} ({})", id, record.name);
        record
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> NewAsset {
        NewAsset {
            name: name.to_string(),
            description: "test asset".to_string(),
            filename: "test.png".to_string(),
            file_format: "PNG".to_string(),
            dimensions: "1024x1024px".to_string(),
            icon_name: "boxes".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids_and_defaults() {
        let catalog = AssetCatalog::new();
        let a = catalog.create(asset("Cargo - Icon Only"));
        let b = catalog.create(asset("Cargo - With Text (Transparent)"));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.is_active);
        assert_eq!(a.category, DEFAULT_CATEGORY);
        assert_eq!(a.variant, Some(Variant::IconOnly));
        assert_eq!(b.variant, Some(Variant::TextTransparent));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_explicit_variant_overrides_name() {
        let catalog = AssetCatalog::new();
        let record = catalog.create(NewAsset {
            variant: Some(Variant::TextSolid),
            ..asset("Cargo - Icon Only")
        });
        assert_eq!(record.variant, Some(Variant::TextSolid));
    }

    #[test]
    fn test_list_active_hides_inactive_but_lookup_finds_it() {
        let catalog = AssetCatalog::new();
        catalog.create(asset("Visible"));
        let hidden = catalog.create(NewAsset {
            is_active: Some(false),
            ..asset("Hidden")
        });
        catalog.create(asset("Also Visible"));

        let active = catalog.list_active();
        let names: Vec<&str> = active.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Visible", "Also Visible"]);

        let found = catalog.get_by_id(hidden.id).unwrap();
        assert!(!found.is_active);
    }

    #[test]
    fn test_every_listed_id_resolves_as_active() {
        let catalog = AssetCatalog::with_seed(crate::catalog::seed_assets());
        for record in catalog.list_active() {
            let found = catalog.get_by_id(record.id).unwrap();
            assert!(found.is_active);
            assert_eq!(found, record);
        }
    }

    #[test]
    fn test_unknown_id_is_record_not_found() {
        let catalog = AssetCatalog::new();
        catalog.create(asset("Only"));
        assert!(matches!(
            catalog.get_by_id(99),
            Err(ServerError::RecordNotFound(99))
        ));
        assert!(matches!(
            catalog.get_by_id(0),
            Err(ServerError::RecordNotFound(0))
        ));
    }

    #[test]
    fn test_listing_is_deterministic() {
        let catalog = AssetCatalog::with_seed(crate::catalog::seed_assets());
        assert_eq!(catalog.list_active(), catalog.list_active());
    }
}
