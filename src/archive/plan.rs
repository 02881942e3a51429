//! Bulk archive planning: grouping, resolution, and existence checks.
//!
//! The plan fixes the entry order before any byte is written: variant groups in
//! declaration order, members in catalog order.

use std::path::Path;

use crate::catalog::{AssetCatalog, AssetId, AssetRecord, Variant};
use crate::error::Result;
use crate::resolver::FileResolver;
use crate::storage::{AssetStorage, StorageError};

use super::ArchiveStage;

/// One archive entry, resolved against the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub asset_id: AssetId,
    pub folder: &'static str,
    /// Public filename of the record
    pub filename: String,
    /// Resolved source filename, if the resolver knows the id
    pub source: Option<String>,
    /// Whether the source file was present when the plan was built
    pub on_disk: bool,
    /// Text written instead of the file when it is unavailable
    pub placeholder: String,
}

impl PlannedEntry {
    fn new(record: &AssetRecord, folder: &'static str, source: Option<String>, on_disk: bool) -> Self {
        let placeholder = placeholder_body(record, source.as_deref());
        Self {
            asset_id: record.id,
            folder,
            filename: record.filename.clone(),
            source,
            on_disk,
            placeholder,
        }
    }

    /// `<folder>/<filename>`
    pub fn file_path(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }

    /// `<folder>/<filename with a .txt extension>`
    pub fn placeholder_path(&self) -> String {
        let txt = Path::new(&self.filename).with_extension("txt");
        format!("{}/{}", self.folder, txt.to_string_lossy())
    }
}

/// Records sharing one variant, in catalog order.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    pub variant: Variant,
    pub entries: Vec<PlannedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct ArchivePlan {
    pub groups: Vec<VariantGroup>,
    /// Active records without a variant tag, left out of the archive
    pub omitted: Vec<AssetId>,
}

impl ArchivePlan {
    /// Fetch the active catalog and resolve every eligible record.
    ///
    /// Missing resolutions and missing files become placeholder entries; only an
    /// I/O failure while probing the asset root fails the plan.
    pub async fn build(
        catalog: &AssetCatalog,
        resolver: &FileResolver,
        storage: &dyn AssetStorage,
    ) -> Result<Self> {
        tracing::debug!(stage = %ArchiveStage::Fetching, "Building archive plan");
        let records = catalog.list_active();

        tracing::debug!(stage = %ArchiveStage::Grouping, records = records.len(), "Grouping by variant");
        let (grouped, omitted) = group_by_variant(&records);
        for id in &omitted {
            tracing::warn!("Asset {} has no variant and is left out of the archive", id);
        }

        let mut groups = Vec::with_capacity(grouped.len());
        for (variant, members) in grouped {
            let mut entries = Vec::with_capacity(members.len());
            for record in members {
                let entry = match resolver.resolve(record.id) {
                    Ok(source) => {
                        let on_disk = match storage.exists(source).await {
                            Ok(present) => present,
                            Err(StorageError::InvalidKey(key)) => {
                                tracing::warn!("Asset {} resolves to invalid key {}", record.id, key);
                                false
                            }
                            Err(e) => return Err(e.into()),
                        };
                        PlannedEntry::new(record, variant.folder(), Some(source.to_string()), on_disk)
                    }
                    Err(_) => PlannedEntry::new(record, variant.folder(), None, false),
                };
                entries.push(entry);
            }
            groups.push(VariantGroup { variant, entries });
        }

        Ok(Self { groups, omitted })
    }

    /// Entries in archive order
    pub fn entries(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Partition records by their variant tag, groups in declaration order.
///
/// Empty groups are dropped. Untagged record ids are returned separately.
pub fn group_by_variant(records: &[AssetRecord]) -> (Vec<(Variant, Vec<&AssetRecord>)>, Vec<AssetId>) {
    let groups = Variant::ALL
        .into_iter()
        .map(|variant| {
            let members: Vec<&AssetRecord> = records
                .iter()
                .filter(|r| r.variant == Some(variant))
                .collect();
            (variant, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect();

    let omitted = records
        .iter()
        .filter(|r| r.variant.is_none())
        .map(|r| r.id)
        .collect();

    (groups, omitted)
}

fn placeholder_body(record: &AssetRecord, source: Option<&str>) -> String {
    format!(
        "Asset: {}\nSource file: {}\nFormat: {}\nDimensions: {}\n\n\
         The source file for this asset was not available when this archive was built.\n",
        record.name,
        source.unwrap_or("(unresolved)"),
        record.file_format,
        record.dimensions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::NewAsset;
    use crate::catalog::seed_assets;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn untagged(name: &str) -> NewAsset {
        NewAsset {
            name: name.to_string(),
            description: "no marker".to_string(),
            filename: "plain.png".to_string(),
            file_format: "PNG".to_string(),
            dimensions: "512x512px".to_string(),
            icon_name: "boxes".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_order_is_declaration_then_catalog() {
        let catalog = AssetCatalog::with_seed(seed_assets());
        let records = catalog.list_active();
        let (groups, omitted) = group_by_variant(&records);

        assert!(omitted.is_empty());
        let variants: Vec<Variant> = groups.iter().map(|(v, _)| *v).collect();
        assert_eq!(variants, Variant::ALL.to_vec());

        let icon_ids: Vec<AssetId> = groups[0].1.iter().map(|r| r.id).collect();
        assert_eq!(icon_ids, vec![1, 4, 7, 10, 13, 16]);
    }

    #[test]
    fn test_placeholder_path_swaps_extension() {
        let catalog = AssetCatalog::new();
        let record = catalog.create(untagged("Door - Icon Only"));
        let entry = PlannedEntry::new(&record, "icon-only", None, false);

        assert_eq!(entry.file_path(), "icon-only/plain.png");
        assert_eq!(entry.placeholder_path(), "icon-only/plain.txt");
        assert!(entry.placeholder.contains("Door - Icon Only"));
        assert!(entry.placeholder.contains("(unresolved)"));
        assert!(entry.placeholder.contains("512x512px"));
    }

    #[tokio::test]
    async fn test_plan_marks_missing_files_and_omits_untagged() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = FileResolver::seeded();
        tokio::fs::write(temp_dir.path().join(resolver.resolve(1).unwrap()), b"x")
            .await
            .unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        let catalog = AssetCatalog::with_seed(seed_assets());
        let stray = catalog.create(untagged("Loose Sticker"));

        let plan = ArchivePlan::build(&catalog, &resolver, &storage).await.unwrap();

        assert_eq!(plan.len(), 18);
        assert_eq!(plan.omitted, vec![stray.id]);
        assert!(plan.entries().all(|e| e.asset_id != stray.id));

        let first = plan.entries().next().unwrap();
        assert_eq!(first.asset_id, 1);
        assert!(first.on_disk);
        assert_eq!(plan.entries().filter(|e| e.on_disk).count(), 1);
    }

    #[tokio::test]
    async fn test_unresolved_record_gets_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());
        let catalog = AssetCatalog::with_seed(seed_assets());
        let resolver = FileResolver::from_entries([(1, "one.png".to_string())]);

        let plan = ArchivePlan::build(&catalog, &resolver, &storage).await.unwrap();

        assert_eq!(plan.len(), 18);
        let unresolved = plan.entries().filter(|e| e.source.is_none()).count();
        assert_eq!(unresolved, 17);
        assert!(plan.entries().all(|e| !e.on_disk));
    }
}
