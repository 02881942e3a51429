//! Asset catalog: records, the in-memory store, and the start-up seed.

pub mod record;
mod seed;
mod store;

pub use record::{AssetId, AssetRecord, Variant};
pub use seed::seed_assets;
pub use store::AssetCatalog;
