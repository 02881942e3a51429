//! Asset record types.

use serde::{Deserialize, Serialize};

pub type AssetId = u32;

/// Category used when a new asset does not name one
pub const DEFAULT_CATEGORY: &str = "logistics";

/// Presentation style of an asset graphic.
///
/// Declaration order is the order variant folders appear in the bulk archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    IconOnly,
    TextTransparent,
    TextSolid,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::IconOnly, Variant::TextTransparent, Variant::TextSolid];

    /// Suffix used in display names, e.g. "Door Status Indicator - Icon Only"
    pub fn marker(&self) -> &'static str {
        match self {
            Variant::IconOnly => "Icon Only",
            Variant::TextTransparent => "With Text (Transparent)",
            Variant::TextSolid => "With Text (Solid Background)",
        }
    }

    /// Folder the variant's files are placed under in the bulk archive
    pub fn folder(&self) -> &'static str {
        match self {
            Variant::IconOnly => "icon-only",
            Variant::TextTransparent => "with-text-transparent",
            Variant::TextSolid => "with-text-solid-background",
        }
    }

    /// First marker contained in the display name, in declaration order
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| name.contains(v.marker()))
    }
}

/// A catalog entry describing one downloadable graphic variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: AssetId,
    pub name: String,
    pub description: String,
    /// Name offered to the downloader, not the on-disk source filename
    pub filename: String,
    pub file_format: String,
    pub dimensions: String,
    pub icon_name: String,
    pub category: String,
    pub is_active: bool,
    #[serde(skip)]
    pub variant: Option<Variant>,
}

impl AssetRecord {
    /// Content type for the download response, derived from the file format
    pub fn content_type(&self) -> &'static str {
        match self.file_format.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

/// Fields for a new catalog entry; the id is assigned by the catalog.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    pub description: String,
    pub filename: String,
    pub file_format: String,
    pub dimensions: String,
    pub icon_name: String,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub variant: Option<Variant>,
}
