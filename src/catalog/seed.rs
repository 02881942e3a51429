//! Fixed catalog contents loaded at start-up.

use super::record::{NewAsset, Variant};

struct BaseAsset {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    icon_name: &'static str,
    category: &'static str,
}

const BASE_ASSETS: [BaseAsset; 6] = [
    BaseAsset {
        name: "Door Status Indicator",
        slug: "door-status",
        description: "Visual indicator showing container door status with real-time monitoring capabilities.",
        icon_name: "door-open",
        category: "operational",
    },
    BaseAsset {
        name: "Internal Temperature Monitor",
        slug: "internal-temp",
        description: "Temperature monitoring graphic for cold chain logistics presentations.",
        icon_name: "thermometer-half",
        category: "monitoring",
    },
    BaseAsset {
        name: "GPS Location Tracker",
        slug: "gps-location",
        description: "Real-time GPS tracking visualization for cargo location monitoring.",
        icon_name: "map-marker-alt",
        category: "tracking",
    },
    BaseAsset {
        name: "Journey & Distance Tracker",
        slug: "trip-mileage",
        description: "Mileage and distance display for route optimization presentations.",
        icon_name: "route",
        category: "optimization",
    },
    BaseAsset {
        name: "Cargo Status Indicator",
        slug: "cargo-status",
        description: "Load status visualization showing loaded or empty container states.",
        icon_name: "boxes",
        category: "capacity",
    },
    BaseAsset {
        name: "Motion Alert System",
        slug: "motion-alert",
        description: "Movement detection and alert visualization for security presentations.",
        icon_name: "exchange-alt",
        category: "security",
    },
];

fn variant_blurb(variant: Variant) -> &'static str {
    match variant {
        Variant::IconOnly => "Icon only, no text, transparent background.",
        Variant::TextTransparent => "Icon with text on a transparent background.",
        Variant::TextSolid => "Icon with text on a solid background.",
    }
}

/// Seed entries: every base asset in each variant, grouped by base asset.
///
/// Ids follow this order, so base asset `n` (0-based) in variant `v` gets
/// id `n * 3 + v + 1`.
pub fn seed_assets() -> Vec<NewAsset> {
    BASE_ASSETS
        .iter()
        .flat_map(|base| {
            Variant::ALL.into_iter().map(move |variant| NewAsset {
                name: format!("{} - {}", base.name, variant.marker()),
                description: format!("{} {}", base.description, variant_blurb(variant)),
                filename: format!("{}-{}.png", base.slug, variant.folder()),
                file_format: "PNG".to_string(),
                dimensions: "1024x1024px".to_string(),
                icon_name: base.icon_name.to_string(),
                category: Some(base.category.to_string()),
                is_active: Some(true),
                variant: Some(variant),
            })
        })
        .collect()
}
