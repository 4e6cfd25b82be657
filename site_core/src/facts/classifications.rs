//! Closed classifications used by the survey, building and wind facts.
//!
//! Every per-variant constant elsewhere in the crate is an exhaustive `match`
//! over one of these enums, so adding a variant fails to compile until every
//! lookup table is updated. The `ALL` arrays let tests walk every variant.

use serde::{Deserialize, Serialize};

use crate::units::Degrees;

/// Soil classification from the site survey.
///
/// # Example
/// ```
/// use site_core::facts::SoilType;
///
/// assert_eq!(SoilType::BlackCotton.code(), "BLACK_COTTON");
/// assert!(SoilType::Clay.is_poorly_draining());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoilType {
    Clay,
    BlackCotton,
    Laterite,
    Sandy,
    Rocky,
    Alluvial,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Clay,
        SoilType::BlackCotton,
        SoilType::Laterite,
        SoilType::Sandy,
        SoilType::Rocky,
        SoilType::Alluvial,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SoilType::Clay => "CLAY",
            SoilType::BlackCotton => "BLACK_COTTON",
            SoilType::Laterite => "LATERITE",
            SoilType::Sandy => "SANDY",
            SoilType::Rocky => "ROCKY",
            SoilType::Alluvial => "ALLUVIAL",
        }
    }

    /// Clay and black-cotton soils drain slowly and swell when wet
    pub fn is_poorly_draining(&self) -> bool {
        matches!(self, SoilType::Clay | SoilType::BlackCotton)
    }

    /// Rocky and sandy soils bear load well enough for shallow foundations
    pub fn is_firm(&self) -> bool {
        matches!(self, SoilType::Rocky | SoilType::Sandy)
    }
}

/// Seismic zone, II (lowest) through V (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeismicZone {
    #[serde(rename = "ZONE_II")]
    ZoneII,
    #[serde(rename = "ZONE_III")]
    ZoneIII,
    #[serde(rename = "ZONE_IV")]
    ZoneIV,
    #[serde(rename = "ZONE_V")]
    ZoneV,
}

impl SeismicZone {
    pub const ALL: [SeismicZone; 4] = [
        SeismicZone::ZoneII,
        SeismicZone::ZoneIII,
        SeismicZone::ZoneIV,
        SeismicZone::ZoneV,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SeismicZone::ZoneII => "ZONE_II",
            SeismicZone::ZoneIII => "ZONE_III",
            SeismicZone::ZoneIV => "ZONE_IV",
            SeismicZone::ZoneV => "ZONE_V",
        }
    }

    /// Zones IV and V
    pub fn is_high(&self) -> bool {
        matches!(self, SeismicZone::ZoneIV | SeismicZone::ZoneV)
    }
}

/// Flood risk rating from the site survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloodRisk {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl FloodRisk {
    pub const ALL: [FloodRisk; 4] = [FloodRisk::Low, FloodRisk::Medium, FloodRisk::High, FloodRisk::VeryHigh];

    pub fn code(&self) -> &'static str {
        match self {
            FloodRisk::Low => "LOW",
            FloodRisk::Medium => "MEDIUM",
            FloodRisk::High => "HIGH",
            FloodRisk::VeryHigh => "VERY_HIGH",
        }
    }

    /// High and very-high flood risk
    pub fn is_severe(&self) -> bool {
        matches!(self, FloodRisk::High | FloodRisk::VeryHigh)
    }
}

/// Building-use category, which drives occupancy live loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingUse {
    Residential,
    Commercial,
    Hospital,
    School,
    Industrial,
    MixedUse,
}

impl BuildingUse {
    pub const ALL: [BuildingUse; 6] = [
        BuildingUse::Residential,
        BuildingUse::Commercial,
        BuildingUse::Hospital,
        BuildingUse::School,
        BuildingUse::Industrial,
        BuildingUse::MixedUse,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BuildingUse::Residential => "RESIDENTIAL",
            BuildingUse::Commercial => "COMMERCIAL",
            BuildingUse::Hospital => "HOSPITAL",
            BuildingUse::School => "SCHOOL",
            BuildingUse::Industrial => "INDUSTRIAL",
            BuildingUse::MixedUse => "MIXED_USE",
        }
    }
}

/// Primary structural system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructuralSystem {
    /// Reinforced cement concrete frame
    #[serde(rename = "RCC")]
    Rcc,
    Steel,
    Composite,
    /// Masonry load-bearing walls, no frame
    LoadBearing,
}

impl StructuralSystem {
    pub const ALL: [StructuralSystem; 4] = [
        StructuralSystem::Rcc,
        StructuralSystem::Steel,
        StructuralSystem::Composite,
        StructuralSystem::LoadBearing,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            StructuralSystem::Rcc => "RCC",
            StructuralSystem::Steel => "STEEL",
            StructuralSystem::Composite => "COMPOSITE",
            StructuralSystem::LoadBearing => "LOAD_BEARING",
        }
    }
}

/// Terrain roughness category, 1 (open) through 4 (very dense urban).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    #[serde(rename = "CATEGORY_1")]
    Open,
    #[serde(rename = "CATEGORY_2")]
    Urban,
    #[serde(rename = "CATEGORY_3")]
    DenseUrban,
    #[serde(rename = "CATEGORY_4")]
    VeryDenseUrban,
}

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 4] = [
        TerrainCategory::Open,
        TerrainCategory::Urban,
        TerrainCategory::DenseUrban,
        TerrainCategory::VeryDenseUrban,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TerrainCategory::Open => "CATEGORY_1",
            TerrainCategory::Urban => "CATEGORY_2",
            TerrainCategory::DenseUrban => "CATEGORY_3",
            TerrainCategory::VeryDenseUrban => "CATEGORY_4",
        }
    }
}

/// 8-point compass direction.
///
/// The declaration order (N, NE, E, SE, S, SW, W, NW) is also the tie-break
/// order whenever a bearing is snapped to the nearest direction.
///
/// # Example
/// ```
/// use site_core::facts::Orientation;
/// use site_core::units::Degrees;
///
/// assert_eq!(Orientation::SouthWest.bearing().0, 225.0);
/// assert_eq!(Orientation::nearest(Degrees(100.0)), Orientation::East);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Orientation::North => "NORTH",
            Orientation::NorthEast => "NORTH_EAST",
            Orientation::East => "EAST",
            Orientation::SouthEast => "SOUTH_EAST",
            Orientation::South => "SOUTH",
            Orientation::SouthWest => "SOUTH_WEST",
            Orientation::West => "WEST",
            Orientation::NorthWest => "NORTH_WEST",
        }
    }

    /// Compass bearing of this direction
    pub fn bearing(&self) -> Degrees {
        Degrees(match self {
            Orientation::North => 0.0,
            Orientation::NorthEast => 45.0,
            Orientation::East => 90.0,
            Orientation::SouthEast => 135.0,
            Orientation::South => 180.0,
            Orientation::SouthWest => 225.0,
            Orientation::West => 270.0,
            Orientation::NorthWest => 315.0,
        })
    }

    /// Snap a bearing to the closest compass direction.
    ///
    /// Distance is measured around the circle; on an exact tie the direction
    /// that comes first in [`Orientation::ALL`] wins.
    pub fn nearest(bearing: Degrees) -> Orientation {
        let mut closest = Orientation::North;
        let mut min_diff = f64::INFINITY;
        for direction in Orientation::ALL {
            let diff = bearing.separation(direction.bearing());
            if diff < min_diff {
                min_diff = diff;
                closest = direction;
            }
        }
        closest
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
