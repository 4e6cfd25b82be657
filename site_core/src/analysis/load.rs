//! # Structural Load Analysis
//!
//! Gravity loads and the structural scheme that follows from them: dead and
//! live loads, height classification, foundation type and depth, column
//! spacing, beam sizing and whether shear walls are needed.
//!
//! ## Assumptions
//!
//! - Every floor carries the same built-up area and occupancy
//! - Wall load (3.0 kN/m²) and floor finish (1.5 kN/m²) are fixed allowances
//! - Foundation depth is taken from a fixed table, not interpolated
//!
//! ## Example
//!
//! ```rust
//! use site_core::analysis::load::{calculate, HeightCategory, LoadInput};
//! use site_core::facts::{BuildingUse, SeismicZone, SoilType, StructuralSystem};
//!
//! let input = LoadInput {
//!     building_use: BuildingUse::Residential,
//!     total_floors: 4,
//!     total_height_m: 12.0,
//!     built_up_area_m2: 400.0,
//!     structural_system: StructuralSystem::Rcc,
//!     soil_type: SoilType::Sandy,
//!     seismic_zone: SeismicZone::ZoneIII,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.dead_load_kn, 16000.0);
//! assert_eq!(result.height_category, HeightCategory::LowRise);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{BuildingFacts, BuildingUse, SeismicZone, SiteFacts, SoilType, StructuralSystem};
use crate::units::round_to;

/// Partition wall allowance (kN/m²)
pub const WALL_LOAD_KN_M2: f64 = 3.0;

/// Floor finish allowance (kN/m²)
pub const FLOOR_FINISH_KN_M2: f64 = 1.5;

/// Height classification of the building.
///
/// Each tier includes its upper bound: 15 m is still low-rise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeightCategory {
    /// Up to 15 m
    LowRise,
    /// Over 15 m, up to 30 m
    MidRise,
    /// Over 30 m, up to 75 m
    HighRise,
    /// Over 75 m
    SuperHighRise,
}

impl HeightCategory {
    pub const ALL: [HeightCategory; 4] = [
        HeightCategory::LowRise,
        HeightCategory::MidRise,
        HeightCategory::HighRise,
        HeightCategory::SuperHighRise,
    ];

    /// Classify a total building height in metres.
    pub fn from_height(height_m: f64) -> Self {
        if height_m <= 15.0 {
            HeightCategory::LowRise
        } else if height_m <= 30.0 {
            HeightCategory::MidRise
        } else if height_m <= 75.0 {
            HeightCategory::HighRise
        } else {
            HeightCategory::SuperHighRise
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HeightCategory::LowRise => "LOW_RISE",
            HeightCategory::MidRise => "MID_RISE",
            HeightCategory::HighRise => "HIGH_RISE",
            HeightCategory::SuperHighRise => "SUPER_HIGH_RISE",
        }
    }

    /// High-rise and super-high-rise
    pub fn is_tall(&self) -> bool {
        matches!(self, HeightCategory::HighRise | HeightCategory::SuperHighRise)
    }
}

/// Recommended foundation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoundationType {
    Shallow,
    Raft,
    DeepPile,
    Combined,
}

impl FoundationType {
    pub const ALL: [FoundationType; 4] = [
        FoundationType::Shallow,
        FoundationType::Raft,
        FoundationType::DeepPile,
        FoundationType::Combined,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FoundationType::Shallow => "SHALLOW",
            FoundationType::Raft => "RAFT",
            FoundationType::DeepPile => "DEEP_PILE",
            FoundationType::Combined => "COMBINED",
        }
    }
}

impl std::fmt::Display for FoundationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Input parameters for load analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadInput {
    pub building_use: BuildingUse,
    pub total_floors: u32,
    pub total_height_m: f64,
    pub built_up_area_m2: f64,
    pub structural_system: StructuralSystem,
    pub soil_type: SoilType,
    pub seismic_zone: SeismicZone,
}

impl LoadInput {
    /// Assemble the load input from survey and building facts
    pub fn from_facts(site: &SiteFacts, building: &BuildingFacts) -> Self {
        LoadInput {
            building_use: building.building_use,
            total_floors: building.total_floors,
            total_height_m: building.total_height_m,
            built_up_area_m2: building.built_up_area_m2,
            structural_system: building.structural_system,
            soil_type: site.soil_type,
            seismic_zone: site.seismic_zone,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.total_floors == 0 {
            return Err(AnalysisError::invalid_input(
                "total_floors",
                self.total_floors.to_string(),
                "Floor count must be at least 1",
            ));
        }
        if !(self.total_height_m > 0.0) || !self.total_height_m.is_finite() {
            return Err(AnalysisError::invalid_input(
                "total_height_m",
                self.total_height_m.to_string(),
                "Height must be positive",
            ));
        }
        if !(self.built_up_area_m2 > 0.0) || !self.built_up_area_m2.is_finite() {
            return Err(AnalysisError::invalid_input(
                "built_up_area_m2",
                self.built_up_area_m2.to_string(),
                "Built-up area must be positive",
            ));
        }
        Ok(())
    }
}

/// Results from load analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dead_load_kn": 16000.0,
///   "live_load_kn": 3200.0,
///   "total_load_kn": 19200.0,
///   "height_category": "LOW_RISE",
///   "recommended_foundation": "SHALLOW",
///   "foundation_depth_m": 1.5,
///   "column_spacing_m": 6.0,
///   "beam_sizing": "Primary beams: 230mm x 450mm for 6m span. Secondary beams: 230mm x 300mm",
///   "shear_wall_required": false,
///   "load_distribution_strategy": "Simple beam-column frame ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    pub dead_load_kn: f64,
    pub live_load_kn: f64,
    pub total_load_kn: f64,
    pub height_category: HeightCategory,
    pub recommended_foundation: FoundationType,
    pub foundation_depth_m: f64,
    pub column_spacing_m: f64,
    pub beam_sizing: String,
    pub shear_wall_required: bool,
    pub load_distribution_strategy: String,
}

/// Structural self-weight by system (kN/m²)
pub fn self_weight_kn_m2(system: StructuralSystem) -> f64 {
    match system {
        StructuralSystem::Rcc => 5.5,
        StructuralSystem::Steel => 3.5,
        StructuralSystem::Composite => 4.5,
        StructuralSystem::LoadBearing => 6.5,
    }
}

/// Occupancy live load intensity by building use (kN/m²)
pub fn live_load_intensity_kn_m2(building_use: BuildingUse) -> f64 {
    match building_use {
        BuildingUse::Residential => 2.0,
        BuildingUse::Commercial => 4.0,
        BuildingUse::Hospital => 3.0,
        BuildingUse::School => 3.0,
        BuildingUse::Industrial => 5.0,
        BuildingUse::MixedUse => 3.5,
    }
}

/// Total dead load: (self-weight + walls + finishes) × area, per floor, × floors.
///
/// Linear in both area and floor count.
pub fn dead_load_kn(system: StructuralSystem, built_up_area_m2: f64, total_floors: u32) -> f64 {
    let per_floor = (self_weight_kn_m2(system) + WALL_LOAD_KN_M2 + FLOOR_FINISH_KN_M2) * built_up_area_m2;
    per_floor * total_floors as f64
}

/// Total live load: intensity × area × floors.
pub fn live_load_kn(building_use: BuildingUse, built_up_area_m2: f64, total_floors: u32) -> f64 {
    live_load_intensity_kn_m2(building_use) * built_up_area_m2 * total_floors as f64
}

/// Pick a foundation system from total load, soil and height.
pub fn foundation_type(total_load_kn: f64, soil: SoilType, category: HeightCategory) -> FoundationType {
    if category == HeightCategory::SuperHighRise || total_load_kn > 50_000.0 {
        return FoundationType::DeepPile;
    }
    if category == HeightCategory::HighRise || total_load_kn > 20_000.0 {
        return if soil == SoilType::Rocky {
            FoundationType::Raft
        } else {
            FoundationType::DeepPile
        };
    }
    if category == HeightCategory::MidRise {
        return if soil.is_firm() {
            FoundationType::Shallow
        } else {
            FoundationType::Raft
        };
    }
    FoundationType::Shallow
}

/// Founding depth in metres.
pub fn foundation_depth_m(foundation: FoundationType, category: HeightCategory) -> f64 {
    match foundation {
        FoundationType::Shallow => 1.5,
        FoundationType::Raft => 2.5,
        FoundationType::Combined => 3.0,
        FoundationType::DeepPile => {
            if category == HeightCategory::SuperHighRise {
                25.0
            } else {
                15.0
            }
        }
    }
}

/// Column grid spacing in metres.
pub fn column_spacing_m(system: StructuralSystem, building_use: BuildingUse, category: HeightCategory) -> f64 {
    let mut spacing = match system {
        StructuralSystem::Steel => 7.5,
        StructuralSystem::Rcc | StructuralSystem::Composite => 6.0,
        StructuralSystem::LoadBearing => 4.0,
    };

    if matches!(building_use, BuildingUse::Commercial | BuildingUse::Industrial) {
        spacing += 1.5;
    }
    if category.is_tall() {
        spacing -= 1.0;
    }

    round_to(spacing, 1)
}

/// Beam section guidance for the given span.
pub fn beam_sizing(column_spacing_m: f64, category: HeightCategory) -> String {
    match category {
        HeightCategory::LowRise => format!(
            "Primary beams: 230mm x 450mm for {}m span. Secondary beams: 230mm x 300mm",
            column_spacing_m
        ),
        HeightCategory::MidRise => format!(
            "Primary beams: 300mm x 600mm for {}m span. Secondary beams: 230mm x 450mm",
            column_spacing_m
        ),
        HeightCategory::HighRise => format!(
            "Primary beams: 400mm x 750mm for {}m span. Secondary beams: 300mm x 600mm. Consider post-tensioned beams",
            column_spacing_m
        ),
        HeightCategory::SuperHighRise => format!(
            "Primary beams: 500mm x 900mm for {}m span. Post-tensioned or steel composite beams recommended",
            column_spacing_m
        ),
    }
}

/// Whether lateral shear walls are required.
///
/// Tall buildings need them, as do mid-rise buildings in zones IV and V.
/// A load-bearing masonry system never uses shear walls, and that override
/// takes precedence over both height rules.
pub fn shear_wall_required(category: HeightCategory, system: StructuralSystem, zone: SeismicZone) -> bool {
    if system == StructuralSystem::LoadBearing {
        return false;
    }
    if category.is_tall() {
        return true;
    }
    category == HeightCategory::MidRise && zone.is_high()
}

/// Narrative description of the lateral and gravity load path.
pub fn load_distribution_strategy(category: HeightCategory, system: StructuralSystem) -> String {
    let mut strategy = match category {
        HeightCategory::LowRise => "Simple beam-column frame with uniform load distribution. \
             Use one-way or two-way slab system based on aspect ratio."
            .to_string(),
        HeightCategory::MidRise => "Moment-resisting frame with regular column grid. \
             Two-way slab system recommended. \
             Consider flat slab for commercial spaces."
            .to_string(),
        HeightCategory::HighRise => "Core and outrigger system or tube structure. \
             Central core for lifts and stairs acts as primary lateral load resisting system. \
             Perimeter columns for gravity loads. \
             Shear walls integrated with core."
            .to_string(),
        HeightCategory::SuperHighRise => "Advanced structural system: Bundled tube, braced tube, or mega-frame. \
             Multiple outriggers at mechanical floors. \
             Damping systems for wind and seismic loads. \
             Foundation: Deep piled raft or compensated foundation."
            .to_string(),
    };

    match system {
        StructuralSystem::Steel => {
            strategy.push_str(" Steel structure allows for longer spans and faster construction.")
        }
        StructuralSystem::Composite => {
            strategy.push_str(" Composite construction combines benefits of steel and concrete.")
        }
        StructuralSystem::Rcc | StructuralSystem::LoadBearing => {}
    }

    strategy
}

/// Run the full load analysis.
///
/// # Returns
///
/// * `Ok(LoadResult)` - Loads and structural scheme
/// * `Err(AnalysisError)` - If inputs are invalid
pub fn calculate(input: &LoadInput) -> AnalysisResult<LoadResult> {
    input.validate()?;

    let dead_load_kn = dead_load_kn(input.structural_system, input.built_up_area_m2, input.total_floors);
    let live_load_kn = live_load_kn(input.building_use, input.built_up_area_m2, input.total_floors);
    let total_load_kn = dead_load_kn + live_load_kn;

    let height_category = HeightCategory::from_height(input.total_height_m);
    let recommended_foundation = foundation_type(total_load_kn, input.soil_type, height_category);
    let foundation_depth_m = foundation_depth_m(recommended_foundation, height_category);
    let column_spacing_m = column_spacing_m(input.structural_system, input.building_use, height_category);

    Ok(LoadResult {
        dead_load_kn,
        live_load_kn,
        total_load_kn,
        height_category,
        recommended_foundation,
        foundation_depth_m,
        column_spacing_m,
        beam_sizing: beam_sizing(column_spacing_m, height_category),
        shear_wall_required: shear_wall_required(height_category, input.structural_system, input.seismic_zone),
        load_distribution_strategy: load_distribution_strategy(height_category, input.structural_system),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_input() -> LoadInput {
        LoadInput {
            building_use: BuildingUse::Residential,
            total_floors: 4,
            total_height_m: 12.0,
            built_up_area_m2: 400.0,
            structural_system: StructuralSystem::Rcc,
            soil_type: SoilType::Sandy,
            seismic_zone: SeismicZone::ZoneIII,
        }
    }

    #[test]
    fn test_dead_load() {
        // (5.5 + 3.0 + 1.5) * 400 * 4 = 16000
        assert_eq!(dead_load_kn(StructuralSystem::Rcc, 400.0, 4), 16000.0);
        // (3.5 + 3.0 + 1.5) * 100 * 2 = 1600
        assert_eq!(dead_load_kn(StructuralSystem::Steel, 100.0, 2), 1600.0);
    }

    #[test]
    fn test_live_load() {
        assert_eq!(live_load_kn(BuildingUse::Residential, 400.0, 4), 3200.0);
        assert_eq!(live_load_kn(BuildingUse::Industrial, 100.0, 1), 500.0);
        assert_eq!(live_load_kn(BuildingUse::MixedUse, 100.0, 2), 700.0);
    }

    #[test]
    fn test_height_category_boundaries() {
        assert_eq!(HeightCategory::from_height(15.0), HeightCategory::LowRise);
        assert_eq!(HeightCategory::from_height(15.01), HeightCategory::MidRise);
        assert_eq!(HeightCategory::from_height(30.0), HeightCategory::MidRise);
        assert_eq!(HeightCategory::from_height(30.01), HeightCategory::HighRise);
        assert_eq!(HeightCategory::from_height(75.0), HeightCategory::HighRise);
        assert_eq!(HeightCategory::from_height(75.01), HeightCategory::SuperHighRise);
    }

    #[test]
    fn test_foundation_selection() {
        assert_eq!(
            foundation_type(1000.0, SoilType::Rocky, HeightCategory::SuperHighRise),
            FoundationType::DeepPile
        );
        assert_eq!(
            foundation_type(60_000.0, SoilType::Rocky, HeightCategory::LowRise),
            FoundationType::DeepPile
        );
        assert_eq!(
            foundation_type(1000.0, SoilType::Rocky, HeightCategory::HighRise),
            FoundationType::Raft
        );
        assert_eq!(
            foundation_type(25_000.0, SoilType::Clay, HeightCategory::LowRise),
            FoundationType::DeepPile
        );
        assert_eq!(
            foundation_type(1000.0, SoilType::Sandy, HeightCategory::MidRise),
            FoundationType::Shallow
        );
        assert_eq!(
            foundation_type(1000.0, SoilType::Alluvial, HeightCategory::MidRise),
            FoundationType::Raft
        );
        assert_eq!(
            foundation_type(1000.0, SoilType::Clay, HeightCategory::LowRise),
            FoundationType::Shallow
        );
    }

    #[test]
    fn test_foundation_depth_table() {
        assert_eq!(foundation_depth_m(FoundationType::Shallow, HeightCategory::LowRise), 1.5);
        assert_eq!(foundation_depth_m(FoundationType::Raft, HeightCategory::HighRise), 2.5);
        assert_eq!(foundation_depth_m(FoundationType::Combined, HeightCategory::MidRise), 3.0);
        assert_eq!(foundation_depth_m(FoundationType::DeepPile, HeightCategory::HighRise), 15.0);
        assert_eq!(foundation_depth_m(FoundationType::DeepPile, HeightCategory::SuperHighRise), 25.0);
    }

    #[test]
    fn test_column_spacing() {
        assert_eq!(column_spacing_m(StructuralSystem::Steel, BuildingUse::Residential, HeightCategory::LowRise), 7.5);
        assert_eq!(column_spacing_m(StructuralSystem::Steel, BuildingUse::Commercial, HeightCategory::HighRise), 8.0);
        assert_eq!(column_spacing_m(StructuralSystem::Rcc, BuildingUse::Industrial, HeightCategory::MidRise), 7.5);
        assert_eq!(
            column_spacing_m(StructuralSystem::LoadBearing, BuildingUse::School, HeightCategory::SuperHighRise),
            3.0
        );
    }

    #[test]
    fn test_shear_wall_rules() {
        assert!(shear_wall_required(HeightCategory::HighRise, StructuralSystem::Rcc, SeismicZone::ZoneII));
        assert!(shear_wall_required(HeightCategory::MidRise, StructuralSystem::Steel, SeismicZone::ZoneIV));
        assert!(!shear_wall_required(HeightCategory::MidRise, StructuralSystem::Steel, SeismicZone::ZoneIII));
        assert!(!shear_wall_required(HeightCategory::LowRise, StructuralSystem::Rcc, SeismicZone::ZoneV));
    }

    #[test]
    fn test_load_bearing_override_beats_height() {
        assert!(!shear_wall_required(
            HeightCategory::SuperHighRise,
            StructuralSystem::LoadBearing,
            SeismicZone::ZoneV
        ));
        assert!(!shear_wall_required(HeightCategory::MidRise, StructuralSystem::LoadBearing, SeismicZone::ZoneIV));
    }

    #[test]
    fn test_beam_sizing_mentions_span() {
        assert_eq!(
            beam_sizing(6.0, HeightCategory::LowRise),
            "Primary beams: 230mm x 450mm for 6m span. Secondary beams: 230mm x 300mm"
        );
        assert!(beam_sizing(7.5, HeightCategory::HighRise).contains("7.5m span"));
    }

    #[test]
    fn test_strategy_suffix_by_system() {
        assert!(load_distribution_strategy(HeightCategory::LowRise, StructuralSystem::Steel).ends_with("faster construction."));
        assert!(load_distribution_strategy(HeightCategory::MidRise, StructuralSystem::Composite)
            .ends_with("steel and concrete."));
        assert!(load_distribution_strategy(HeightCategory::HighRise, StructuralSystem::Rcc).ends_with("with core."));
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.dead_load_kn, 16000.0);
        assert_eq!(result.live_load_kn, 3200.0);
        assert_eq!(result.total_load_kn, 19200.0);
        assert_eq!(result.height_category, HeightCategory::LowRise);
        assert_eq!(result.recommended_foundation, FoundationType::Shallow);
        assert_eq!(result.foundation_depth_m, 1.5);
        assert_eq!(result.column_spacing_m, 6.0);
        assert!(!result.shear_wall_required);
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let mut input = test_input();
        input.built_up_area_m2 = 0.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_every_category_has_a_code() {
        for category in HeightCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.code()));
        }
        for foundation in FoundationType::ALL {
            let json = serde_json::to_string(&foundation).unwrap();
            assert_eq!(json, format!("\"{}\"", foundation.code()));
        }
    }

    proptest! {
        #[test]
        fn loads_are_linear_in_area(area in 1.0f64..100_000.0, floors in 1u32..=200) {
            for system in StructuralSystem::ALL {
                prop_assert_eq!(dead_load_kn(system, area * 2.0, floors), 2.0 * dead_load_kn(system, area, floors));
            }
            for use_ in BuildingUse::ALL {
                prop_assert_eq!(live_load_kn(use_, area * 2.0, floors), 2.0 * live_load_kn(use_, area, floors));
            }
        }

        #[test]
        fn loads_are_linear_in_floors(area in 1.0f64..100_000.0, floors in 1u32..=100) {
            prop_assert_eq!(
                dead_load_kn(StructuralSystem::Rcc, area, floors * 2),
                2.0 * dead_load_kn(StructuralSystem::Rcc, area, floors)
            );
            prop_assert_eq!(
                live_load_kn(BuildingUse::Hospital, area, floors * 2),
                2.0 * live_load_kn(BuildingUse::Hospital, area, floors)
            );
        }

        #[test]
        fn height_category_is_monotonic(a in 0.1f64..500.0, b in 0.1f64..500.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(HeightCategory::from_height(low) <= HeightCategory::from_height(high));
        }
    }
}
