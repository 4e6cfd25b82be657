//! # Seismic Analysis
//!
//! Equivalent static base shear, a 0-100 earthquake safety score, soft-story
//! detection and shear-wall placement guidance.
//!
//! Base shear follows the simplified code form
//!
//! ```text
//! Vb = (Z × I × Sa/g × W) / (2 × R)
//! ```
//!
//! with importance factor I = 1.5 and average response acceleration
//! Sa/g = 2.5 held constant. The seismic weight W is the total gravity load
//! from [`crate::analysis::load`], so this stage always runs after it.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{
    validate_floor_count, validate_floor_heights, BuildingFacts, SeismicZone, SiteFacts, SoilType, StructuralSystem,
};
use crate::units::round_to;

/// Importance factor, treating every building as an important structure
pub const IMPORTANCE_FACTOR: f64 = 1.5;

/// Average response acceleration coefficient Sa/g
pub const SPECTRAL_ACCELERATION: f64 = 2.5;

/// A storey taller than this multiple of the average is a soft story
pub const SOFT_STORY_RATIO: f64 = 1.3;

/// Floors above which shear walls are always placed
const SHEAR_WALL_FLOOR_THRESHOLD: u32 = 5;

/// Input parameters for seismic analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicInput {
    pub seismic_zone: SeismicZone,
    pub soil_type: SoilType,
    pub structural_system: StructuralSystem,
    pub building_height_m: f64,
    /// Seismic weight, the total gravity load from the load analysis
    pub total_weight_kn: f64,
    pub total_floors: u32,
    pub built_up_area_m2: f64,
    /// Measured storey heights; `None` means every storey is average height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_heights_m: Option<Vec<f64>>,
}

impl SeismicInput {
    /// Assemble the seismic input; `total_weight_kn` comes from the load analysis.
    pub fn from_facts(site: &SiteFacts, building: &BuildingFacts, total_weight_kn: f64) -> Self {
        SeismicInput {
            seismic_zone: site.seismic_zone,
            soil_type: site.soil_type,
            structural_system: building.structural_system,
            building_height_m: building.total_height_m,
            total_weight_kn,
            total_floors: building.total_floors,
            built_up_area_m2: building.built_up_area_m2,
            floor_heights_m: building.floor_heights_m.clone(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(self.total_weight_kn >= 0.0) || !self.total_weight_kn.is_finite() {
            return Err(AnalysisError::invalid_input(
                "total_weight_kn",
                self.total_weight_kn.to_string(),
                "Seismic weight cannot be negative",
            ));
        }
        validate_floor_count(self.total_floors)?;
        if !(self.building_height_m > 0.0) {
            return Err(AnalysisError::invalid_input(
                "building_height_m",
                self.building_height_m.to_string(),
                "Height must be positive",
            ));
        }
        if !(self.built_up_area_m2 > 0.0) {
            return Err(AnalysisError::invalid_input(
                "built_up_area_m2",
                self.built_up_area_m2.to_string(),
                "Built-up area must be positive",
            ));
        }
        if let Some(heights) = &self.floor_heights_m {
            validate_floor_heights(heights, self.total_floors)?;
        }
        Ok(())
    }

    fn storey_heights(&self) -> Vec<f64> {
        match &self.floor_heights_m {
            Some(heights) => heights.clone(),
            None => {
                let uniform = self.building_height_m / self.total_floors as f64;
                vec![uniform; self.total_floors as usize]
            }
        }
    }
}

/// Where shear walls go, in words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallPlacementNotes {
    pub core_walls: String,
    pub peripheral_walls: String,
    pub distribution: String,
}

/// Shear-wall placement guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearWallPlacement {
    pub required: bool,
    /// Minimum plan area of shear wall per floor
    pub minimum_wall_area_m2: f64,
    pub placement: WallPlacementNotes,
    pub recommendations: Vec<String>,
}

/// Results from seismic analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicResult {
    pub base_shear_kn: f64,
    /// 0 (worst) to 100 (best)
    pub safety_score: f64,
    pub soft_story_detected: bool,
    pub shear_wall_placement: ShearWallPlacement,
    pub recommendations: Vec<String>,
}

/// Zone factor Z
pub fn zone_factor(zone: SeismicZone) -> f64 {
    match zone {
        SeismicZone::ZoneII => 0.10,
        SeismicZone::ZoneIII => 0.16,
        SeismicZone::ZoneIV => 0.24,
        SeismicZone::ZoneV => 0.36,
    }
}

/// Response reduction factor R
pub fn response_reduction_factor(system: StructuralSystem) -> f64 {
    match system {
        StructuralSystem::Rcc | StructuralSystem::Steel => 5.0,
        StructuralSystem::Composite => 4.5,
        StructuralSystem::LoadBearing => 1.5,
    }
}

fn zone_penalty(zone: SeismicZone) -> i32 {
    match zone {
        SeismicZone::ZoneII => 5,
        SeismicZone::ZoneIII => 10,
        SeismicZone::ZoneIV => 20,
        SeismicZone::ZoneV => 30,
    }
}

fn soil_penalty(soil: SoilType) -> i32 {
    match soil {
        SoilType::BlackCotton => 15,
        SoilType::Alluvial => 10,
        SoilType::Clay => 8,
        SoilType::Laterite | SoilType::Sandy | SoilType::Rocky => 0,
    }
}

/// Design base shear in kN, rounded to 2 decimals.
pub fn base_shear_kn(zone: SeismicZone, system: StructuralSystem, total_weight_kn: f64) -> f64 {
    let shear = (zone_factor(zone) * IMPORTANCE_FACTOR * SPECTRAL_ACCELERATION * total_weight_kn)
        / (2.0 * response_reduction_factor(system));
    round_to(shear, 2)
}

/// True when any storey is taller than 1.3× the average storey height.
pub fn detect_soft_story(floor_heights_m: &[f64], average_height_m: f64) -> bool {
    floor_heights_m.iter().any(|h| *h > SOFT_STORY_RATIO * average_height_m)
}

/// Shear-wall placement guidance for the plan area and zone.
pub fn shear_wall_placement(built_up_area_m2: f64, total_floors: u32, zone: SeismicZone) -> ShearWallPlacement {
    let high_seismic = zone.is_high();
    let wall_density = if high_seismic { 0.02 } else { 0.015 };

    let mut recommendations = vec![
        "Place shear walls symmetrically to avoid torsion".to_string(),
        "Minimum thickness: 150mm for low-rise, 200mm for high-rise".to_string(),
        "Continuous from foundation to roof".to_string(),
    ];
    if high_seismic {
        recommendations.push("Use coupled shear walls for better ductility".to_string());
    }

    ShearWallPlacement {
        required: total_floors > SHEAR_WALL_FLOOR_THRESHOLD || high_seismic,
        minimum_wall_area_m2: round_to(built_up_area_m2 * wall_density, 2),
        placement: WallPlacementNotes {
            core_walls: "Around lift and staircase cores".to_string(),
            peripheral_walls: "At building corners and edges".to_string(),
            distribution: "Symmetrically distributed in both directions".to_string(),
        },
        recommendations,
    }
}

/// Earthquake safety score, clamped to [0, 100].
pub fn safety_score(zone: SeismicZone, soil: SoilType, system: StructuralSystem, height_m: f64) -> f64 {
    let mut score: i32 = 100;

    score -= zone_penalty(zone);
    score -= soil_penalty(soil);

    if system == StructuralSystem::LoadBearing {
        score -= 20;
    }

    if height_m > 50.0 {
        score -= 15;
    } else if height_m > 30.0 {
        score -= 10;
    }

    // Ductile frames earn back some margin where it matters most
    if zone.is_high() && matches!(system, StructuralSystem::Rcc | StructuralSystem::Steel) {
        score += 10;
    }

    score.clamp(0, 100) as f64
}

fn recommendations(base_shear_kn: f64, soft_story: bool, zone: SeismicZone) -> Vec<String> {
    let mut items = vec![
        format!("Design for base shear of {} kN", base_shear_kn),
        "Use ductile detailing as per IS 13920".to_string(),
    ];
    if soft_story {
        items.push("CRITICAL: Soft story detected - strengthen ground floor".to_string());
    }
    if zone == SeismicZone::ZoneV {
        items.push("Use base isolation for critical structures".to_string());
    }
    items.push("Ensure proper anchorage of non-structural elements".to_string());
    items.push("Regular structural health monitoring recommended".to_string());
    items
}

/// Run the full seismic analysis.
pub fn calculate(input: &SeismicInput) -> AnalysisResult<SeismicResult> {
    input.validate()?;

    let base_shear_kn = base_shear_kn(input.seismic_zone, input.structural_system, input.total_weight_kn);

    let heights = input.storey_heights();
    let average = heights.iter().sum::<f64>() / heights.len() as f64;
    let soft_story_detected = detect_soft_story(&heights, average);

    Ok(SeismicResult {
        base_shear_kn,
        safety_score: safety_score(
            input.seismic_zone,
            input.soil_type,
            input.structural_system,
            input.building_height_m,
        ),
        soft_story_detected,
        shear_wall_placement: shear_wall_placement(input.built_up_area_m2, input.total_floors, input.seismic_zone),
        recommendations: recommendations(base_shear_kn, soft_story_detected, input.seismic_zone),
    })
}
