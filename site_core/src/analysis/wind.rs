//! # Wind Analysis
//!
//! Design wind pressure and along-wind load, the orientation that presents
//! the narrow face to the prevailing wind, an aerodynamic massing tag and a
//! ventilation strategy.
//!
//! ## Method
//!
//! ```text
//! Vz = V × k2 × k3          (terrain and height factors)
//! pz = 0.6 × Vz² / 1000     (kN/m²)
//! F  = pz × (H × B) × Cf    (Cf = 1.2)
//! ```
//!
//! The footprint is taken as square, so the exposed width B is √(area).
//!
//! ## Example
//!
//! ```rust
//! use site_core::analysis::wind::{calculate, WindInput};
//! use site_core::facts::{Orientation, TerrainCategory};
//!
//! let input = WindInput {
//!     direction_deg: 0.0,
//!     average_speed_ms: 40.0,
//!     terrain: TerrainCategory::Urban,
//!     building_height_m: 10.0,
//!     building_width_m: 20.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.wind_pressure_kn_m2, 0.96);
//! assert_eq!(result.optimal_orientation, Orientation::East);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{BuildingFacts, Orientation, TerrainCategory, WindFacts};
use crate::units::{round_to, Degrees};

/// Force coefficient for a rectangular building
pub const FORCE_COEFFICIENT: f64 = 1.2;

/// Assumed storey height when estimating floors from total height (m)
pub const NOMINAL_STOREY_HEIGHT_M: f64 = 3.0;

/// Floors above which natural ventilation needs mechanical assistance
const NATURAL_VENTILATION_MAX_FLOORS: u32 = 10;

/// Input parameters for wind analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindInput {
    /// Prevailing direction the wind blows from
    pub direction_deg: f64,
    pub average_speed_ms: f64,
    pub terrain: TerrainCategory,
    pub building_height_m: f64,
    pub building_width_m: f64,
}

impl WindInput {
    pub fn from_facts(wind: &WindFacts, building: &BuildingFacts) -> Self {
        WindInput {
            direction_deg: wind.direction_deg,
            average_speed_ms: wind.average_speed_ms,
            terrain: wind.terrain,
            building_height_m: building.total_height_m,
            building_width_m: building.footprint_width_m(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(0.0..=360.0).contains(&self.direction_deg) {
            return Err(AnalysisError::invalid_input(
                "direction_deg",
                self.direction_deg.to_string(),
                "Wind direction must be between 0 and 360",
            ));
        }
        if !(self.average_speed_ms > 0.0) {
            return Err(AnalysisError::invalid_input(
                "average_speed_ms",
                self.average_speed_ms.to_string(),
                "Wind speed must be positive",
            ));
        }
        if !(self.building_height_m > 0.0) {
            return Err(AnalysisError::invalid_input(
                "building_height_m",
                self.building_height_m.to_string(),
                "Height must be positive",
            ));
        }
        if !(self.building_width_m > 0.0) {
            return Err(AnalysisError::invalid_input(
                "building_width_m",
                self.building_width_m.to_string(),
                "Width must be positive",
            ));
        }
        Ok(())
    }

    pub fn height_to_width_ratio(&self) -> f64 {
        self.building_height_m / self.building_width_m
    }
}

/// Massing form that suits the slenderness and wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AerodynamicForm {
    TaperedStreamlined,
    SteppedSetback,
    RoundedCorners,
    RectangularOptimized,
}

/// Whether floors can rely on cross-ventilation alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentilationMode {
    NaturalCrossVentilation,
    MechanicalAssisted,
}

/// Primary opening layout relative to the prevailing wind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryVentilation {
    pub direction_deg: f64,
    pub opening_placement: String,
    pub cross_ventilation_feasible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationStrategy {
    pub primary_ventilation: PrimaryVentilation,
    pub floor_wise_strategy: VentilationMode,
    pub recommendations: Vec<String>,
}

/// Results from wind analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResult {
    pub wind_pressure_kn_m2: f64,
    pub wind_load_kn: f64,
    pub optimal_orientation: Orientation,
    pub aerodynamic_form: AerodynamicForm,
    pub ventilation_strategy: VentilationStrategy,
}

/// Terrain roughness factor k2
pub fn terrain_factor(terrain: TerrainCategory) -> f64 {
    match terrain {
        TerrainCategory::Open => 1.05,
        TerrainCategory::Urban => 1.00,
        TerrainCategory::DenseUrban => 0.91,
        TerrainCategory::VeryDenseUrban => 0.80,
    }
}

/// Height factor k3, growing 1% per metre above 10 m
pub fn height_factor(height_m: f64) -> f64 {
    if height_m <= 10.0 {
        1.0
    } else {
        1.0 + 0.01 * (height_m - 10.0)
    }
}

/// Design wind pressure in kN/m², rounded to 3 decimals.
pub fn wind_pressure_kn_m2(average_speed_ms: f64, terrain: TerrainCategory, height_m: f64) -> f64 {
    let design_speed = average_speed_ms * terrain_factor(terrain) * height_factor(height_m);
    round_to(0.6 * design_speed.powi(2) / 1000.0, 3)
}

/// Along-wind load on the exposed face in kN, rounded to 2 decimals.
pub fn wind_load_kn(pressure_kn_m2: f64, height_m: f64, width_m: f64) -> f64 {
    round_to(pressure_kn_m2 * (height_m * width_m) * FORCE_COEFFICIENT, 2)
}

/// Orientation perpendicular to the prevailing wind.
pub fn optimal_orientation(wind_direction_deg: f64) -> Orientation {
    Orientation::nearest(Degrees(wind_direction_deg).rotated(90.0))
}

pub fn aerodynamic_form(height_to_width_ratio: f64, wind_speed_ms: f64) -> AerodynamicForm {
    if height_to_width_ratio > 5.0 {
        if wind_speed_ms > 40.0 {
            AerodynamicForm::TaperedStreamlined
        } else {
            AerodynamicForm::SteppedSetback
        }
    } else if height_to_width_ratio > 3.0 {
        AerodynamicForm::RoundedCorners
    } else {
        AerodynamicForm::RectangularOptimized
    }
}

/// Ventilation strategy for an estimated floor count.
pub fn ventilation_strategy(wind_direction_deg: f64, floor_count: u32) -> VentilationStrategy {
    let mut recommendations = vec![
        "Place primary openings on windward side".to_string(),
        "Secondary openings on leeward side for cross-ventilation".to_string(),
        "Avoid openings on high-pressure zones".to_string(),
    ];
    if floor_count > 5 {
        recommendations.push("Consider wind catchers for upper floors".to_string());
    }

    VentilationStrategy {
        primary_ventilation: PrimaryVentilation {
            direction_deg: wind_direction_deg,
            opening_placement: "WINDWARD_LEEWARD".to_string(),
            cross_ventilation_feasible: true,
        },
        floor_wise_strategy: if floor_count > NATURAL_VENTILATION_MAX_FLOORS {
            VentilationMode::MechanicalAssisted
        } else {
            VentilationMode::NaturalCrossVentilation
        },
        recommendations,
    }
}

/// Floors estimated from total height at a nominal 3 m storey
pub fn estimated_floor_count(height_m: f64) -> u32 {
    (height_m / NOMINAL_STOREY_HEIGHT_M).floor() as u32
}

/// Run the full wind analysis.
pub fn calculate(input: &WindInput) -> AnalysisResult<WindResult> {
    input.validate()?;

    let wind_pressure_kn_m2 = wind_pressure_kn_m2(input.average_speed_ms, input.terrain, input.building_height_m);

    Ok(WindResult {
        wind_pressure_kn_m2,
        wind_load_kn: wind_load_kn(wind_pressure_kn_m2, input.building_height_m, input.building_width_m),
        optimal_orientation: optimal_orientation(input.direction_deg),
        aerodynamic_form: aerodynamic_form(input.height_to_width_ratio(), input.average_speed_ms),
        ventilation_strategy: ventilation_strategy(
            input.direction_deg,
            estimated_floor_count(input.building_height_m),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fixtures;

    fn test_input() -> WindInput {
        WindInput {
            direction_deg: 0.0,
            average_speed_ms: 40.0,
            terrain: TerrainCategory::Urban,
            building_height_m: 10.0,
            building_width_m: 20.0,
        }
    }

    #[test]
    fn test_from_facts_carries_only_pressure_inputs() {
        let input = WindInput::from_facts(&fixtures::wind(), &fixtures::building());
        assert_eq!(input.average_speed_ms, 33.0);
        assert_eq!(input.building_width_m, 20.0);

        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("peak_gust_ms").is_none());
    }

    #[test]
    fn test_wind_pressure() {
        // 0.6 * 40² / 1000 = 0.96
        assert_eq!(wind_pressure_kn_m2(40.0, TerrainCategory::Urban, 10.0), 0.96);
        // Vz = 40 * 1.05 * 1.1 = 46.2 -> 0.6 * 2134.44 / 1000 = 1.281
        assert_eq!(wind_pressure_kn_m2(40.0, TerrainCategory::Open, 20.0), 1.281);
    }

    #[test]
    fn test_height_factor() {
        assert_eq!(height_factor(5.0), 1.0);
        assert_eq!(height_factor(10.0), 1.0);
        assert!((height_factor(60.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_wind_load() {
        // 0.96 * (10 * 20) * 1.2 = 230.4
        assert_eq!(wind_load_kn(0.96, 10.0, 20.0), 230.4);
    }

    #[test]
    fn test_optimal_orientation_rotates_ninety_degrees() {
        assert_eq!(optimal_orientation(0.0), Orientation::East);
        assert_eq!(optimal_orientation(90.0), Orientation::South);
        assert_eq!(optimal_orientation(225.0), Orientation::NorthWest);
        assert_eq!(optimal_orientation(270.0), Orientation::North);
        // 300 + 90 = 30 -> NE (15° away) rather than N (30° away)
        assert_eq!(optimal_orientation(300.0), Orientation::NorthEast);
        // 292.5 + 90 = 22.5, tie between N and NE resolved to N
        assert_eq!(optimal_orientation(292.5), Orientation::North);
    }

    #[test]
    fn test_aerodynamic_form() {
        assert_eq!(aerodynamic_form(6.0, 45.0), AerodynamicForm::TaperedStreamlined);
        assert_eq!(aerodynamic_form(6.0, 40.0), AerodynamicForm::SteppedSetback);
        assert_eq!(aerodynamic_form(4.0, 60.0), AerodynamicForm::RoundedCorners);
        assert_eq!(aerodynamic_form(3.0, 60.0), AerodynamicForm::RectangularOptimized);
    }

    #[test]
    fn test_ventilation_strategy() {
        let low = ventilation_strategy(45.0, 4);
        assert_eq!(low.floor_wise_strategy, VentilationMode::NaturalCrossVentilation);
        assert_eq!(low.recommendations.len(), 3);
        assert_eq!(low.primary_ventilation.direction_deg, 45.0);

        let mid = ventilation_strategy(45.0, 10);
        assert_eq!(mid.floor_wise_strategy, VentilationMode::NaturalCrossVentilation);
        assert_eq!(mid.recommendations.len(), 4);

        let tall = ventilation_strategy(45.0, 11);
        assert_eq!(tall.floor_wise_strategy, VentilationMode::MechanicalAssisted);
    }

    #[test]
    fn test_estimated_floor_count() {
        assert_eq!(estimated_floor_count(12.0), 4);
        assert_eq!(estimated_floor_count(32.9), 10);
        assert_eq!(estimated_floor_count(33.0), 11);
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.wind_pressure_kn_m2, 0.96);
        assert_eq!(result.wind_load_kn, 230.4);
        assert_eq!(result.optimal_orientation, Orientation::East);
        assert_eq!(result.aerodynamic_form, AerodynamicForm::RectangularOptimized);
    }

    #[test]
    fn test_serialization_codes() {
        let json = serde_json::to_string(&AerodynamicForm::TaperedStreamlined).unwrap();
        assert_eq!(json, "\"TAPERED_STREAMLINED\"");
        let json = serde_json::to_string(&VentilationMode::MechanicalAssisted).unwrap();
        assert_eq!(json, "\"MECHANICAL_ASSISTED\"");
    }
}
