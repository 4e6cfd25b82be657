//! # Flood Analysis
//!
//! Plinth height, site drainage slope, basement feasibility and
//! water-resistant material selection from the survey's flood risk, water
//! table, nearby water bodies, rainfall and soil.
//!
//! Independent of every other analyzer.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{FloodRisk, SiteFacts, SoilType};
use crate::units::round_to;

/// Minimum plinth above grade before any risk adjustment (m)
pub const BASE_PLINTH_HEIGHT_M: f64 = 0.45;

/// Water table shallower than this rules out a basement (m)
pub const MIN_BASEMENT_WATER_TABLE_M: f64 = 3.0;

/// Input parameters for flood analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodInput {
    pub flood_risk: FloodRisk,
    pub elevation_m: f64,
    pub water_table_depth_m: f64,
    pub nearby_water_body: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_body_distance_m: Option<f64>,
    pub soil_type: SoilType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rainfall_mm: Option<f64>,
    pub slope_deg: f64,
}

impl FloodInput {
    pub fn from_site(site: &SiteFacts) -> Self {
        FloodInput {
            flood_risk: site.flood_risk,
            elevation_m: site.elevation_m,
            water_table_depth_m: site.water_table_depth_m,
            nearby_water_body: site.nearby_water_body,
            water_body_distance_m: site.water_body_distance_m,
            soil_type: site.soil_type,
            average_rainfall_mm: site.average_rainfall_mm,
            slope_deg: site.slope_deg,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(self.water_table_depth_m > 0.0) {
            return Err(AnalysisError::invalid_input(
                "water_table_depth_m",
                self.water_table_depth_m.to_string(),
                "Water table depth must be positive",
            ));
        }
        if let Some(distance) = self.water_body_distance_m {
            if !(distance > 0.0) {
                return Err(AnalysisError::invalid_input(
                    "water_body_distance_m",
                    distance.to_string(),
                    "Water body distance must be positive",
                ));
            }
        }
        Ok(())
    }

    fn water_body_distance(&self) -> Option<f64> {
        if self.nearby_water_body {
            self.water_body_distance_m
        } else {
            None
        }
    }
}

/// Results from flood analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodResult {
    pub minimum_plinth_height_m: f64,
    /// Site drainage slope in percent
    pub drainage_slope_percent: f64,
    pub basement_feasible: bool,
    /// In a fixed order: baseline, waterproofing, walls, flooring, proximity
    pub water_resistant_materials: Vec<String>,
    pub recommendations: Vec<String>,
}

fn risk_adjustment_m(risk: FloodRisk) -> f64 {
    match risk {
        FloodRisk::Low => 0.15,
        FloodRisk::Medium => 0.45,
        FloodRisk::High => 0.90,
        FloodRisk::VeryHigh => 1.50,
    }
}

/// Minimum plinth height in metres, rounded to 2 decimals.
pub fn minimum_plinth_height_m(input: &FloodInput) -> f64 {
    let mut height = BASE_PLINTH_HEIGHT_M + risk_adjustment_m(input.flood_risk);

    if let Some(distance) = input.water_body_distance() {
        if distance < 100.0 {
            height += 0.60;
        } else if distance < 500.0 {
            height += 0.30;
        }
    }

    if input.average_rainfall_mm.is_some_and(|r| r > 2000.0) {
        height += 0.30;
    }

    round_to(height, 2)
}

/// Drainage slope in percent, rounded to 1 decimal.
pub fn drainage_slope_percent(flood_risk: FloodRisk, soil: SoilType) -> f64 {
    let mut slope = if flood_risk.is_severe() { 3.0 } else { 2.0 };
    if soil.is_poorly_draining() {
        slope += 0.5;
    }
    round_to(slope, 1)
}

/// Whether a basement can be built without unreasonable flood exposure.
pub fn basement_feasible(input: &FloodInput) -> bool {
    if input.flood_risk.is_severe() {
        return false;
    }
    if input.water_table_depth_m < MIN_BASEMENT_WATER_TABLE_M {
        return false;
    }
    if input.water_body_distance().is_some_and(|d| d < 200.0) {
        return false;
    }
    true
}

/// Water-resistant materials, in the order they are specified.
pub fn water_resistant_materials(input: &FloodInput) -> Vec<String> {
    let mut materials = vec![
        "PCC (Plain Cement Concrete) for foundation".to_string(),
        "Waterproof cement for below-ground construction".to_string(),
    ];

    if input.flood_risk.is_severe() {
        materials.push("Polymer-modified waterproofing membrane".to_string());
        materials.push("Crystalline waterproofing admixture in concrete".to_string());
        materials.push("HDPE waterproofing sheet for basement (if applicable)".to_string());
    }

    materials.push("Burnt clay bricks or concrete blocks".to_string());
    materials.push("Cement plaster with waterproofing compound".to_string());

    if input.flood_risk != FloodRisk::Low {
        materials.push("Vitrified tiles or ceramic tiles (water-resistant)".to_string());
        materials.push("Avoid wood flooring at ground level".to_string());
    }

    if input.nearby_water_body {
        materials.push("Epoxy coating for external walls".to_string());
        materials.push("Bituminous coating for foundation".to_string());
    }

    materials
}

fn recommendations(input: &FloodInput, plinth_m: f64, slope_percent: f64, basement: bool) -> Vec<String> {
    let mut items = vec![
        format!("Maintain minimum plinth height of {}m", plinth_m),
        format!("Ensure site drainage slope of {}%", slope_percent),
    ];

    if basement {
        items.push("Basement feasible with proper waterproofing".to_string());
    } else {
        items.push("CRITICAL: Basement construction not recommended due to flood risk".to_string());
    }

    if input.flood_risk.is_severe() {
        items.push("Install sump pump with backup power".to_string());
        items.push("Elevate electrical panels above flood level".to_string());
        items.push("Use flood-resistant doors and windows".to_string());
        items.push("Create emergency drainage channels".to_string());
    }

    if input.nearby_water_body {
        items.push("Construct retaining wall if site is lower than water body".to_string());
        items.push("Install French drains around perimeter".to_string());
    }

    if input.soil_type.is_poorly_draining() {
        items.push("Improve soil drainage with sand cushion layer".to_string());
        items.push("Use geotextile fabric to prevent soil erosion".to_string());
    }

    items.push("Regular maintenance of drainage system mandatory".to_string());
    items.push("Install rainwater harvesting to reduce surface runoff".to_string());
    items
}

/// Run the full flood analysis.
pub fn calculate(input: &FloodInput) -> AnalysisResult<FloodResult> {
    input.validate()?;

    let minimum_plinth_height_m = minimum_plinth_height_m(input);
    let drainage_slope_percent = drainage_slope_percent(input.flood_risk, input.soil_type);
    let basement_feasible = basement_feasible(input);

    Ok(FloodResult {
        minimum_plinth_height_m,
        drainage_slope_percent,
        basement_feasible,
        water_resistant_materials: water_resistant_materials(input),
        recommendations: recommendations(input, minimum_plinth_height_m, drainage_slope_percent, basement_feasible),
    })
}
