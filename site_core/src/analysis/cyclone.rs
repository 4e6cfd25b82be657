//! # Cyclone Analysis
//!
//! Vortex-shedding risk for slender buildings, the external pressure on each
//! face under the peak gust, massing guidance and an ordered list of
//! cyclone-resistant design measures.
//!
//! Uses the raw wind facts (peak gust), not the wind stage's outputs.
//!
//! ## Pressure zones
//!
//! | Zone     | Cp   |
//! |----------|------|
//! | Windward | +0.8 |
//! | Leeward  | -0.5 |
//! | Side     | -0.7 |
//! | Roof     | -0.9 |
//!
//! `p = Cp × 0.6 × Vg² / 1000` (kN/m²). The roof is always the critical zone.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{BuildingFacts, SiteFacts, WindFacts};
use crate::units::round_to;

/// Coastal sites closer than this get corrosion measures (km)
pub const COASTAL_DISTANCE_KM: f64 = 10.0;

/// Input parameters for cyclone analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycloneInput {
    pub peak_gust_ms: f64,
    pub building_height_m: f64,
    pub building_width_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_coast_km: Option<f64>,
}

impl CycloneInput {
    pub fn from_facts(wind: &WindFacts, site: &SiteFacts, building: &BuildingFacts) -> Self {
        CycloneInput {
            peak_gust_ms: wind.peak_gust_ms,
            building_height_m: building.total_height_m,
            building_width_m: building.footprint_width_m(),
            distance_from_coast_km: site.distance_from_coast_km,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(self.peak_gust_ms > 0.0) {
            return Err(AnalysisError::invalid_input(
                "peak_gust_ms",
                self.peak_gust_ms.to_string(),
                "Peak gust speed must be positive",
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

    fn slenderness(&self) -> f64 {
        self.building_height_m / self.building_width_m
    }

    /// A recorded distance of 0 km is a shoreline site; only `None` is unknown.
    fn is_coastal(&self) -> bool {
        self.distance_from_coast_km
            .is_some_and(|d| d < COASTAL_DISTANCE_KM)
    }
}

/// Vortex-shedding risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VortexRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl VortexRisk {
    pub fn code(&self) -> &'static str {
        match self {
            VortexRisk::Low => "LOW",
            VortexRisk::Medium => "MEDIUM",
            VortexRisk::High => "HIGH",
        }
    }
}

/// Building face for pressure purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneFace {
    Windward,
    Leeward,
    Side,
    Roof,
}

impl ZoneFace {
    pub const ALL: [ZoneFace; 4] = [ZoneFace::Windward, ZoneFace::Leeward, ZoneFace::Side, ZoneFace::Roof];

    /// External pressure coefficient Cp
    pub fn coefficient(&self) -> f64 {
        match self {
            ZoneFace::Windward => 0.8,
            ZoneFace::Leeward => -0.5,
            ZoneFace::Side => -0.7,
            ZoneFace::Roof => -0.9,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ZoneFace::Windward => "Maximum positive pressure",
            ZoneFace::Leeward => "Negative pressure (suction)",
            ZoneFace::Side => "Side wall suction",
            ZoneFace::Roof => "Roof suction (critical)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureZone {
    pub description: String,
    pub coefficient: f64,
    /// Negative values are suction
    pub pressure_kn_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureZones {
    pub windward: PressureZone,
    pub leeward: PressureZone,
    pub side: PressureZone,
    pub roof: PressureZone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureZoneBreakdown {
    pub zones: PressureZones,
    pub critical_zone: ZoneFace,
    pub recommendation: String,
}

/// Results from cyclone analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycloneResult {
    pub vortex_shedding_risk: VortexRisk,
    /// Rounded to 2 decimals
    pub height_to_width_ratio: f64,
    pub pressure_zones: PressureZoneBreakdown,
    pub shape_optimization: String,
    pub recommendations: Vec<String>,
}

/// Vortex-shedding risk from slenderness and peak gust.
///
/// # Example
/// ```
/// use site_core::analysis::cyclone::{vortex_shedding_risk, VortexRisk};
///
/// assert_eq!(vortex_shedding_risk(40.0, 5.0, 45.0), VortexRisk::High);
/// assert_eq!(vortex_shedding_risk(40.0, 5.0, 25.0), VortexRisk::Low);
/// ```
pub fn vortex_shedding_risk(height_m: f64, width_m: f64, gust_ms: f64) -> VortexRisk {
    let ratio = height_m / width_m;
    if ratio > 6.0 && gust_ms > 40.0 {
        VortexRisk::High
    } else if ratio > 4.0 && gust_ms > 30.0 {
        VortexRisk::Medium
    } else {
        VortexRisk::Low
    }
}

/// Pressure on one face under the given gust, in kN/m².
pub fn zone_pressure_kn_m2(face: ZoneFace, gust_ms: f64) -> f64 {
    face.coefficient() * 0.6 * gust_ms.powi(2) / 1000.0
}

pub fn pressure_zones(gust_ms: f64) -> PressureZoneBreakdown {
    let zone = |face: ZoneFace| PressureZone {
        description: face.description().to_string(),
        coefficient: face.coefficient(),
        pressure_kn_m2: zone_pressure_kn_m2(face, gust_ms),
    };

    PressureZoneBreakdown {
        zones: PressureZones {
            windward: zone(ZoneFace::Windward),
            leeward: zone(ZoneFace::Leeward),
            side: zone(ZoneFace::Side),
            roof: zone(ZoneFace::Roof),
        },
        critical_zone: ZoneFace::Roof,
        recommendation: "Ensure proper roof anchorage to resist uplift forces".to_string(),
    }
}

/// Massing guidance for the expected gust speed.
pub fn shape_optimization(height_to_width_ratio: f64, gust_ms: f64) -> String {
    let text = if gust_ms > 50.0 {
        if height_to_width_ratio > 5.0 {
            "TAPERED_AERODYNAMIC: Taper building towards top to reduce wind load. \
             Consider setbacks every 15-20 floors. \
             Rounded corners to minimize vortex formation."
        } else {
            "STREAMLINED_RECTANGULAR: Use rounded corners with radius ≥ 10% of width. \
             Avoid sharp edges. Consider chamfered corners."
        }
    } else if gust_ms > 35.0 {
        "MODIFIED_RECTANGULAR: Slight corner modifications sufficient. \
         Ensure proper cladding attachment. \
         Avoid large overhangs."
    } else {
        "STANDARD_RECTANGULAR: Standard rectangular form acceptable. \
         Focus on structural integrity and connection details."
    };
    text.to_string()
}

/// Cyclone design measures. Order is stable for a given input.
pub fn recommendations(input: &CycloneInput, risk: VortexRisk) -> Vec<String> {
    let mut items: Vec<&str> = Vec::new();

    if input.peak_gust_ms > 50.0 {
        items.extend([
            "CRITICAL: Design for cyclone-prone area as per IS 875 Part 3",
            "Use cyclone-resistant roofing with proper anchorage",
            "Install hurricane straps for roof-to-wall connections",
            "Use impact-resistant glazing or shutters for windows",
        ]);
    }

    match risk {
        VortexRisk::High => items.extend([
            "Install helical strakes or spoilers to disrupt vortex formation",
            "Consider tuned mass damper for tall slender structures",
            "Conduct wind tunnel testing for final design validation",
        ]),
        VortexRisk::Medium => items.extend([
            "Monitor for wind-induced vibrations",
            "Consider aerodynamic modifications if needed",
        ]),
        VortexRisk::Low => {}
    }

    items.extend([
        "Strengthen roof connections - critical for uplift resistance",
        "Use continuous load path from roof to foundation",
        "Ensure proper anchorage of cladding and non-structural elements",
    ]);

    if input.is_coastal() {
        items.extend([
            "Use corrosion-resistant materials (coastal environment)",
            "Apply protective coatings to steel elements",
            "Regular inspection and maintenance critical",
        ]);
    }

    if input.building_height_m > 50.0 {
        items.extend([
            "Install anemometers for wind monitoring",
            "Design for dynamic wind effects",
            "Consider supplemental damping systems",
        ]);
    }

    items.extend([
        "Ensure all openings are properly sealed and reinforced",
        "Design drainage to handle extreme rainfall during cyclones",
        "Create emergency evacuation plan for occupants",
    ]);

    items.into_iter().map(String::from).collect()
}

/// Run the full cyclone analysis.
pub fn calculate(input: &CycloneInput) -> AnalysisResult<CycloneResult> {
    input.validate()?;

    let ratio = input.slenderness();
    let vortex_shedding_risk = vortex_shedding_risk(input.building_height_m, input.building_width_m, input.peak_gust_ms);

    Ok(CycloneResult {
        vortex_shedding_risk,
        height_to_width_ratio: round_to(ratio, 2),
        pressure_zones: pressure_zones(input.peak_gust_ms),
        shape_optimization: shape_optimization(ratio, input.peak_gust_ms),
        recommendations: recommendations(input, vortex_shedding_risk),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> CycloneInput {
        CycloneInput {
            peak_gust_ms: 45.0,
            building_height_m: 40.0,
            building_width_m: 5.0,
            distance_from_coast_km: None,
        }
    }

    #[test]
    fn test_vortex_risk_scenarios() {
        assert_eq!(vortex_shedding_risk(40.0, 5.0, 45.0), VortexRisk::High);
        assert_eq!(vortex_shedding_risk(40.0, 5.0, 25.0), VortexRisk::Low);
        assert_eq!(vortex_shedding_risk(40.0, 5.0, 35.0), VortexRisk::Medium);
        // ratio exactly 6 is not above the high threshold
        assert_eq!(vortex_shedding_risk(30.0, 5.0, 45.0), VortexRisk::Medium);
        assert_eq!(vortex_shedding_risk(20.0, 5.0, 45.0), VortexRisk::Low);
    }

    #[test]
    fn test_pressure_zones() {
        let breakdown = pressure_zones(50.0);
        // 0.6 * 2500 / 1000 = 1.5
        assert!((breakdown.zones.windward.pressure_kn_m2 - 1.2).abs() < 1e-9);
        assert!((breakdown.zones.leeward.pressure_kn_m2 + 0.75).abs() < 1e-9);
        assert!((breakdown.zones.side.pressure_kn_m2 + 1.05).abs() < 1e-9);
        assert!((breakdown.zones.roof.pressure_kn_m2 + 1.35).abs() < 1e-9);
        assert_eq!(breakdown.critical_zone, ZoneFace::Roof);
        assert_eq!(breakdown.zones.roof.description, "Roof suction (critical)");
    }

    #[test]
    fn test_roof_has_largest_suction() {
        for face in ZoneFace::ALL {
            assert!(ZoneFace::Roof.coefficient().abs() >= face.coefficient().abs());
        }
    }

    #[test]
    fn test_shape_optimization() {
        assert!(shape_optimization(6.0, 55.0).starts_with("TAPERED_AERODYNAMIC:"));
        assert!(shape_optimization(4.0, 55.0).starts_with("STREAMLINED_RECTANGULAR:"));
        assert!(shape_optimization(8.0, 40.0).starts_with("MODIFIED_RECTANGULAR:"));
        assert!(shape_optimization(8.0, 35.0).starts_with("STANDARD_RECTANGULAR:"));
    }

    #[test]
    fn test_recommendations_minimal() {
        let input = CycloneInput {
            peak_gust_ms: 30.0,
            building_height_m: 12.0,
            building_width_m: 20.0,
            distance_from_coast_km: None,
        };
        let items = recommendations(&input, VortexRisk::Low);
        assert_eq!(items.len(), 6);
        assert_eq!(items[0], "Strengthen roof connections - critical for uplift resistance");
        assert_eq!(items[5], "Create emergency evacuation plan for occupants");
    }

    #[test]
    fn test_recommendations_all_gates() {
        let input = CycloneInput {
            peak_gust_ms: 60.0,
            building_height_m: 80.0,
            building_width_m: 10.0,
            distance_from_coast_km: Some(4.0),
        };
        let items = recommendations(&input, VortexRisk::High);
        assert_eq!(items.len(), 4 + 3 + 3 + 3 + 3 + 3);
        assert_eq!(items[0], "CRITICAL: Design for cyclone-prone area as per IS 875 Part 3");
        assert_eq!(items[4], "Install helical strakes or spoilers to disrupt vortex formation");
        assert_eq!(items[10], "Use corrosion-resistant materials (coastal environment)");
        assert_eq!(items[13], "Install anemometers for wind monitoring");
    }

    #[test]
    fn test_coast_distance_gate() {
        let mut input = test_input();
        input.distance_from_coast_km = Some(10.0);
        assert!(!input.is_coastal());
        input.distance_from_coast_km = Some(9.9);
        assert!(input.is_coastal());
        input.distance_from_coast_km = Some(0.0);
        assert!(input.is_coastal());
        input.distance_from_coast_km = None;
        assert!(!input.is_coastal());
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.vortex_shedding_risk, VortexRisk::High);
        assert_eq!(result.height_to_width_ratio, 8.0);
        assert!(result.shape_optimization.starts_with("MODIFIED_RECTANGULAR:"));
    }

    #[test]
    fn test_ratio_rounding() {
        let input = CycloneInput {
            peak_gust_ms: 30.0,
            building_height_m: 12.0,
            building_width_m: 20.0_f64.sqrt() * 10.0,
            distance_from_coast_km: None,
        };
        let result = calculate(&input).unwrap();
        // 12 / 44.72 = 0.2683
        assert_eq!(result.height_to_width_ratio, 0.27);
    }

    #[test]
    fn test_zero_width_rejected() {
        let mut input = test_input();
        input.building_width_m = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
