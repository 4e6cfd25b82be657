//! The terminal aggregation stage: both composites plus the raw facts become
//! one final report.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::composite::{DisasterComposite, OrientationComposite};
use super::scores::{cost_efficiency_score, overall_safety_score, sustainability_score};
use super::AnalysisKind;
use crate::analysis::compliance::{ComplianceTier, Correction, EntranceSuitability, Violation};
use crate::analysis::cyclone::VortexRisk;
use crate::analysis::load::FoundationType;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{FloodRisk, GeoLocation, SeismicZone, SoilType, SubjectFacts};
use crate::settings::AnalysisSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_area_m2: Option<f64>,
    pub soil_type: SoilType,
    pub seismic_zone: SeismicZone,
    pub flood_risk: FloodRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRisk {
    pub zone: SeismicZone,
    pub safety_score: f64,
    pub base_shear_kn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodRiskSummary {
    pub level: FloodRisk,
    pub plinth_height_m: f64,
    pub basement_feasible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindRiskSummary {
    pub vortex_shedding: VortexRisk,
    pub height_to_width_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub earthquake: EarthquakeRisk,
    pub flood: FloodRiskSummary,
    pub wind: WindRiskSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub dead_load_kn: f64,
    pub live_load_kn: f64,
    /// Gravity, wind and seismic combined
    pub total_load_kn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationSummary {
    pub foundation_type: FoundationType,
    pub depth_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingSummary {
    pub column_spacing_m: f64,
    pub beam_sizing: String,
    pub shear_wall_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralSummary {
    pub loads: LoadSummary,
    pub foundation: FoundationSummary,
    pub framing: FramingSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationSummary {
    pub compliance_score: f64,
    pub overall_compliance: ComplianceTier,
    pub entrance_suitability: EntranceSuitability,
    pub violations: Vec<Violation>,
    pub corrections: Vec<Correction>,
}

/// Recommendations grouped by concern, never merged into one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub structural: Vec<String>,
    pub disaster: Vec<String>,
    pub orientation: Vec<String>,
    pub general: Vec<String>,
}

impl RecommendationBundle {
    /// Build a bundle, dropping blank and repeated entries within each list.
    pub fn new(structural: Vec<String>, disaster: Vec<String>, orientation: Vec<String>, general: Vec<String>) -> Self {
        RecommendationBundle {
            structural: distinct(structural),
            disaster: distinct(disaster),
            orientation: distinct(orientation),
            general: distinct(general),
        }
    }
}

fn distinct(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty() && seen.insert(item.clone()))
        .collect()
}

/// Final report for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub overall_safety_score: f64,
    pub cost_efficiency_score: f64,
    pub sustainability_score: f64,
    /// The orientation compliance score, carried through unchanged
    pub orientation_score: f64,
    pub survey_summary: SurveySummary,
    pub risk_analysis: RiskAnalysis,
    pub structural_summary: StructuralSummary,
    pub orientation_summary: OrientationSummary,
    pub recommendations: RecommendationBundle,
}

fn structural_recommendations(disaster: &DisasterComposite) -> Vec<String> {
    let load = &disaster.load;
    let mut items = vec![
        format!(
            "Use {} foundation at {}m depth",
            load.recommended_foundation, load.foundation_depth_m
        ),
        format!("Column spacing: {}m", load.column_spacing_m),
        load.beam_sizing.clone(),
    ];
    if load.shear_wall_required {
        items.push("Shear walls required for lateral stability".to_string());
    }
    items
}

fn disaster_recommendations(disaster: &DisasterComposite) -> Vec<String> {
    let mut items = vec![
        format!("Design for base shear: {} kN", disaster.seismic.base_shear_kn),
        format!("Minimum plinth height: {}m", disaster.flood.minimum_plinth_height_m),
        format!("Drainage slope: {}%", disaster.flood.drainage_slope_percent),
    ];
    if disaster.seismic.soft_story_detected {
        items.push("CRITICAL: Address soft story issue".to_string());
    }
    items
}

/// Compose the final report.
///
/// Fails with `PreconditionFailed` if either composite is missing; the
/// disaster composite is checked first.
pub fn compose_final_report(
    facts: &SubjectFacts,
    disaster: Option<&DisasterComposite>,
    orientation: Option<&OrientationComposite>,
    settings: &AnalysisSettings,
) -> AnalysisResult<FinalReport> {
    let Some(disaster) = disaster else {
        warn!(missing = AnalysisKind::Disaster.label(), "final report requested too early");
        return Err(AnalysisError::precondition_failed(
            AnalysisKind::Final.label(),
            AnalysisKind::Disaster.label(),
        ));
    };
    let Some(orientation) = orientation else {
        warn!(missing = AnalysisKind::Orientation.label(), "final report requested too early");
        return Err(AnalysisError::precondition_failed(
            AnalysisKind::Final.label(),
            AnalysisKind::Orientation.label(),
        ));
    };

    let site = &facts.site;
    let building = &facts.building;
    let compliance = &orientation.compliance;

    Ok(FinalReport {
        overall_safety_score: overall_safety_score(
            disaster.seismic.safety_score,
            site.flood_risk,
            disaster.vortex_shedding_risk(),
        ),
        cost_efficiency_score: cost_efficiency_score(
            building.structural_system,
            disaster.load.recommended_foundation,
            disaster.load.height_category,
        ),
        sustainability_score: sustainability_score(
            building.orientation,
            site.soil_type,
            site.flood_risk,
            site.seismic_zone,
        ),
        orientation_score: compliance.compliance_score,
        survey_summary: SurveySummary {
            location: site.location,
            plot_area_m2: site.plot_area_m2,
            soil_type: site.soil_type,
            seismic_zone: site.seismic_zone,
            flood_risk: site.flood_risk,
        },
        risk_analysis: RiskAnalysis {
            earthquake: EarthquakeRisk {
                zone: site.seismic_zone,
                safety_score: disaster.seismic.safety_score,
                base_shear_kn: disaster.seismic.base_shear_kn,
            },
            flood: FloodRiskSummary {
                level: site.flood_risk,
                plinth_height_m: disaster.flood.minimum_plinth_height_m,
                basement_feasible: disaster.flood.basement_feasible,
            },
            wind: WindRiskSummary {
                vortex_shedding: disaster.vortex_shedding_risk(),
                height_to_width_ratio: disaster.height_to_width_ratio(),
            },
        },
        structural_summary: StructuralSummary {
            loads: LoadSummary {
                dead_load_kn: disaster.load.dead_load_kn,
                live_load_kn: disaster.load.live_load_kn,
                total_load_kn: disaster.total_load_kn,
            },
            foundation: FoundationSummary {
                foundation_type: disaster.load.recommended_foundation,
                depth_m: disaster.load.foundation_depth_m,
            },
            framing: FramingSummary {
                column_spacing_m: disaster.load.column_spacing_m,
                beam_sizing: disaster.load.beam_sizing.clone(),
                shear_wall_required: disaster.load.shear_wall_required,
            },
        },
        orientation_summary: OrientationSummary {
            compliance_score: compliance.compliance_score,
            overall_compliance: compliance.overall_compliance,
            entrance_suitability: compliance.entrance_suitability,
            violations: compliance.violations.clone(),
            corrections: compliance.corrections.clone(),
        },
        recommendations: RecommendationBundle::new(
            structural_recommendations(disaster),
            disaster_recommendations(disaster),
            compliance.corrections.iter().map(|c| c.solution.clone()).collect(),
            settings.general_checklist.clone(),
        ),
    })
}
