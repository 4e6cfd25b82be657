//! # Analysis Pipeline
//!
//! Runs the analyzers in dependency order and assembles the composites.
//!
//! ```text
//! load ─> seismic ─┐
//! flood ───────────┤
//! wind* ───────────┼─> DisasterComposite
//! cyclone* ────────┘
//! compliance ──────> OrientationComposite
//! ```
//!
//! `*` only when the subject has wind facts. Facts are validated once here;
//! an invalid fact set never reaches an analyzer.
//!
//! ## Example
//!
//! ```rust
//! use site_core::facts::SubjectFacts;
//! use site_core::pipeline::{analyze_hazards, analyze_orientation, build_final_report};
//! use site_core::settings::AnalysisSettings;
//!
//! let facts: SubjectFacts = serde_json::from_str(r#"{
//!     "site": {
//!         "soil_type": "ROCKY", "seismic_zone": "ZONE_II", "flood_risk": "LOW",
//!         "elevation_m": 40.0, "water_table_depth_m": 8.0, "slope_deg": 1.0,
//!         "nearby_water_body": false
//!     },
//!     "building": {
//!         "building_use": "RESIDENTIAL", "total_floors": 3, "floor_height_m": 3.0,
//!         "total_height_m": 9.0, "built_up_area_m2": 150.0,
//!         "orientation": "EAST", "structural_system": "RCC"
//!     }
//! }"#).unwrap();
//!
//! let settings = AnalysisSettings::default();
//! let disaster = analyze_hazards(&facts).unwrap();
//! let orientation = analyze_orientation(&facts, &settings).unwrap();
//! let report = build_final_report(&facts, Some(&disaster), Some(&orientation), &settings).unwrap();
//!
//! assert_eq!(report.sustainability_score, 100.0);
//! ```

use tracing::{debug, info};

use crate::analysis::{compliance, cyclone, flood, load, seismic, wind};
use crate::errors::AnalysisResult;
use crate::facts::SubjectFacts;
use crate::report::{compose_final_report, DisasterComposite, FinalReport, OrientationComposite};
use crate::settings::AnalysisSettings;

/// Run every hazard analyzer and assemble the disaster composite.
pub fn analyze_hazards(facts: &SubjectFacts) -> AnalysisResult<DisasterComposite> {
    facts.validate()?;
    let site = &facts.site;
    let building = &facts.building;

    let load = load::calculate(&load::LoadInput::from_facts(site, building))?;
    debug!(
        total_load_kn = load.total_load_kn,
        height_category = load.height_category.code(),
        foundation = load.recommended_foundation.code(),
        "load analysis complete"
    );

    let seismic = seismic::calculate(&seismic::SeismicInput::from_facts(site, building, load.total_load_kn))?;
    debug!(
        base_shear_kn = seismic.base_shear_kn,
        safety_score = seismic.safety_score,
        soft_story = seismic.soft_story_detected,
        "seismic analysis complete"
    );

    let flood = flood::calculate(&flood::FloodInput::from_site(site))?;
    debug!(
        plinth_m = flood.minimum_plinth_height_m,
        basement_feasible = flood.basement_feasible,
        "flood analysis complete"
    );

    let (wind, cyclone) = match &facts.wind {
        Some(wind_facts) => {
            let wind = wind::calculate(&wind::WindInput::from_facts(wind_facts, building))?;
            debug!(
                wind_load_kn = wind.wind_load_kn,
                optimal_orientation = wind.optimal_orientation.code(),
                "wind analysis complete"
            );
            let cyclone = cyclone::calculate(&cyclone::CycloneInput::from_facts(wind_facts, site, building))?;
            debug!(
                vortex_risk = cyclone.vortex_shedding_risk.code(),
                ratio = cyclone.height_to_width_ratio,
                "cyclone analysis complete"
            );
            (Some(wind), Some(cyclone))
        }
        None => {
            debug!("no wind facts, skipping wind and cyclone analysis");
            (None, None)
        }
    };

    let composite = DisasterComposite::assemble(load, seismic, flood, wind, cyclone);
    info!(total_load_kn = composite.total_load_kn, "disaster composite assembled");
    Ok(composite)
}

/// Run the orientation compliance analyzer against the settings' plot shape.
pub fn analyze_orientation(facts: &SubjectFacts, settings: &AnalysisSettings) -> AnalysisResult<OrientationComposite> {
    facts.validate()?;

    let input = compliance::ComplianceInput::from_facts(
        &facts.building,
        facts.wind.as_ref(),
        &settings.default_plot_shape,
    );
    let result = compliance::calculate(&input)?;
    info!(
        score = result.compliance_score,
        violations = result.violations.len(),
        "orientation composite assembled"
    );

    Ok(OrientationComposite {
        plot_shape: input.plot_shape,
        entrance_direction: input.entrance_direction,
        compliance: result,
    })
}

/// Compose the final report from both composites.
pub fn build_final_report(
    facts: &SubjectFacts,
    disaster: Option<&DisasterComposite>,
    orientation: Option<&OrientationComposite>,
    settings: &AnalysisSettings,
) -> AnalysisResult<FinalReport> {
    let report = compose_final_report(facts, disaster, orientation, settings)?;
    info!(
        overall_safety = report.overall_safety_score,
        cost_efficiency = report.cost_efficiency_score,
        sustainability = report.sustainability_score,
        "final report composed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::cyclone::VortexRisk;
    use crate::facts::{fixtures, FloodRisk, Orientation, SeismicZone, SoilType};
    use proptest::prelude::*;

    #[test]
    fn test_hazard_pipeline_with_wind() {
        let facts = fixtures::subject();
        let composite = analyze_hazards(&facts).unwrap();

        // (5.5 + 3.0 + 1.5) * 400 * 4 + 2.0 * 400 * 4
        assert_eq!(composite.load.total_load_kn, 19_200.0);
        // (0.16 * 1.5 * 2.5 * 19200) / (2 * 5) = 1152
        assert_eq!(composite.seismic_load_kn, 1152.0);
        assert!(composite.wind.is_some());
        let wind_load = composite.wind.as_ref().map(|w| w.wind_load_kn).unwrap();
        assert_eq!(composite.wind_load_kn, wind_load);
        assert_eq!(composite.total_load_kn, 19_200.0 + wind_load + 1152.0);
        // 12 / 20 ratio, well below any vortex threshold
        assert_eq!(composite.vortex_shedding_risk(), VortexRisk::Low);
    }

    #[test]
    fn test_hazard_pipeline_without_wind() {
        let mut facts = fixtures::subject();
        facts.wind = None;
        let composite = analyze_hazards(&facts).unwrap();
        assert_eq!(composite.wind_load_kn, 0.0);
        assert!(composite.cyclone.is_none());
        assert_eq!(composite.shape_optimization(), "STANDARD");
    }

    #[test]
    fn test_invalid_facts_rejected_before_analysis() {
        let mut facts = fixtures::subject();
        facts.building.built_up_area_m2 = 0.0;
        let err = analyze_hazards(&facts).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(analyze_orientation(&facts, &AnalysisSettings::default()).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_orientation_uses_settings_plot_shape() {
        let facts = fixtures::subject();
        let mut settings = AnalysisSettings::default();
        let composite = analyze_orientation(&facts, &settings).unwrap();
        assert_eq!(composite.plot_shape, "RECTANGULAR");
        assert_eq!(composite.entrance_direction, Orientation::North);
        // North entrance earns the bonus, RECTANGULAR does not match "rectangle"
        assert_eq!(composite.compliance.compliance_score, 100.0);

        settings.default_plot_shape = "Irregular".to_string();
        let composite = analyze_orientation(&facts, &settings).unwrap();
        assert_eq!(composite.compliance.violations.len(), 1);
        assert_eq!(composite.compliance.compliance_score, 100.0);
    }

    #[test]
    fn test_final_report_requires_both_composites() {
        let facts = fixtures::subject();
        let settings = AnalysisSettings::default();
        let disaster = analyze_hazards(&facts).unwrap();
        let orientation = analyze_orientation(&facts, &settings).unwrap();

        let err = build_final_report(&facts, Some(&disaster), None, &settings).unwrap_err();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("orientation analysis"));

        let err = build_final_report(&facts, None, Some(&orientation), &settings).unwrap_err();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("disaster analysis"));

        let err = build_final_report(&facts, None, None, &settings).unwrap_err();
        assert!(err.to_string().contains("disaster analysis"));
    }

    #[test]
    fn test_final_report_contents() {
        let facts = fixtures::subject();
        let settings = AnalysisSettings::default();
        let disaster = analyze_hazards(&facts).unwrap();
        let orientation = analyze_orientation(&facts, &settings).unwrap();
        let report = build_final_report(&facts, Some(&disaster), Some(&orientation), &settings).unwrap();

        // seismic: 100 - 10 (zone III) = 90 -> 0.4*90 + 0.3*70 + 0.3*90 = 84
        assert_eq!(report.overall_safety_score, 84.0);
        // RCC, foundation at 19.2 MN low-rise is shallow: 70 + 15 + 10
        assert_eq!(report.cost_efficiency_score, 95.0);
        // north + sandy soil
        assert_eq!(report.sustainability_score, 85.0);
        assert_eq!(report.orientation_score, 100.0);

        let recs = &report.recommendations;
        assert_eq!(recs.structural[0], "Use SHALLOW foundation at 1.5m depth");
        assert_eq!(recs.structural[1], "Column spacing: 6m");
        assert_eq!(recs.structural[2], disaster.load.beam_sizing);
        assert_eq!(recs.structural.len(), 3);
        assert_eq!(recs.disaster[0], "Design for base shear: 1152 kN");
        assert_eq!(recs.disaster[1], "Minimum plinth height: 0.9m");
        assert_eq!(recs.disaster[2], "Drainage slope: 2%");
        assert_eq!(recs.orientation, vec!["Keep Brahmasthan (center) open and clutter-free"]);
        assert_eq!(recs.general, settings.general_checklist);
        assert_eq!(report.structural_summary.loads.total_load_kn, disaster.total_load_kn);
    }

    #[test]
    fn test_soft_story_reaches_report() {
        let mut facts = fixtures::subject();
        facts.building.floor_heights_m = Some(vec![4.5, 2.5, 2.5, 2.5]);
        let settings = AnalysisSettings::default();
        let disaster = analyze_hazards(&facts).unwrap();
        assert!(disaster.seismic.soft_story_detected);

        let orientation = analyze_orientation(&facts, &settings).unwrap();
        let report = build_final_report(&facts, Some(&disaster), Some(&orientation), &settings).unwrap();
        assert_eq!(report.recommendations.disaster.last().unwrap(), "CRITICAL: Address soft story issue");
    }

    #[test]
    fn test_low_hazard_site() {
        let mut facts = fixtures::subject();
        facts.site.flood_risk = FloodRisk::Low;
        facts.site.seismic_zone = SeismicZone::ZoneII;
        facts.site.soil_type = SoilType::Rocky;
        let settings = AnalysisSettings::default();
        let disaster = analyze_hazards(&facts).unwrap();
        let orientation = analyze_orientation(&facts, &settings).unwrap();
        let report = build_final_report(&facts, Some(&disaster), Some(&orientation), &settings).unwrap();
        assert_eq!(report.sustainability_score, 100.0);
    }

    proptest! {
        #[test]
        fn hazard_pipeline_is_deterministic(
            area in 50.0f64..5000.0,
            floors in 1u32..60,
            zone in prop::sample::select(SeismicZone::ALL.to_vec()),
            flood in prop::sample::select(FloodRisk::ALL.to_vec()),
        ) {
            let mut facts = fixtures::subject();
            facts.building.built_up_area_m2 = area;
            facts.building.total_floors = floors;
            facts.building.total_height_m = floors as f64 * 3.0;
            facts.site.seismic_zone = zone;
            facts.site.flood_risk = flood;

            let first = analyze_hazards(&facts).unwrap();
            let second = analyze_hazards(&facts).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
