//! Composite scores for the final report.
//!
//! ```text
//! overall safety = 0.4 × seismic safety + 0.3 × flood tier + 0.3 × wind tier
//! cost           = 70 + system + foundation + height        (max 100)
//! sustainability = 60 + orientation + soil + low hazard     (max 100)
//! ```

use crate::analysis::cyclone::VortexRisk;
use crate::analysis::load::{FoundationType, HeightCategory};
use crate::facts::{FloodRisk, Orientation, SeismicZone, SoilType, StructuralSystem};
use crate::units::round_to;

const SEISMIC_WEIGHT: f64 = 0.4;
const FLOOD_WEIGHT: f64 = 0.3;
const WIND_WEIGHT: f64 = 0.3;

pub fn flood_tier_score(risk: FloodRisk) -> f64 {
    match risk {
        FloodRisk::Low => 90.0,
        FloodRisk::Medium => 70.0,
        FloodRisk::High => 50.0,
        FloodRisk::VeryHigh => 30.0,
    }
}

pub fn wind_tier_score(risk: VortexRisk) -> f64 {
    match risk {
        VortexRisk::Low => 90.0,
        VortexRisk::Medium => 70.0,
        VortexRisk::High => 50.0,
    }
}

/// Weighted safety score, rounded to 2 decimals.
pub fn overall_safety_score(seismic_safety: f64, flood_risk: FloodRisk, vortex_risk: VortexRisk) -> f64 {
    let score = SEISMIC_WEIGHT * seismic_safety
        + FLOOD_WEIGHT * flood_tier_score(flood_risk)
        + WIND_WEIGHT * wind_tier_score(vortex_risk);
    round_to(score, 2).clamp(0.0, 100.0)
}

/// Construction cost efficiency, capped at 100.
pub fn cost_efficiency_score(
    system: StructuralSystem,
    foundation: FoundationType,
    category: HeightCategory,
) -> f64 {
    let mut score: f64 = 70.0;

    score += match system {
        StructuralSystem::Steel => 10.0,
        StructuralSystem::Composite => 5.0,
        StructuralSystem::Rcc | StructuralSystem::LoadBearing => 0.0,
    };

    score += match foundation {
        FoundationType::Shallow => 15.0,
        FoundationType::Raft => 5.0,
        FoundationType::DeepPile | FoundationType::Combined => -10.0,
    };

    score += match category {
        HeightCategory::LowRise => 10.0,
        HeightCategory::MidRise => 5.0,
        HeightCategory::HighRise | HeightCategory::SuperHighRise => 0.0,
    };

    score.min(100.0)
}

/// Site and orientation sustainability, capped at 100.
pub fn sustainability_score(
    orientation: Orientation,
    soil: SoilType,
    flood_risk: FloodRisk,
    zone: SeismicZone,
) -> f64 {
    let mut score: f64 = 60.0;

    if matches!(orientation, Orientation::North | Orientation::NorthEast | Orientation::East) {
        score += 15.0;
    }
    if soil.is_firm() {
        score += 10.0;
    }
    if flood_risk == FloodRisk::Low && zone == SeismicZone::ZoneII {
        score += 15.0;
    }

    score.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overall_safety() {
        // 0.4 * 80 + 0.3 * 70 + 0.3 * 90 = 32 + 21 + 27
        assert_eq!(overall_safety_score(80.0, FloodRisk::Medium, VortexRisk::Low), 80.0);
        // 0.4 * 45 + 0.3 * 30 + 0.3 * 50 = 18 + 9 + 15
        assert_eq!(overall_safety_score(45.0, FloodRisk::VeryHigh, VortexRisk::High), 42.0);
    }

    #[test]
    fn test_cost_efficiency() {
        assert_eq!(
            cost_efficiency_score(StructuralSystem::Steel, FoundationType::Shallow, HeightCategory::LowRise),
            100.0
        );
        assert_eq!(
            cost_efficiency_score(StructuralSystem::Rcc, FoundationType::DeepPile, HeightCategory::SuperHighRise),
            60.0
        );
        assert_eq!(
            cost_efficiency_score(StructuralSystem::Composite, FoundationType::Raft, HeightCategory::MidRise),
            85.0
        );
    }

    #[test]
    fn test_sustainability() {
        assert_eq!(
            sustainability_score(Orientation::NorthEast, SoilType::Rocky, FloodRisk::Low, SeismicZone::ZoneII),
            100.0
        );
        assert_eq!(
            sustainability_score(Orientation::South, SoilType::Clay, FloodRisk::Low, SeismicZone::ZoneIII),
            60.0
        );
        assert_eq!(
            sustainability_score(Orientation::North, SoilType::Sandy, FloodRisk::Medium, SeismicZone::ZoneIII),
            85.0
        );
    }

    proptest! {
        #[test]
        fn composite_scores_stay_in_range(
            seismic_safety in 0.0f64..=100.0,
            flood in prop::sample::select(FloodRisk::ALL.to_vec()),
            vortex in prop::sample::select(vec![VortexRisk::Low, VortexRisk::Medium, VortexRisk::High]),
            system in prop::sample::select(StructuralSystem::ALL.to_vec()),
            foundation in prop::sample::select(FoundationType::ALL.to_vec()),
            category in prop::sample::select(HeightCategory::ALL.to_vec()),
            orientation in prop::sample::select(Orientation::ALL.to_vec()),
            soil in prop::sample::select(SoilType::ALL.to_vec()),
            zone in prop::sample::select(SeismicZone::ALL.to_vec()),
        ) {
            let overall = overall_safety_score(seismic_safety, flood, vortex);
            prop_assert!((0.0..=100.0).contains(&overall));

            let cost = cost_efficiency_score(system, foundation, category);
            prop_assert!((0.0..=100.0).contains(&cost));

            let sustainability = sustainability_score(orientation, soil, flood, zone);
            prop_assert!((0.0..=100.0).contains(&sustainability));
        }
    }
}
