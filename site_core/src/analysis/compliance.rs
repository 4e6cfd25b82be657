//! # Orientation Compliance (Vastu)
//!
//! Scores a building's directional placement against the traditional Vastu
//! rule set: entrance direction, plot shape and height balance produce an
//! ordered list of violations, each violation gets a remedy, and the score
//! is adjusted for an auspicious entrance and a regular plot.
//!
//! ## Direction classes
//!
//! | Class        | Directions  |
//! |--------------|-------------|
//! | Auspicious   | N, NE, E    |
//! | Moderate     | W, NW       |
//! | Inauspicious | S, SE, SW   |
//!
//! ## Score
//!
//! ```text
//! score = 100 - Σ penalty(severity)     HIGH 20, MEDIUM 10, LOW 5
//!             + 10 if entrance auspicious
//!             + 5  if plot shape mentions "square" or "rectangle"
//! ```
//!
//! clamped to 0-100.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::{BuildingFacts, Orientation, WindFacts};
use crate::units::Degrees;

/// Height above which a tall mass in the north-east is a violation (m)
pub const HEIGHT_BALANCE_LIMIT_M: f64 = 30.0;

/// Wind bearings that count as aligned with the auspicious quarter
const AUSPICIOUS_WIND_BEARINGS: [f64; 3] = [0.0, 45.0, 90.0];

/// Reference placements the zone flags are evaluated against
pub const KITCHEN_PLACEMENT: Orientation = Orientation::SouthEast;
pub const BEDROOM_PLACEMENT: Orientation = Orientation::SouthWest;
pub const STAIRCASE_PLACEMENT: Orientation = Orientation::SouthWest;

/// Fixed Vastu class of a compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectionClass {
    Auspicious,
    Moderate,
    Inauspicious,
}

impl DirectionClass {
    pub fn of(direction: Orientation) -> Self {
        match direction {
            Orientation::North | Orientation::NorthEast | Orientation::East => DirectionClass::Auspicious,
            Orientation::West | Orientation::NorthWest => DirectionClass::Moderate,
            Orientation::South | Orientation::SouthEast | Orientation::SouthWest => DirectionClass::Inauspicious,
        }
    }
}

fn is_auspicious(direction: Orientation) -> bool {
    DirectionClass::of(direction) == DirectionClass::Auspicious
}

/// Entrance suitability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntranceSuitability {
    Excellent,
    Moderate,
    Poor,
}

impl EntranceSuitability {
    pub fn of(entrance: Orientation) -> Self {
        match DirectionClass::of(entrance) {
            DirectionClass::Auspicious => EntranceSuitability::Excellent,
            DirectionClass::Moderate => EntranceSuitability::Moderate,
            DirectionClass::Inauspicious => EntranceSuitability::Poor,
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            EntranceSuitability::Excellent => "EXCELLENT - Highly auspicious as per Vastu",
            EntranceSuitability::Moderate => "MODERATE - Acceptable with remedies",
            EntranceSuitability::Poor => "POOR - Not recommended, consider corrections",
        }
    }
}

/// Overall compliance tier derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceTier {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl ComplianceTier {
    /// Thresholds 80 / 60 / 40, each inclusive
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ComplianceTier::Excellent
        } else if score >= 60.0 {
            ComplianceTier::Good
        } else if score >= 40.0 {
            ComplianceTier::Moderate
        } else {
            ComplianceTier::Poor
        }
    }
}

/// Violation severity, also used as correction priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Score deduction per violation
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::High => 20.0,
            Severity::Medium => 10.0,
            Severity::Low => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCategory {
    Entrance,
    PlotShape,
    HeightImbalance,
}

impl ViolationCategory {
    pub fn remedy(&self) -> &'static str {
        match self {
            ViolationCategory::Entrance => {
                "Install Vastu pyramid or use auspicious symbols at entrance. \
                 Consider secondary entrance in North or East."
            }
            ViolationCategory::PlotShape => {
                "Use Vastu-compliant landscaping to balance energy. Plant trees in South-West to strengthen."
            }
            ViolationCategory::HeightImbalance => {
                "Keep North-East area open and light. Avoid heavy structures in North-East."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub category: ViolationCategory,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Description of the violation this addresses
    pub violation: String,
    pub solution: String,
    pub priority: Severity,
}

/// How well the prevailing wind and the building orientation line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindCompatibility {
    Excellent,
    Good,
    Moderate,
    Unknown,
}

impl WindCompatibility {
    pub fn note(&self) -> &'static str {
        match self {
            WindCompatibility::Excellent => "EXCELLENT - Wind and Vastu alignment optimal",
            WindCompatibility::Good => "GOOD - Partial alignment achieved",
            WindCompatibility::Moderate => "MODERATE - Consider Vastu remedies",
            WindCompatibility::Unknown => "UNKNOWN - Wind data not provided",
        }
    }
}

/// Room placement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCompliance {
    pub kitchen: bool,
    pub bedroom: bool,
    pub staircase: bool,
}

/// Input parameters for orientation compliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInput {
    pub plot_shape: String,
    pub orientation: Orientation,
    pub entrance_direction: Orientation,
    pub total_floors: u32,
    pub building_height_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction_deg: Option<f64>,
}

impl ComplianceInput {
    /// The entrance is taken to face the same way as the building.
    pub fn from_facts(building: &BuildingFacts, wind: Option<&WindFacts>, plot_shape: &str) -> Self {
        ComplianceInput {
            plot_shape: plot_shape.to_string(),
            orientation: building.orientation,
            entrance_direction: building.orientation,
            total_floors: building.total_floors,
            building_height_m: building.total_height_m,
            wind_direction_deg: wind.map(|w| w.direction_deg),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.plot_shape.trim().is_empty() {
            return Err(AnalysisError::missing_field("plot_shape"));
        }
        if self.total_floors == 0 {
            return Err(AnalysisError::invalid_input("total_floors", "0", "Floor count must be at least 1"));
        }
        if !(self.building_height_m > 0.0) {
            return Err(AnalysisError::invalid_input(
                "building_height_m",
                self.building_height_m.to_string(),
                "Height must be positive",
            ));
        }
        if let Some(direction) = self.wind_direction_deg {
            if !(0.0..=360.0).contains(&direction) {
                return Err(AnalysisError::invalid_input(
                    "wind_direction_deg",
                    direction.to_string(),
                    "Wind direction must be between 0 and 360",
                ));
            }
        }
        Ok(())
    }
}

/// Results from orientation compliance analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub compliance_score: f64,
    pub overall_compliance: ComplianceTier,
    pub entrance_suitability: EntranceSuitability,
    pub entrance_note: String,
    pub zone_compliance: ZoneCompliance,
    pub water_tank_direction: String,
    pub borewell_direction: String,
    pub wind_compatibility: WindCompatibility,
    pub violations: Vec<Violation>,
    /// One per violation in the same order, then the general correction
    pub corrections: Vec<Correction>,
}

/// Kitchen belongs in the south-east (Agni) or north-west corner
pub fn kitchen_zone_compliant(placement: Orientation) -> bool {
    matches!(placement, Orientation::SouthEast | Orientation::NorthWest)
}

pub fn bedroom_zone_compliant(placement: Orientation) -> bool {
    matches!(
        placement,
        Orientation::SouthWest | Orientation::South | Orientation::West | Orientation::NorthWest
    )
}

/// Staircase anywhere in the southern or western half, never the north-east
pub fn staircase_compliant(placement: Orientation) -> bool {
    matches!(
        placement,
        Orientation::South | Orientation::West | Orientation::SouthWest | Orientation::SouthEast
    )
}

pub fn water_tank_direction() -> &'static str {
    "NORTH_EAST (most auspicious) or NORTH or EAST"
}

pub fn borewell_direction() -> &'static str {
    "NORTH_EAST (highly recommended) or NORTH"
}

fn plot_shape_mentions(plot_shape: &str, words: &[&str]) -> bool {
    let shape = plot_shape.to_lowercase();
    words.iter().any(|w| shape.contains(w))
}

/// Violations in fixed order: entrance, plot shape, height balance.
pub fn detect_violations(input: &ComplianceInput) -> Vec<Violation> {
    let mut violations = Vec::new();

    if DirectionClass::of(input.entrance_direction) == DirectionClass::Inauspicious {
        violations.push(Violation {
            category: ViolationCategory::Entrance,
            severity: Severity::High,
            description: format!("Entrance in {} direction", input.entrance_direction),
            impact: "May affect prosperity and positive energy".to_string(),
        });
    }

    if plot_shape_mentions(&input.plot_shape, &["irregular", "l-shape"]) {
        violations.push(Violation {
            category: ViolationCategory::PlotShape,
            severity: Severity::Medium,
            description: "Irregular or L-shaped plot".to_string(),
            impact: "May cause energy imbalance".to_string(),
        });
    }

    if input.building_height_m > HEIGHT_BALANCE_LIMIT_M
        && matches!(input.orientation, Orientation::NorthEast | Orientation::East)
    {
        violations.push(Violation {
            category: ViolationCategory::HeightImbalance,
            severity: Severity::Medium,
            description: "High-rise in North-East direction".to_string(),
            impact: "May block positive energy flow".to_string(),
        });
    }

    violations
}

/// One correction per violation, then the general Brahmasthan correction.
pub fn corrections(violations: &[Violation]) -> Vec<Correction> {
    let mut corrections: Vec<Correction> = violations
        .iter()
        .map(|v| Correction {
            violation: v.description.clone(),
            solution: v.category.remedy().to_string(),
            priority: v.severity,
        })
        .collect();

    corrections.push(Correction {
        violation: "General Vastu enhancement".to_string(),
        solution: "Keep Brahmasthan (center) open and clutter-free".to_string(),
        priority: Severity::Medium,
    });
    corrections
}

/// Compliance score, clamped to 0-100.
///
/// # Example
/// ```
/// use site_core::analysis::compliance::compliance_score;
/// use site_core::facts::Orientation;
///
/// assert_eq!(compliance_score(&[], Orientation::North, "RECTANGULAR"), 100.0);
/// ```
pub fn compliance_score(violations: &[Violation], entrance: Orientation, plot_shape: &str) -> f64 {
    let mut score: f64 = 100.0;
    for violation in violations {
        score -= violation.severity.penalty();
    }
    if is_auspicious(entrance) {
        score += 10.0;
    }
    if plot_shape_mentions(plot_shape, &["square", "rectangle"]) {
        score += 5.0;
    }
    score.clamp(0.0, 100.0)
}

/// Wind/orientation alignment; only a missing direction is unknown.
pub fn wind_compatibility(orientation: Orientation, wind_direction_deg: Option<f64>) -> WindCompatibility {
    let Some(direction) = wind_direction_deg else {
        return WindCompatibility::Unknown;
    };

    let aligned_wind = AUSPICIOUS_WIND_BEARINGS
        .iter()
        .any(|&bearing| Degrees(direction).separation(Degrees(bearing)) < 45.0);
    let aligned_orientation = is_auspicious(orientation);

    match (aligned_wind, aligned_orientation) {
        (true, true) => WindCompatibility::Excellent,
        (true, false) | (false, true) => WindCompatibility::Good,
        (false, false) => WindCompatibility::Moderate,
    }
}

/// Run the full orientation compliance analysis.
pub fn calculate(input: &ComplianceInput) -> AnalysisResult<ComplianceResult> {
    input.validate()?;

    let violations = detect_violations(input);
    let corrections = corrections(&violations);
    let compliance_score = compliance_score(&violations, input.entrance_direction, &input.plot_shape);
    let entrance_suitability = EntranceSuitability::of(input.entrance_direction);

    Ok(ComplianceResult {
        compliance_score,
        overall_compliance: ComplianceTier::from_score(compliance_score),
        entrance_suitability,
        entrance_note: entrance_suitability.note().to_string(),
        zone_compliance: ZoneCompliance {
            kitchen: kitchen_zone_compliant(KITCHEN_PLACEMENT),
            bedroom: bedroom_zone_compliant(BEDROOM_PLACEMENT),
            staircase: staircase_compliant(STAIRCASE_PLACEMENT),
        },
        water_tank_direction: water_tank_direction().to_string(),
        borewell_direction: borewell_direction().to_string(),
        wind_compatibility: wind_compatibility(input.orientation, input.wind_direction_deg),
        violations,
        corrections,
    })
}
