//! # Report Aggregation
//!
//! Two independent composite stages feed one terminal stage:
//!
//! ```text
//! facts ──┬─> DisasterComposite ────┐
//!         └─> OrientationComposite ─┴─> FinalReport
//! ```
//!
//! Composites are plain values. The final report is a pure function of the
//! subject facts and both composites, and refuses to run while either
//! composite is missing.

pub mod composite;
pub mod final_report;
pub mod scores;

use serde::{Deserialize, Serialize};

pub use composite::{DisasterComposite, OrientationComposite};
pub use final_report::{compose_final_report, FinalReport, RecommendationBundle};

/// The three stored analysis kinds for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisKind {
    Disaster,
    Orientation,
    Final,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [AnalysisKind::Disaster, AnalysisKind::Orientation, AnalysisKind::Final];

    /// Human-readable name used in error messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::Disaster => "disaster analysis",
            AnalysisKind::Orientation => "orientation analysis",
            AnalysisKind::Final => "final report",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
