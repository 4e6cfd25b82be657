//! # Analysis Settings
//!
//! Project-wide values that feed the pipeline but are not survey or design
//! facts. Every field has a serde default, so a project document can omit
//! the whole block or any part of it.
//!
//! ```json
//! {
//!   "default_plot_shape": "RECTANGULAR",
//!   "general_checklist": [
//!     "Conduct detailed soil investigation before construction",
//!     "Engage structural engineer for detailed design",
//!     "Obtain all necessary approvals and permits",
//!     "Regular structural health monitoring recommended"
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Plot shape assumed when the survey does not record one
pub const DEFAULT_PLOT_SHAPE: &str = "RECTANGULAR";

/// Settings shared by every subject in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Plot shape handed to the orientation compliance stage.
    ///
    /// Surveys do not capture plot geometry yet, so every subject is scored
    /// against this value.
    pub default_plot_shape: String,

    /// General items appended to every final report
    pub general_checklist: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            default_plot_shape: DEFAULT_PLOT_SHAPE.to_string(),
            general_checklist: vec![
                "Conduct detailed soil investigation before construction".to_string(),
                "Engage structural engineer for detailed design".to_string(),
                "Obtain all necessary approvals and permits".to_string(),
                "Regular structural health monitoring recommended".to_string(),
            ],
        }
    }
}
