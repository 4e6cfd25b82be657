//! Stored composites: the disaster composite built from the hazard analyzers
//! and the orientation composite built from the compliance analyzer.

use serde::{Deserialize, Serialize};

use crate::analysis::compliance::ComplianceResult;
use crate::analysis::cyclone::{CycloneResult, VortexRisk};
use crate::analysis::{FloodResult, LoadResult, SeismicResult, WindResult};
use crate::facts::Orientation;

/// Shape guidance recorded when no cyclone analysis ran
pub const DEFAULT_SHAPE_OPTIMIZATION: &str = "STANDARD";

/// Combined output of the hazard pipeline for one subject.
///
/// `wind` and `cyclone` are absent when the subject has no wind facts; the
/// accessors below then read as zero wind load, LOW vortex risk, ratio 0
/// and a STANDARD shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterComposite {
    pub load: LoadResult,
    pub seismic: SeismicResult,
    pub flood: FloodResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyclone: Option<CycloneResult>,

    /// Wind load, 0 without wind facts
    pub wind_load_kn: f64,
    /// Seismic base shear
    pub seismic_load_kn: f64,
    /// Gravity + wind + seismic
    pub total_load_kn: f64,
}

impl DisasterComposite {
    pub fn assemble(
        load: LoadResult,
        seismic: SeismicResult,
        flood: FloodResult,
        wind: Option<WindResult>,
        cyclone: Option<CycloneResult>,
    ) -> Self {
        let wind_load_kn = wind.as_ref().map_or(0.0, |w| w.wind_load_kn);
        let seismic_load_kn = seismic.base_shear_kn;
        let total_load_kn = load.total_load_kn + wind_load_kn + seismic_load_kn;

        DisasterComposite {
            load,
            seismic,
            flood,
            wind,
            cyclone,
            wind_load_kn,
            seismic_load_kn,
            total_load_kn,
        }
    }

    pub fn vortex_shedding_risk(&self) -> VortexRisk {
        self.cyclone
            .as_ref()
            .map_or(VortexRisk::default(), |c| c.vortex_shedding_risk)
    }

    pub fn height_to_width_ratio(&self) -> f64 {
        self.cyclone.as_ref().map_or(0.0, |c| c.height_to_width_ratio)
    }

    pub fn shape_optimization(&self) -> &str {
        self.cyclone
            .as_ref()
            .map_or(DEFAULT_SHAPE_OPTIMIZATION, |c| c.shape_optimization.as_str())
    }
}

/// Orientation compliance output with the inputs it was scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationComposite {
    pub plot_shape: String,
    pub entrance_direction: Orientation,
    pub compliance: ComplianceResult,
}
