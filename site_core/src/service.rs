//! # Analysis Service
//!
//! One operation per stage, each keyed by a subject id. The service reads
//! facts from a [`SubjectStore`], runs the pipeline and hands the composite
//! back to the store.
//!
//! | Operation                  | Errors                                      |
//! |----------------------------|---------------------------------------------|
//! | `run_hazard_analysis`      | `NotFound`, `InvalidInput`                  |
//! | `run_orientation_analysis` | `NotFound`, `InvalidInput`                  |
//! | `run_final_report`         | `NotFound`, `PreconditionFailed`            |
//!
//! ## Example
//!
//! ```rust
//! use site_core::project::Project;
//! use site_core::service::AnalysisService;
//! # use site_core::facts::SubjectFacts;
//! # let facts: SubjectFacts = serde_json::from_str(r#"{
//! #     "site": {"soil_type": "CLAY", "seismic_zone": "ZONE_IV", "flood_risk": "HIGH",
//! #              "elevation_m": 3.0, "water_table_depth_m": 2.0, "slope_deg": 0.5,
//! #              "nearby_water_body": false},
//! #     "building": {"building_use": "SCHOOL", "total_floors": 6, "floor_height_m": 3.5,
//! #                  "total_height_m": 21.0, "built_up_area_m2": 900.0,
//! #                  "orientation": "SOUTH", "structural_system": "RCC"}
//! # }"#).unwrap();
//!
//! let mut project = Project::new("Engineer", "25-001", "Client");
//! let id = project.add_subject("School block", facts);
//! let settings = project.settings.clone();
//!
//! let mut service = AnalysisService::new(&mut project, settings);
//! assert!(service.run_final_report(&id).unwrap_err().is_precondition());
//!
//! service.run_hazard_analysis(&id).unwrap();
//! service.run_orientation_analysis(&id).unwrap();
//! let report = service.run_final_report(&id).unwrap();
//! assert_eq!(report.orientation_score, 80.0);
//! ```

use tracing::info;
use uuid::Uuid;

use crate::errors::AnalysisResult;
use crate::pipeline;
use crate::project::SubjectStore;
use crate::report::{DisasterComposite, FinalReport, OrientationComposite};
use crate::settings::AnalysisSettings;

/// Stage runner over a subject store.
pub struct AnalysisService<'s, S: SubjectStore + ?Sized> {
    store: &'s mut S,
    settings: AnalysisSettings,
}

impl<'s, S: SubjectStore + ?Sized> AnalysisService<'s, S> {
    pub fn new(store: &'s mut S, settings: AnalysisSettings) -> Self {
        AnalysisService { store, settings }
    }

    /// Run load, seismic, flood, wind and cyclone analysis and store the
    /// disaster composite.
    pub fn run_hazard_analysis(&mut self, id: &Uuid) -> AnalysisResult<DisasterComposite> {
        let facts = self.store.subject_facts(id)?;
        let composite = pipeline::analyze_hazards(&facts)?;
        self.store.store_disaster(id, composite.clone())?;
        info!(subject = %id, "stored disaster composite");
        Ok(composite)
    }

    /// Run orientation compliance and store the orientation composite.
    pub fn run_orientation_analysis(&mut self, id: &Uuid) -> AnalysisResult<OrientationComposite> {
        let facts = self.store.subject_facts(id)?;
        let composite = pipeline::analyze_orientation(&facts, &self.settings)?;
        self.store.store_orientation(id, composite.clone())?;
        info!(subject = %id, "stored orientation composite");
        Ok(composite)
    }

    /// Compose and store the final report.
    ///
    /// Both composites must already be stored; the missing one is named in
    /// the `PreconditionFailed` error.
    pub fn run_final_report(&mut self, id: &Uuid) -> AnalysisResult<FinalReport> {
        let facts = self.store.subject_facts(id)?;
        let disaster = self.store.disaster(id)?;
        let orientation = self.store.orientation(id)?;

        let report = pipeline::build_final_report(&facts, disaster.as_ref(), orientation.as_ref(), &self.settings)?;
        self.store.store_final_report(id, report.clone())?;
        info!(subject = %id, "stored final report");
        Ok(report)
    }
}
