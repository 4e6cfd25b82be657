//! # Analyzers
//!
//! One module per hazard or compliance domain. Each analyzer follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), built from the subject
//!   facts with `from_facts` / `from_site`
//! - `*Result` - Analysis results (JSON-serializable)
//! - `calculate(input) -> AnalysisResult<*Result>` - Pure analysis function
//!
//! Every analyzer is a deterministic function of its input. The only data
//! dependency between them is seismic on load: the seismic weight is the
//! load stage's total gravity load.
//!
//! ## Available Analyzers
//!
//! - [`load`] - Dead/live loads, foundation, framing and shear-wall need
//! - [`seismic`] - Base shear, safety score, soft story, shear-wall placement
//! - [`flood`] - Plinth height, drainage, basement, materials
//! - [`wind`] - Wind pressure/load, orientation, form, ventilation
//! - [`cyclone`] - Vortex shedding, pressure zones, shape guidance
//! - [`compliance`] - Vastu orientation compliance

pub mod compliance;
pub mod cyclone;
pub mod flood;
pub mod load;
pub mod seismic;
pub mod wind;

pub use compliance::{ComplianceInput, ComplianceResult};
pub use cyclone::{CycloneInput, CycloneResult};
pub use flood::{FloodInput, FloodResult};
pub use load::{LoadInput, LoadResult};
pub use seismic::{SeismicInput, SeismicResult};
pub use wind::{WindInput, WindResult};
