//! # site_core - Building Site Analysis Engine
//!
//! `site_core` turns site and building facts into hazard, load and
//! orientation assessments, then folds them into a single scored report.
//! Every input and output is JSON-serializable so results can be stored in a
//! project document or handed to another tool unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless analyses**: each analysis is a pure function of its input
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use site_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-001", "Acme Developers");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-001"));
//! ```
//!
//! ## Modules
//!
//! - [`facts`] - Site, building and wind facts with classification enums
//! - [`analysis`] - Load, seismic, flood, wind, cyclone and compliance analyses
//! - [`report`] - Disaster and orientation composites, final report
//! - [`pipeline`] - Stage ordering over the analyses
//! - [`service`] - Stage operations over a subject store
//! - [`project`] - Project document, subjects and stored results
//! - [`settings`] - Tunable defaults
//! - [`file_io`] - Atomic JSON persistence
//! - [`units`] - Rounding and bearing helpers
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod errors;
pub mod facts;
pub mod file_io;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod service;
pub mod settings;
pub mod units;

pub use errors::{AnalysisError, AnalysisResult};
pub use facts::{BuildingFacts, SiteFacts, SubjectFacts, WindFacts};
pub use file_io::{load_project, save_project, write_json};
pub use project::{Project, ProjectMetadata, Subject, SubjectStore};
pub use report::{AnalysisKind, DisasterComposite, FinalReport, OrientationComposite};
pub use service::AnalysisService;
pub use settings::AnalysisSettings;
