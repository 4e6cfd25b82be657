//! # Project Data Structures
//!
//! The `Project` struct is the root container for building subjects and
//! their analysis composites. Projects serialize to human-readable JSON
//! documents and act as the in-memory input provider / output consumer for
//! the analysis service.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (plot shape default, general checklist)
//! └── subjects: HashMap<Uuid, Subject>
//!     └── Subject
//!         ├── facts: SubjectFacts (site, building, optional wind)
//!         ├── disaster: Option<Stored<DisasterComposite>>
//!         ├── orientation: Option<Stored<OrientationComposite>>
//!         └── final_report: Option<Stored<FinalReport>>
//! ```
//!
//! Each subject holds at most one composite per analysis kind. Storing a
//! new composite replaces the previous one.
//!
//! ## Example
//!
//! ```rust
//! use site_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AnalysisError, AnalysisResult};
use crate::facts::SubjectFacts;
use crate::report::{AnalysisKind, DisasterComposite, FinalReport, OrientationComposite};
use crate::settings::AnalysisSettings;

/// Current schema version for project documents
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A composite together with when it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub analyzed_at: DateTime<Utc>,
    pub result: T,
}

impl<T> Stored<T> {
    pub fn now(result: T) -> Self {
        Stored {
            analyzed_at: Utc::now(),
            result,
        }
    }
}

/// One building subject: its facts and its latest composites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,

    /// User-facing name (e.g., "Tower A")
    pub label: String,

    pub facts: SubjectFacts,

    pub created: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disaster: Option<Stored<DisasterComposite>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Stored<OrientationComposite>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_report: Option<Stored<FinalReport>>,
}

impl Subject {
    pub fn new(label: impl Into<String>, facts: SubjectFacts) -> Self {
        Subject {
            id: Uuid::new_v4(),
            label: label.into(),
            facts,
            created: Utc::now(),
            disaster: None,
            orientation: None,
            final_report: None,
        }
    }

    /// Whether a composite of the given kind is stored
    pub fn has(&self, kind: AnalysisKind) -> bool {
        match kind {
            AnalysisKind::Disaster => self.disaster.is_some(),
            AnalysisKind::Orientation => self.orientation.is_some(),
            AnalysisKind::Final => self.final_report.is_some(),
        }
    }
}

/// Where subject facts come from and where composites go.
///
/// The analysis service only talks to storage through this trait. Every
/// `store_*` call replaces any earlier composite of the same kind.
pub trait SubjectStore {
    /// Facts for a subject, or `NotFound`
    fn subject_facts(&self, id: &Uuid) -> AnalysisResult<SubjectFacts>;

    fn disaster(&self, id: &Uuid) -> AnalysisResult<Option<DisasterComposite>>;

    fn orientation(&self, id: &Uuid) -> AnalysisResult<Option<OrientationComposite>>;

    fn store_disaster(&mut self, id: &Uuid, composite: DisasterComposite) -> AnalysisResult<()>;

    fn store_orientation(&mut self, id: &Uuid, composite: OrientationComposite) -> AnalysisResult<()>;

    fn store_final_report(&mut self, id: &Uuid, report: FinalReport) -> AnalysisResult<()>;
}

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: AnalysisSettings,

    /// All subjects, keyed by UUID
    #[serde(default)]
    pub subjects: HashMap<Uuid, Subject>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use site_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert_eq!(project.subject_count(), 0);
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            subjects: HashMap::new(),
        }
    }

    /// Add a subject and return its UUID.
    pub fn add_subject(&mut self, label: impl Into<String>, facts: SubjectFacts) -> Uuid {
        let subject = Subject::new(label, facts);
        let id = subject.id;
        self.subjects.insert(id, subject);
        self.touch();
        id
    }

    /// Remove a subject by UUID.
    pub fn remove_subject(&mut self, id: &Uuid) -> Option<Subject> {
        let subject = self.subjects.remove(id);
        if subject.is_some() {
            self.touch();
        }
        subject
    }

    pub fn get_subject(&self, id: &Uuid) -> Option<&Subject> {
        self.subjects.get(id)
    }

    /// Look a subject up by UUID string or by label.
    ///
    /// Label matches are exact; if several subjects share a label the
    /// result is whichever the map yields first.
    pub fn find_subject(&self, key: &str) -> Option<&Subject> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(subject) = self.subjects.get(&id) {
                return Some(subject);
            }
        }
        self.subjects.values().find(|s| s.label == key)
    }

    /// The only subject, when the project has exactly one
    pub fn sole_subject(&self) -> Option<&Subject> {
        if self.subjects.len() == 1 {
            self.subjects.values().next()
        } else {
            None
        }
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn subject_mut(&mut self, id: &Uuid) -> AnalysisResult<&mut Subject> {
        self.subjects
            .get_mut(id)
            .ok_or_else(|| AnalysisError::not_found(id.to_string()))
    }

    fn subject(&self, id: &Uuid) -> AnalysisResult<&Subject> {
        self.subjects
            .get(id)
            .ok_or_else(|| AnalysisError::not_found(id.to_string()))
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

impl SubjectStore for Project {
    fn subject_facts(&self, id: &Uuid) -> AnalysisResult<SubjectFacts> {
        Ok(self.subject(id)?.facts.clone())
    }

    fn disaster(&self, id: &Uuid) -> AnalysisResult<Option<DisasterComposite>> {
        Ok(self.subject(id)?.disaster.as_ref().map(|s| s.result.clone()))
    }

    fn orientation(&self, id: &Uuid) -> AnalysisResult<Option<OrientationComposite>> {
        Ok(self.subject(id)?.orientation.as_ref().map(|s| s.result.clone()))
    }

    fn store_disaster(&mut self, id: &Uuid, composite: DisasterComposite) -> AnalysisResult<()> {
        self.subject_mut(id)?.disaster = Some(Stored::now(composite));
        self.touch();
        Ok(())
    }

    fn store_orientation(&mut self, id: &Uuid, composite: OrientationComposite) -> AnalysisResult<()> {
        self.subject_mut(id)?.orientation = Some(Stored::now(composite));
        self.touch();
        Ok(())
    }

    fn store_final_report(&mut self, id: &Uuid, report: FinalReport) -> AnalysisResult<()> {
        self.subject_mut(id)?.final_report = Some(Stored::now(report));
        self.touch();
        Ok(())
    }
}

/// Project metadata stored in the document header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}
