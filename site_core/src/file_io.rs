//! # File I/O Module
//!
//! Project document and result file handling:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **Version validation**: Refuse documents from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use site_core::file_io::{load_project, save_project};
//! use std::path::Path;
//!
//! let path = Path::new("site.json");
//! let mut project = load_project(path)?;
//! project.touch();
//! save_project(&project, path)?;
//! # Ok::<(), site_core::errors::AnalysisError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{AnalysisError, AnalysisResult};
use crate::project::{Project, SCHEMA_VERSION};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to `path` via a synced temporary file and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> AnalysisResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| AnalysisError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(bytes)
        .map_err(|e| AnalysisError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| AnalysisError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        AnalysisError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a project document with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> AnalysisResult<()> {
    write_json(project, path)
}

/// Write any serializable value as pretty JSON, atomically.
///
/// Used for result files (`--output` in the CLI) as well as projects.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> AnalysisResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Read and parse a JSON file into any deserializable type.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AnalysisResult<T> {
    let mut file =
        File::open(path).map_err(|e| AnalysisError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| AnalysisError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| AnalysisError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a project document.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(AnalysisError::VersionMismatch)` - Document version is incompatible
/// * `Err(AnalysisError::SerializationError)` - Invalid JSON
/// * `Err(AnalysisError::FileError)` - I/O error
pub fn load_project(path: &Path) -> AnalysisResult<Project> {
    let project: Project = read_json(path)?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Validate that a document version is compatible with the current schema.
///
/// Major versions must match; while the schema is 0.x a newer minor version
/// is also rejected.
pub fn validate_version(file_version: &str) -> AnalysisResult<()> {
    let mismatch = || AnalysisError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fixtures;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("site_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/site.json")),
            Path::new("/path/to/site.json.tmp")
        );
    }

    #[test]
    fn test_save_and_load_project() {
        let path = temp_path("roundtrip");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let id = project.add_subject("Tower A", fixtures::subject());
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.get_subject(&id).map(|s| s.label.as_str()), Some("Tower A"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_path("atomic");
        write_json(&serde_json::json!({"ok": true}), &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/nonexistent/site_core/project.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_project(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_path("newer");
        let mut project = Project::default();
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();
        assert_eq!(load_project(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
