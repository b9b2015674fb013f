//! Case discovery and validation for a project directory.
//!
//! A project is a directory whose subdirectories are cases. A case directory should hold one
//! parameter file; its directory name is the case identifier.

use std::path::{Path, PathBuf};

use bfb_params::ParameterSet;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// One case directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDir {
    pub id: String,
    pub dir: PathBuf,
}

impl CaseDir {
    /// Case for a directory, named after its last path component.
    pub fn from_dir(dir: &Path) -> AppResult<Self> {
        let id = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::InvalidInput(format!("{} has no name", dir.display())))?;
        Ok(Self {
            id,
            dir: dir.to_path_buf(),
        })
    }
}

/// Find every case in `project_dir`, sorted by identifier.
///
/// Every subdirectory except hidden ones is a case. A case without a parameter file fails
/// when it is loaded.
pub fn discover_cases(project_dir: &Path) -> AppResult<Vec<CaseDir>> {
    let read_err = |source| AppError::ProjectRead {
        path: project_dir.to_path_buf(),
        source,
    };

    let mut cases = Vec::new();
    for entry in std::fs::read_dir(project_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            debug!(dir = %path.display(), "skipping hidden directory");
            continue;
        }
        cases.push(CaseDir { id: name, dir: path });
    }

    cases.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(cases)
}

/// Load and validate one case's parameters.
pub fn load_case(case: &CaseDir) -> AppResult<ParameterSet> {
    Ok(bfb_params::load_case_dir(&case.dir)?)
}

/// Validation outcome for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseValidation {
    pub case_id: String,
    pub error: Option<String>,
}

impl CaseValidation {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Load every case's parameters without solving.
pub fn validate_project(project_dir: &Path) -> AppResult<Vec<CaseValidation>> {
    Ok(discover_cases(project_dir)?
        .iter()
        .map(|case| CaseValidation {
            case_id: case.id.clone(),
            error: bfb_params::load_case_dir(&case.dir)
                .err()
                .map(|e| e.to_string()),
        })
        .collect())
}
