//! Stored result metadata.

use serde::{Deserialize, Serialize};

/// Written next to each case's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseManifest {
    pub case_id: String,
    /// SHA-256 of the parameter set that produced the results.
    pub params_hash: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    pub solver_version: String,
    /// Files written for this case, relative to the case directory.
    pub files: Vec<String>,
}
