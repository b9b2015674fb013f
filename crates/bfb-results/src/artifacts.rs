//! Artifact manifest.
//!
//! Every file the tool writes under a project directory is listed in
//! `<project>/.bfb-artifacts.json`. Cleanup removes exactly those files, then any listed
//! directory left empty, then the manifest itself. Nothing else is ever deleted.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

pub const ARTIFACT_MANIFEST_FILE: &str = ".bfb-artifacts.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Generated files, relative to the project directory.
    #[serde(default)]
    pub files: BTreeSet<String>,
    /// Generated directories, removed only when empty.
    #[serde(default)]
    pub dirs: BTreeSet<String>,
}

/// What a cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanSummary {
    pub removed: Vec<PathBuf>,
    /// Listed files that were already gone.
    pub missing: Vec<PathBuf>,
    pub dirs_removed: Vec<PathBuf>,
}

impl ArtifactManifest {
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(ARTIFACT_MANIFEST_FILE)
    }

    /// Load the manifest, or an empty one if the project has none yet.
    pub fn load(project_dir: &Path) -> ResultsResult<Self> {
        let path = Self::path(project_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, project_dir: &Path) -> ResultsResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(project_dir), content)?;
        Ok(())
    }

    /// Record a generated file. `path` may be absolute or relative to `project_dir`.
    pub fn record_file(&mut self, project_dir: &Path, path: &Path) -> ResultsResult<()> {
        let rel = relative_entry(project_dir, path)?;
        self.files.insert(rel);
        Ok(())
    }

    /// Record a generated directory.
    pub fn record_dir(&mut self, project_dir: &Path, path: &Path) -> ResultsResult<()> {
        let rel = relative_entry(project_dir, path)?;
        self.dirs.insert(rel);
        Ok(())
    }
}

/// Remove every artifact listed in the project's manifest.
pub fn clean(project_dir: &Path) -> ResultsResult<CleanSummary> {
    let manifest = ArtifactManifest::load(project_dir)?;
    let mut summary = CleanSummary::default();

    for entry in &manifest.files {
        let path = resolve_entry(project_dir, entry)?;
        if path.is_file() {
            fs::remove_file(&path)?;
            summary.removed.push(path);
        } else {
            summary.missing.push(path);
        }
    }

    // Deepest first so nested generated directories empty out before their parents.
    let mut dirs: Vec<&String> = manifest.dirs.iter().collect();
    dirs.sort_by_key(|d| std::cmp::Reverse(d.matches('/').count()));
    for entry in dirs {
        let path = resolve_entry(project_dir, entry)?;
        if path.is_dir() && fs::read_dir(&path)?.next().is_none() {
            fs::remove_dir(&path)?;
            summary.dirs_removed.push(path);
        }
    }

    let manifest_path = ArtifactManifest::path(project_dir);
    if manifest_path.exists() {
        fs::remove_file(manifest_path)?;
    }
    Ok(summary)
}

fn relative_entry(project_dir: &Path, path: &Path) -> ResultsResult<String> {
    // Paths built from `project_dir` carry it as a prefix, relative or not.
    let rel = match path.strip_prefix(project_dir) {
        Ok(rel) => rel,
        Err(_) if path.is_absolute() => {
            return Err(ResultsError::InvalidPath {
                message: format!(
                    "{} is outside project {}",
                    path.display(),
                    project_dir.display()
                ),
            });
        }
        Err(_) => path,
    };
    normalize(rel).ok_or_else(|| ResultsError::InvalidPath {
        message: format!("{} is not a plain relative path", rel.display()),
    })
}

fn resolve_entry(project_dir: &Path, entry: &str) -> ResultsResult<PathBuf> {
    let rel = normalize(Path::new(entry)).ok_or_else(|| ResultsError::InvalidPath {
        message: format!("manifest entry `{entry}` escapes the project directory"),
    })?;
    Ok(rel.split('/').fold(project_dir.to_path_buf(), |p, c| p.join(c)))
}

/// `a/b/c` form of a path made only of normal components.
fn normalize(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_escapes() {
        assert_eq!(normalize(Path::new("a/./b.txt")), Some("a/b.txt".to_string()));
        assert_eq!(normalize(Path::new("../b.txt")), None);
        assert_eq!(normalize(Path::new("/etc/passwd")), None);
        assert_eq!(normalize(Path::new("")), None);
    }

    #[test]
    fn absolute_paths_are_made_relative() {
        let project = Path::new("/tmp/project");
        let mut manifest = ArtifactManifest::default();
        manifest
            .record_file(project, &project.join("case-1").join("results").join("results.json"))
            .unwrap();
        assert!(manifest.files.contains("case-1/results/results.json"));
    }

    #[test]
    fn relative_project_prefix_is_stripped() {
        let project = Path::new("demos");
        let mut manifest = ArtifactManifest::default();
        manifest
            .record_file(project, &project.join("case-1").join("results").join("report.txt"))
            .unwrap();
        manifest.record_file(project, Path::new("comparison.csv")).unwrap();
        assert!(manifest.files.contains("case-1/results/report.txt"));
        assert!(manifest.files.contains("comparison.csv"));
    }

    #[test]
    fn paths_outside_project_are_rejected() {
        let mut manifest = ArtifactManifest::default();
        let err = manifest
            .record_file(Path::new("/tmp/project"), Path::new("/tmp/other/file.txt"))
            .unwrap_err();
        assert!(matches!(err, ResultsError::InvalidPath { .. }));
    }
}
