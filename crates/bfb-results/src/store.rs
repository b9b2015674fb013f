//! Case result storage.
//!
//! Layout under each case directory:
//!
//! ```text
//! <case>/results/manifest.json             case manifest
//! <case>/results/results.json              record without the temperature profile
//! <case>/results/temperature_profile.jsonl one (time, position, temperature) sample per line
//! <case>/results/report.txt                text report, when provided
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bfb_correlations::{ProfileSample, TemperatureProfile};
use bfb_model::ResultRecord;
use bfb_params::ParameterSet;

use crate::hash::compute_params_hash;
use crate::types::CaseManifest;
use crate::{ResultsError, ResultsResult};

pub const RESULTS_DIR: &str = "results";
const MANIFEST_FILE: &str = "manifest.json";
const RESULTS_FILE: &str = "results.json";
const PROFILE_FILE: &str = "temperature_profile.jsonl";
const REPORT_FILE: &str = "report.txt";

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct CaseStore {
    case_id: String,
    results_dir: PathBuf,
}

impl CaseStore {
    /// Store for the case rooted at `case_dir`. Nothing is created until [`CaseStore::save`].
    pub fn new(case_id: &str, case_dir: &Path) -> Self {
        Self {
            case_id: case_id.to_string(),
            results_dir: case_dir.join(RESULTS_DIR),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn has_results(&self) -> bool {
        self.results_dir.join(MANIFEST_FILE).exists()
    }

    /// Write all result files and return their paths, the manifest last.
    pub fn save(
        &self,
        record: &ResultRecord,
        params: &ParameterSet,
        report: Option<&str>,
    ) -> ResultsResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.results_dir)?;
        let mut written = Vec::new();

        // The profile goes to its own file; results.json keeps the scalars.
        let mut scalars = record.clone();
        let profile = std::mem::take(&mut scalars.biomass.profile);

        let results_path = self.results_dir.join(RESULTS_FILE);
        fs::write(&results_path, serde_json::to_string_pretty(&scalars)?)?;
        written.push(results_path);

        if !profile.is_empty() {
            let profile_path = self.results_dir.join(PROFILE_FILE);
            let mut content = String::new();
            for sample in profile.samples() {
                content.push_str(&serde_json::to_string(&sample)?);
                content.push('\n');
            }
            fs::write(&profile_path, content)?;
            written.push(profile_path);
        }

        if let Some(text) = report {
            let report_path = self.results_dir.join(REPORT_FILE);
            fs::write(&report_path, text)?;
            written.push(report_path);
        }

        let mut files: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| format!("{RESULTS_DIR}/{}", n.to_string_lossy()))
            .collect();
        files.push(format!("{RESULTS_DIR}/{MANIFEST_FILE}"));

        let manifest = CaseManifest {
            case_id: self.case_id.clone(),
            params_hash: compute_params_hash(params, SOLVER_VERSION),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: SOLVER_VERSION.to_string(),
            files,
        };
        let manifest_path = self.results_dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        written.push(manifest_path);

        Ok(written)
    }

    pub fn load_manifest(&self) -> ResultsResult<CaseManifest> {
        let path = self.results_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ResultsError::CaseNotFound {
                case_id: self.case_id.clone(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load the stored record, reattaching the temperature profile when present.
    pub fn load_record(&self) -> ResultsResult<ResultRecord> {
        let results_path = self.results_dir.join(RESULTS_FILE);
        if !results_path.exists() {
            return Err(ResultsError::CaseNotFound {
                case_id: self.case_id.clone(),
            });
        }
        let content = fs::read_to_string(results_path)?;
        let mut record: ResultRecord = serde_json::from_str(&content)?;

        let profile_path = self.results_dir.join(PROFILE_FILE);
        if profile_path.exists() {
            let content = fs::read_to_string(profile_path)?;
            let mut samples = Vec::new();
            for line in content.lines() {
                if !line.trim().is_empty() {
                    samples.push(serde_json::from_str::<ProfileSample>(line)?);
                }
            }
            record.biomass.profile = profile_from_samples(&samples)?;
        }

        Ok(record)
    }

    /// True when stored results were produced from exactly `params`.
    pub fn is_current(&self, params: &ParameterSet) -> bool {
        self.load_manifest()
            .map(|m| m.params_hash == compute_params_hash(params, SOLVER_VERSION))
            .unwrap_or(false)
    }
}

/// Rebuild a profile from time-major samples.
pub fn profile_from_samples(samples: &[ProfileSample]) -> ResultsResult<TemperatureProfile> {
    let mut profile = TemperatureProfile::default();
    for sample in samples {
        let new_step = profile.time_s.last() != Some(&sample.time_s);
        if new_step {
            profile.time_s.push(sample.time_s);
            profile.tk.push(Vec::new());
        }
        let step = profile.tk.len() - 1;
        if step == 0 {
            profile.r_m.push(sample.r_m);
        }
        let row = &mut profile.tk[step];
        if profile.r_m.get(row.len()) != Some(&sample.r_m) {
            return Err(ResultsError::MalformedProfile {
                message: format!(
                    "unexpected position {} at t = {} s",
                    sample.r_m, sample.time_s
                ),
            });
        }
        row.push(sample.tk);
    }

    if let Some(row) = profile.tk.iter().find(|row| row.len() != profile.r_m.len()) {
        return Err(ResultsError::MalformedProfile {
            message: format!(
                "time step has {} nodes, expected {}",
                row.len(),
                profile.r_m.len()
            ),
        });
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_s: f64, r_m: f64, tk: f64) -> ProfileSample {
        ProfileSample { time_s, r_m, tk }
    }

    #[test]
    fn profile_rebuilds_from_samples() {
        let samples = vec![
            sample(0.0, 0.0, 300.0),
            sample(0.0, 0.1, 300.0),
            sample(1.0, 0.0, 320.0),
            sample(1.0, 0.1, 350.0),
        ];
        let profile = profile_from_samples(&samples).unwrap();
        assert_eq!(profile.time_s, vec![0.0, 1.0]);
        assert_eq!(profile.r_m, vec![0.0, 0.1]);
        assert_eq!(profile.at(1, 1), Some(350.0));
        assert_eq!(profile.samples().collect::<Vec<_>>(), samples);
    }

    #[test]
    fn short_time_step_is_malformed() {
        let samples = vec![
            sample(0.0, 0.0, 300.0),
            sample(0.0, 0.1, 300.0),
            sample(1.0, 0.0, 320.0),
        ];
        assert!(matches!(
            profile_from_samples(&samples),
            Err(ResultsError::MalformedProfile { .. })
        ));
    }

    #[test]
    fn empty_samples_give_empty_profile() {
        assert!(profile_from_samples(&[]).unwrap().is_empty());
    }
}
