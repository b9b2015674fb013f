//! bfb-params: per-case parameter file format and validation.

use std::path::{Path, PathBuf};

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, mixing_rule, species, validate_parameters};

/// File names recognized as a case's parameter file, in lookup order.
pub const PARAMS_FILE_NAMES: [&str; 3] = ["params.yaml", "params.yml", "params.json"];

pub type ParamsResult<T> = Result<T, ParamsError>;

#[derive(thiserror::Error, Debug)]
pub enum ParamsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported parameter file extension: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("No parameter file in {dir} (expected one of params.yaml, params.yml, params.json)")]
    NotFound { dir: PathBuf },
}

fn read(path: &Path) -> ParamsResult<String> {
    std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_yaml(path: &Path) -> ParamsResult<ParameterSet> {
    let content = read(path)?;
    let params: ParameterSet =
        serde_yaml::from_str(&content).map_err(|source| ParamsError::ParseYaml {
            path: path.to_path_buf(),
            source,
        })?;
    validate_parameters(&params)?;
    Ok(params)
}

pub fn save_yaml(path: &Path, params: &ParameterSet) -> ParamsResult<()> {
    validate_parameters(params)?;
    let content = serde_yaml::to_string(params)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ParamsResult<ParameterSet> {
    let content = read(path)?;
    let params: ParameterSet =
        serde_json::from_str(&content).map_err(|source| ParamsError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
    validate_parameters(&params)?;
    Ok(params)
}

pub fn save_json(path: &Path, params: &ParameterSet) -> ParamsResult<()> {
    validate_parameters(params)?;
    let content = serde_json::to_string_pretty(params)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a parameter file, choosing the format from its extension.
pub fn load(path: &Path) -> ParamsResult<ParameterSet> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ParamsError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Locate the parameter file inside a case directory.
pub fn find_params_file(dir: &Path) -> ParamsResult<PathBuf> {
    PARAMS_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| ParamsError::NotFound {
            dir: dir.to_path_buf(),
        })
}

/// Load the parameter file of a case directory.
pub fn load_case_dir(dir: &Path) -> ParamsResult<ParameterSet> {
    let path = find_params_file(dir)?;
    load(&path)
}
