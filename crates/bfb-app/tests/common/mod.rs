#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

/// Parameter file for a sand bed in nitrogen at `tk`.
pub fn case_yaml(tk: f64, with_bed_dp: bool) -> String {
    let bed_dp = if with_bed_dp { "  dp: 0.0004\n" } else { "" };
    format!(
        "\
reactor:
  di: 0.05
  ep: 0.46
  ht: 0.5
  q: 14.0
  zmf: 0.1
bed:
{bed_dp}  dp_min: 0.0003
  dp_max: 0.0005
  phi: 0.86
  rhos: 2600.0
biomass:
  dp_mean: 0.0005
  phi: 0.8
  rho: 540.0
  b: 2
  h: 350.0
  k: 0.12
  m: 10
  mc: 8.0
  nt: 100
  tk_init: 293.0
  t_max: 10.0
char:
  dp: 0.0002
  phi: 0.8
  rho: 300.0
gas:
  sp: [N2]
  x: [1.0]
  p: 101325.0
  tk: {tk}
"
    )
}

pub fn write_case(project: &Path, case_id: &str, yaml: &str) -> PathBuf {
    let dir = project.join(case_id);
    fs::create_dir_all(&dir).expect("failed to create case dir");
    fs::write(dir.join("params.yaml"), yaml).expect("failed to write params");
    dir
}

/// Project with case-1..case-3; case-2 lacks `bed.dp`.
pub fn three_case_project(prefix: &str) -> PathBuf {
    let project = unique_temp_dir(prefix);
    write_case(&project, "case-1", &case_yaml(773.0, true));
    write_case(&project, "case-2", &case_yaml(773.0, false));
    write_case(&project, "case-3", &case_yaml(823.0, true));
    project
}
