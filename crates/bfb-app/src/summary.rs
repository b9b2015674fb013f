//! Cross-case comparison table.

use std::fmt::Write;

use bfb_model::ResultRecord;

pub const COMPARISON_FILE: &str = "comparison.csv";

const COLUMNS: [&str; 25] = [
    "case_id",
    "tk",
    "us",
    "bed_umf_ergun",
    "bed_umf_wenyu",
    "bed_umb",
    "bed_umb_umf",
    "bed_ut_ganser",
    "bed_ut_haider",
    "bed_geldart",
    "biomass_umf_ergun",
    "biomass_umf_wenyu",
    "biomass_ut_ganser",
    "biomass_ut_haider",
    "char_umf_ergun",
    "char_umf_wenyu",
    "char_ut_ganser",
    "char_ut_haider",
    "t_devol",
    "t_ref",
    "tdh_chan",
    "tdh_horio",
    "zexp_ergun",
    "zexp_wenyu",
    "mu_micropoise",
];

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One row per record, in the order given.
pub fn comparison_csv(records: &[&ResultRecord]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');

    for r in records {
        let bed = &r.bed.particle;
        let bio = &r.biomass.particle;
        let t_ref = r.biomass.t_ref.map(|t| t.to_string()).unwrap_or_default();
        let values = [
            r.gas.tk_k().to_string(),
            r.bfb.us.to_string(),
            bed.umf_ergun.to_string(),
            bed.umf_wenyu.to_string(),
            r.bed.umb.to_string(),
            r.bed.umb_umf.to_string(),
            bed.ut_ganser.to_string(),
            bed.ut_haider.to_string(),
            r.bed.geldart.to_string(),
            bio.umf_ergun.to_string(),
            bio.umf_wenyu.to_string(),
            bio.ut_ganser.to_string(),
            bio.ut_haider.to_string(),
            r.char.umf_ergun.to_string(),
            r.char.umf_wenyu.to_string(),
            r.char.ut_ganser.to_string(),
            r.char.ut_haider.to_string(),
            r.biomass.t_devol.to_string(),
            t_ref,
            r.bfb.tdh_chan.to_string(),
            r.bfb.tdh_horio.to_string(),
            r.bfb.zexp_ergun.to_string(),
            r.bfb.zexp_wenyu.to_string(),
            r.gas.mu_micropoise().to_string(),
        ];
        let _ = writeln!(out, "{},{}", quote(&r.case_id), values.join(","));
    }
    out
}
