//! Plain-text case report.

use std::fmt::Write;

use bfb_model::ResultRecord;
use bfb_params::ParameterSet;

const W: usize = 12;

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "{:*^40}", "*");
    let _ = writeln!(out, "{:^40}", title);
    let _ = writeln!(out, "{:*^40}", "*");
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{:-^40}\n", format!(" {title} "));
}

fn line(out: &mut String, key: &str, value: impl std::fmt::Display, desc: &str) {
    let value = value.to_string();
    let _ = writeln!(out, "{key:<W$} {value:<W$} {desc}");
}

fn fixed(v: f64, prec: usize) -> String {
    format!("{v:.prec$}")
}

fn label(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Render the parameters and results of one case.
pub fn render_report(params: &ParameterSet, record: &ResultRecord) -> String {
    let mut out = String::new();
    write_parameters(&mut out, &record.case_id, params);
    out.push('\n');
    write_results(&mut out, record);
    out
}

fn write_parameters(out: &mut String, case_id: &str, pm: &ParameterSet) {
    if let Some(case) = &pm.case {
        let _ = writeln!(out, "{}", label(&case.system));
        let _ = writeln!(out, "{}", label(&case.reactor));
        let number = case.number.map(|n| n.to_string()).unwrap_or_default();
        let _ = writeln!(out, "Case {number} - {}", label(&case.description));
    } else {
        let _ = writeln!(out, "Case {case_id}");
    }
    out.push('\n');

    banner(out, "Parameters");

    section(out, "Bed Particle");
    let _ = writeln!(out, "{:<W$}", label(&pm.bed.sample_desc));
    let _ = writeln!(out, "{:<W$}\n", label(&pm.bed.sample_id));
    line(out, "dp", pm.bed.dp, "Mean particle diameter [m]");
    line(out, "dp_min", pm.bed.dp_min, "Minimum particle diameter [m]");
    line(out, "dp_max", pm.bed.dp_max, "Maximum particle diameter [m]");
    line(out, "phi", pm.bed.phi, "Sphericity [-]");
    line(out, "rhos", pm.bed.rhos, "Density [kg/m³]");
    line(out, "fines", pm.bed.fines, "Mass fraction of fines below 45 µm [-]");
    out.push('\n');

    let bm = &pm.biomass;
    section(out, "Biomass Particle");
    let _ = writeln!(out, "{:<W$}", label(&bm.sample_desc));
    let _ = writeln!(out, "{:<W$}\n", label(&bm.sample_id));
    line(out, "dp", bm.dp_mean, "Mean particle diameter [m]");
    line(out, "phi", bm.phi, "Particle sphericity [-]");
    line(out, "rho", bm.rho, "Density [kg/m³]");
    line(out, "b", bm.b, "Shape factor for particle transient heat conduction [-]");
    line(out, "h", bm.h, "Heat transfer coefficient for convection [W/m²K]");
    line(out, "k", bm.k, "Thermal conductivity [W/mK]");
    line(out, "m", bm.m, "Number of nodes from particle center to surface");
    line(out, "mc", bm.mc, "Moisture content [%]");
    line(out, "nt", bm.nt, "Number of time steps for particle temperature profile [-]");
    line(out, "tki", bm.tk_init, "Initial particle temperature [K]");
    line(out, "t_max", bm.t_max, "Time duration to calculate particle temperature profile [s]");
    out.push('\n');

    section(out, "Char Particle");
    line(out, "dp", pm.char.dp, "Mean particle diameter [m]");
    line(out, "phi", pm.char.phi, "Sphericity [-]");
    line(out, "rho", pm.char.rho, "Density [kg/m³]");
    out.push('\n');

    let x: Vec<String> = pm.gas.x.iter().map(|v| v.to_string()).collect();
    section(out, "Gas Properties");
    line(out, "sp", pm.gas.sp.join(", "), "Components of gas mixture [-]");
    line(out, "x", x.join(", "), "Mole fractions of components in gas mixture [-]");
    line(out, "p", pm.gas.p, "Gas pressure in reactor [Pa]");
    line(out, "tk", pm.gas.tk, "Gas temperature in reactor [K]");
    out.push('\n');

    section(out, "Reactor Geometry and Conditions");
    line(out, "di", pm.reactor.di, "Inner diameter of reactor [m]");
    line(out, "ep", pm.reactor.ep, "Void fraction of bed [-]");
    line(out, "ht", pm.reactor.ht, "Total height of reactor [m]");
    line(out, "q", pm.reactor.q, "Volumetric flowrate of gas into reactor [SLM]");
    line(out, "zmf", pm.reactor.zmf, "Bed height at minimum fluidization [m]");
}

fn write_results(out: &mut String, r: &ResultRecord) {
    banner(out, "Results");

    section(out, "Gas Properties");
    line(out, "mw", fixed(r.gas.mw, 4), "Molecular weight [g/mol]");
    line(out, "mu", fixed(r.gas.mu_micropoise(), 2), "Viscosity [µP]");
    line(out, "rho", fixed(r.gas.rho_kg_m3(), 4), "Density [kg/m³]");
    if let Some(rule) = r.gas.mixing {
        line(out, "mixing", rule, "Viscosity mixing rule");
    }
    out.push('\n');

    let bed = &r.bed;
    section(out, "Bed Particle");
    line(out, "geldart", bed.geldart, "Geldart group");
    line(out, "umb", fixed(bed.umb, 4), "Minimum bubbling velocity [m/s]");
    line(out, "umb_umf", fixed(bed.umb_umf, 4), "Umb/Umf according to Abrahamsen [-]");
    velocities(out, &bed.particle);
    out.push('\n');

    let bio = &r.biomass;
    let t_ref = bio
        .t_ref
        .map(|t| fixed(t, 2))
        .unwrap_or_else(|| "n/a".to_string());
    section(out, "Biomass Particle");
    line(out, "t_devol", fixed(bio.t_devol, 2), "Devolatilization time for 95% conversion [s]");
    line(out, "t_ref", t_ref, "Time for particle center to reach T∞ [s]");
    velocities(out, &bio.particle);
    out.push('\n');

    section(out, "Char Particle");
    velocities(out, &r.char);
    out.push('\n');

    let bfb = &r.bfb;
    section(out, "BFB Model");
    line(out, "ac", fixed(bfb.ac, 4), "Inner cross section area [m²]");
    line(out, "us", fixed(bfb.us, 4), "Superficial gas velocity [m/s]");
    line(out, "tdh_chan", fixed(bfb.tdh_chan, 4), "Transport disengaging height [m]");
    line(out, "tdh_horio", fixed(bfb.tdh_horio, 4), "Transport disengaging height [m]");
    line(out, "us_umf_ergun", fixed(bed.particle.us_umf_ergun, 2), "Us/Umf for gas and bed particles [-]");
    line(out, "us_umf_wenyu", fixed(bed.particle.us_umf_wenyu, 2), "Us/Umf for gas and bed particles [-]");
    line(out, "zexp_ergun", fixed(bfb.zexp_ergun, 2), "Height of expanded bed [m]");
    line(out, "zexp_wenyu", fixed(bfb.zexp_wenyu, 2), "Height of expanded bed [m]");

    if let Some(sweep) = &r.sweep {
        out.push('\n');
        section(out, "Temperature Sweep");
        let _ = writeln!(
            out,
            "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "tk", "us", "umf_wenyu", "ut_ganser", "umb_umf", "t_devol"
        );
        for p in &sweep.points {
            let _ = writeln!(
                out,
                "{:<8.1} {:>10.4} {:>10.4} {:>10.2} {:>10.4} {:>10.2}",
                p.tk, p.us, p.umf_wenyu, p.ut_ganser, p.umb_umf, p.t_devol
            );
        }
        for f in &sweep.failures {
            let _ = writeln!(out, "{:<8.1} failed: {}", f.tk, f.message);
        }
    }
}

fn velocities(out: &mut String, p: &bfb_model::ParticleResult) {
    line(out, "umf_ergun", fixed(p.umf_ergun, 4), "Minimum fluidization velocity [m/s]");
    line(out, "umf_wenyu", fixed(p.umf_wenyu, 4), "Minimum fluidization velocity [m/s]");
    line(out, "ut_ganser", fixed(p.ut_ganser, 2), "Terminal velocity [m/s]");
    line(out, "ut_haider", fixed(p.ut_haider, 2), "Terminal velocity [m/s]");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfb_model::{SolveOptions, solve_case};
    use bfb_params::schema::*;

    fn params() -> ParameterSet {
        serde_json::from_str(include_str!("../tests/data/nitrogen.json")).unwrap()
    }

    #[test]
    fn report_lists_parameters_and_results() {
        let params = params();
        let record = solve_case("case-1", &params, &SolveOptions::default()).unwrap();
        let text = render_report(&params, &record);

        assert!(text.contains("Parameters"));
        assert!(text.contains("Results"));
        assert!(text.contains("umf_ergun"));
        assert!(text.contains("Superficial gas velocity [m/s]"));
        assert!(text.contains(&format!("{:.4}", record.bfb.us)));
        assert!(text.contains("Case 1 - Sand bed in nitrogen"));
    }

    #[test]
    fn report_without_case_info_uses_identifier() {
        let mut params = params();
        params.case = None;
        params.sweep = Some(SweepDef {
            tk_start: 700.0,
            tk_end: 800.0,
            points: 2,
        });
        let record = solve_case("case-7", &params, &SolveOptions::default()).unwrap();
        let text = render_report(&params, &record);
        assert!(text.starts_with("Case case-7"));
        assert!(text.contains("Temperature Sweep"));
    }
}
