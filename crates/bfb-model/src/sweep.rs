//! Gas-temperature sweep.
//!
//! Re-runs the property pipeline, without the conduction profile, at evenly spaced gas
//! temperatures. A point that fails is recorded and the sweep continues.

use bfb_core::linspace;
use bfb_params::{ParameterSet, SweepDef};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::solver::{SolveOptions, evaluate};

/// Values at one sweep temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Gas temperature [K]
    pub tk: f64,
    pub us: f64,
    pub t_devol: f64,
    pub umf_ergun: f64,
    pub umf_wenyu: f64,
    pub ut_ganser: f64,
    pub ut_haider: f64,
    pub umb_umf: f64,
}

/// A sweep temperature at which the pipeline failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub tk: f64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSweep {
    pub points: Vec<SweepPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SweepFailure>,
}

impl TemperatureSweep {
    pub fn num_successful(&self) -> usize {
        self.points.len()
    }

    pub fn num_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.tk).collect()
    }

    pub fn t_devol(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.t_devol).collect()
    }
}

/// Evaluate the bed and biomass velocities at each sweep temperature.
pub fn run_temperature_sweep(params: &ParameterSet, def: &SweepDef) -> TemperatureSweep {
    let options = SolveOptions {
        transient_profile: false,
        fan_out: false,
        sweep: false,
    };

    let mut sweep = TemperatureSweep::default();
    for tk in linspace(def.tk_start, def.tk_end, def.points) {
        match evaluate(params, tk, &options) {
            Ok(eval) => sweep.points.push(SweepPoint {
                tk,
                us: eval.bfb.us,
                t_devol: eval.biomass.t_devol,
                umf_ergun: eval.bed.particle.umf_ergun,
                umf_wenyu: eval.bed.particle.umf_wenyu,
                ut_ganser: eval.bed.particle.ut_ganser,
                ut_haider: eval.bed.particle.ut_haider,
                umb_umf: eval.bed.umb_umf,
            }),
            Err(e) => {
                warn!(tk, error = %e, "sweep point failed");
                sweep.failures.push(SweepFailure {
                    tk,
                    message: e.to_string(),
                });
            }
        }
    }
    sweep
}
