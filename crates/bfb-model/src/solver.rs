//! Case solver.
//!
//! Runs the property pipeline for one parameter set in a fixed order:
//!
//! 1. gas state
//! 2. reactor cross-section
//! 3. superficial velocity at reactor conditions
//! 4. bed, biomass and char velocities (optionally in parallel)
//! 5. bed expansion and TDH
//! 6. record assembly (plus the temperature sweep, if configured)

use std::f64::consts::PI;

use bfb_correlations::{expansion, gas};
use bfb_params::ParameterSet;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::gas::GasState;
use crate::particle::{BedResult, BiomassResult, BiomassThermal, Particle, ParticleResult};
use crate::record::{ReactorResult, ResultRecord};
use crate::sweep::{TemperatureSweep, run_temperature_sweep};

/// Options controlling how much work one solve does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Solve the biomass conduction profile (and `t_ref`).
    pub transient_profile: bool,
    /// Evaluate the three populations concurrently.
    pub fan_out: bool,
    /// Run the temperature sweep when the parameters define one.
    pub sweep: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            transient_profile: true,
            fan_out: false,
            sweep: true,
        }
    }
}

/// Intermediate results of steps 1-5 at one gas temperature.
#[derive(Debug, Clone)]
pub(crate) struct Evaluation {
    pub gas: GasState,
    pub bed: BedResult,
    pub biomass: BiomassResult,
    pub char: ParticleResult,
    pub bfb: ReactorResult,
}

/// Solve one case.
pub fn solve_case(
    case_id: &str,
    params: &ParameterSet,
    options: &SolveOptions,
) -> ModelResult<ResultRecord> {
    let eval = evaluate(params, params.gas.tk, options)?;
    debug!(
        case = case_id,
        us = eval.bfb.us,
        umf_ergun = eval.bed.particle.umf_ergun,
        "case solved"
    );

    let sweep: Option<TemperatureSweep> = match (&params.sweep, options.sweep) {
        (Some(def), true) => Some(run_temperature_sweep(params, def)),
        _ => None,
    };

    Ok(ResultRecord {
        case_id: case_id.to_string(),
        gas: eval.gas,
        bed: eval.bed,
        biomass: eval.biomass,
        char: eval.char,
        bfb: eval.bfb,
        sweep,
    })
}

/// Cross-sectional area of a circular reactor [m²].
pub fn cross_section(di: f64) -> ModelResult<f64> {
    if !(di.is_finite() && di > 0.0) {
        return Err(ModelError::InvalidGeometry {
            what: "reactor.di".to_string(),
            value: di,
        });
    }
    Ok(PI * di * di / 4.0)
}

/// Superficial velocity [m/s] from a standard flow [SLM] at reactor pressure and temperature.
pub fn superficial_velocity(q_slm: f64, p_pa: f64, tk: f64, ac: f64) -> ModelResult<f64> {
    if !(q_slm.is_finite() && q_slm > 0.0) {
        return Err(ModelError::Configuration {
            message: format!("reactor.q must be positive, got {q_slm}"),
        });
    }
    let lpm = gas::slm_to_lpm(q_slm, p_pa / 1000.0, tk)?;
    Ok(lpm / 60_000.0 / ac)
}

/// Steps 1-5 at gas temperature `tk`.
pub(crate) fn evaluate(
    params: &ParameterSet,
    tk: f64,
    options: &SolveOptions,
) -> ModelResult<Evaluation> {
    let gas = GasState::from_keys(
        &params.gas.sp,
        &params.gas.x,
        params.gas.mixing.as_deref(),
        params.gas.p,
        tk,
    )
    .map_err(|e| e.context("gas"))?;

    let reactor = &params.reactor;
    let ac = cross_section(reactor.di)?;
    let us = superficial_velocity(reactor.q, gas.p_pa(), gas.tk_k(), ac)?;
    debug!(ac, us, rhog = gas.rho_kg_m3(), mu = gas.mu_pa_s(), "reactor conditions");

    let (bed, biomass, char) = evaluate_populations(params, &gas, us, options)?;

    let fbexp_ergun = expansion::fbexp(
        reactor.di,
        params.bed.dp,
        gas.rho_kg_m3(),
        params.bed.rhos,
        bed.particle.umf_ergun,
        us,
    )?;
    let fbexp_wenyu = expansion::fbexp(
        reactor.di,
        params.bed.dp,
        gas.rho_kg_m3(),
        params.bed.rhos,
        bed.particle.umf_wenyu,
        us,
    )?;

    let bfb = ReactorResult {
        ac,
        us,
        tdh_chan: expansion::tdh_chan(us)?,
        tdh_horio: expansion::tdh_horio(reactor.di, us)?,
        zexp_ergun: reactor.zmf * fbexp_ergun,
        zexp_wenyu: reactor.zmf * fbexp_wenyu,
    };

    Ok(Evaluation {
        gas,
        bed,
        biomass,
        char,
        bfb,
    })
}

fn evaluate_populations(
    params: &ParameterSet,
    gas: &GasState,
    us: f64,
    options: &SolveOptions,
) -> ModelResult<(BedResult, BiomassResult, ParticleResult)> {
    let ep = params.reactor.ep;

    let bed_particle = Particle {
        dp: params.bed.dp,
        phi: params.bed.phi,
        rho: params.bed.rhos,
    };
    let biomass_particle = Particle {
        dp: params.biomass.dp_mean,
        phi: params.biomass.phi,
        rho: params.biomass.rho,
    };
    let char_particle = Particle {
        dp: params.char.dp,
        phi: params.char.phi,
        rho: params.char.rho,
    };
    let bm = &params.biomass;
    let thermal = BiomassThermal {
        b: bm.b,
        h: bm.h,
        k: bm.k,
        m: bm.m,
        mc: bm.mc,
        nt: bm.nt,
        tk_init: bm.tk_init,
        t_max: bm.t_max,
    };

    let bed = || {
        BedResult::evaluate(&bed_particle, ep, params.bed.fines, gas, us)
            .map_err(|e| e.context("bed"))
    };
    let biomass = || {
        BiomassResult::evaluate(
            &biomass_particle,
            &thermal,
            ep,
            gas,
            us,
            options.transient_profile,
        )
        .map_err(|e| e.context("biomass"))
    };
    let char = || {
        ParticleResult::evaluate(&char_particle, ep, gas, us).map_err(|e| e.context("char"))
    };

    if options.fan_out {
        let (bed, (biomass, char)) = rayon::join(bed, || rayon::join(biomass, char));
        Ok((bed?, biomass?, char?))
    } else {
        Ok((bed()?, biomass()?, char()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_section_of_two_inch_reactor() {
        let ac = cross_section(0.05).unwrap();
        assert!((ac - 1.9635e-3).abs() < 1e-7);
    }

    #[test]
    fn zero_diameter_is_invalid_geometry() {
        assert!(matches!(
            cross_section(0.0),
            Err(ModelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn superficial_velocity_scales_with_temperature() {
        let ac = cross_section(0.05).unwrap();
        let cold = superficial_velocity(14.0, 101_325.0, 273.15, ac).unwrap();
        let hot = superficial_velocity(14.0, 101_325.0, 773.0, ac).unwrap();
        assert!((cold - 14.0 / 60_000.0 / ac).abs() < 1e-12);
        assert!((hot - 0.3363).abs() < 1e-3);
    }
}
