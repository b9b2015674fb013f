//! Biomass pyrolysis correlations.

use bfb_core::{ensure_in_range, ensure_positive};

use crate::error::CorrelationResult;

/// Heat capacity of liquid water [kJ/(kg K)].
const CP_WATER_KJ: f64 = 4.186;

/// Devolatilization time [s] for 95% conversion of a biomass particle.
///
/// `dp_mm` is the particle diameter in millimetres and `tk` the gas temperature in K;
/// `tv = 0.8·exp(1525/T)·dp^1.2`.
pub fn devol_time(dp_mm: f64, tk: f64) -> CorrelationResult<f64> {
    let dp_mm = ensure_positive(dp_mm, "biomass particle diameter")?;
    let tk = ensure_positive(tk, "gas temperature")?;
    Ok(0.8 * (1525.0 / tk).exp() * dp_mm.powf(1.2))
}

/// Heat capacity of wood [J/(kg K)] at moisture content `mc` [% wet basis] and `tk` [K].
///
/// Dry-wood heat capacity is linear in temperature; the moisture correction adds the water
/// contribution plus the wood-water bond adjustment term.
pub fn cp_wood(mc: f64, tk: f64) -> CorrelationResult<f64> {
    let mc = ensure_in_range(mc, 0.0, 100.0, "moisture content")?;
    let tk = ensure_positive(tk, "wood temperature")?;

    let cp_dry = 0.1031 + 0.003867 * tk;
    let adjustment = mc * (-0.06191 + 2.36e-4 * tk - 1.33e-4 * mc);
    let cp_wet = (cp_dry + 0.01 * mc * CP_WATER_KJ) / (1.0 + 0.01 * mc) + adjustment;
    Ok(cp_wet * 1000.0)
}
