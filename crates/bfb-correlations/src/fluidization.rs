//! Minimum fluidization, minimum bubbling, and terminal velocity correlations.
//!
//! All inputs are SI: diameters in m, viscosity in Pa·s, densities in kg/m³.
//! Velocities are returned in m/s.

use bfb_core::units::constants::G0_MPS2;
use bfb_core::{ensure_in_range, ensure_positive};

use crate::error::{CorrelationError, CorrelationResult};

/// Wen and Yu coefficients for `Re_mf = √(C1² + C2·Ar) − C1`.
const WENYU_C1: f64 = 33.7;
const WENYU_C2: f64 = 0.0408;

/// Density difference `rhos - rhog`, required positive for a settling particle.
fn density_difference(rhog: f64, rhos: f64) -> CorrelationResult<f64> {
    let rhog = ensure_positive(rhog, "gas density")?;
    let rhos = ensure_positive(rhos, "particle density")?;
    let drho = rhos - rhog;
    if drho <= 0.0 {
        return Err(CorrelationError::NonPhysical {
            what: "particle density must exceed gas density",
            value: drho,
        });
    }
    Ok(drho)
}

/// Archimedes number `dp³·rhog·(rhos − rhog)·g / mu²`.
pub fn archimedes(dp: f64, mu: f64, rhog: f64, rhos: f64) -> CorrelationResult<f64> {
    let dp = ensure_positive(dp, "particle diameter")?;
    let mu = ensure_positive(mu, "gas viscosity")?;
    let drho = density_difference(rhog, rhos)?;
    Ok(dp.powi(3) * rhog * drho * G0_MPS2 / (mu * mu))
}

/// Minimum fluidization velocity from the Ergun equation.
///
/// Solves `a·umf² + b·umf + c = 0` for the positive root, with the sphericity entering
/// through the effective diameter `phi·dp`.
pub fn umf_ergun(
    dp: f64,
    ep: f64,
    mu: f64,
    phi: f64,
    rhog: f64,
    rhos: f64,
) -> CorrelationResult<f64> {
    let dp = ensure_positive(dp, "particle diameter")?;
    let ep = ensure_positive(ep, "bed void fraction")?;
    let ep = ensure_in_range(ep, 0.0, 1.0, "bed void fraction")?;
    let mu = ensure_positive(mu, "gas viscosity")?;
    let phi = ensure_positive(phi, "sphericity")?;
    let phi = ensure_in_range(phi, 0.0, 1.0, "sphericity")?;
    let drho = density_difference(rhog, rhos)?;

    let a = 1.75 * rhog / (phi * dp * ep.powi(3));
    let b = 150.0 * mu * (1.0 - ep) / (phi * phi * dp * dp * ep.powi(3));
    let c = -G0_MPS2 * drho;

    let disc = b * b - 4.0 * a * c;
    Ok((-b + disc.sqrt()) / (2.0 * a))
}

/// Minimum fluidization velocity from the Wen and Yu coefficients.
pub fn umf_wenyu(dp: f64, mu: f64, rhog: f64, rhos: f64) -> CorrelationResult<f64> {
    let ar = archimedes(dp, mu, rhog, rhos)?;
    let re = (WENYU_C1 * WENYU_C1 + WENYU_C2 * ar).sqrt() - WENYU_C1;
    Ok(re * mu / (dp * rhog))
}

/// Terminal velocity from the Haider and Levenspiel explicit form.
pub fn ut_haider(dp: f64, mu: f64, phi: f64, rhog: f64, rhos: f64) -> CorrelationResult<f64> {
    let phi = ensure_positive(phi, "sphericity")?;
    let phi = ensure_in_range(phi, 0.0, 1.0, "sphericity")?;
    let ar = archimedes(dp, mu, rhog, rhos)?;
    let drho = rhos - rhog;

    let d_star = ar.cbrt();
    let u_star = 1.0 / (18.0 / (d_star * d_star) + (2.3348 - 1.7439 * phi) / d_star.sqrt());
    Ok(u_star * (mu * G0_MPS2 * drho / (rhog * rhog)).cbrt())
}

/// Ganser drag coefficient for an isometric particle at Reynolds number `re`.
pub fn cd_ganser(re: f64, phi: f64) -> f64 {
    let k1 = 1.0 / (1.0 / 3.0 + 2.0 / (3.0 * phi.sqrt()));
    let k2 = 10f64.powf(1.8148 * (-phi.log10()).powf(0.5743));
    let rek = re * k1 * k2;
    k2 * (24.0 / rek * (1.0 + 0.1118 * rek.powf(0.6567)) + 0.4305 / (1.0 + 3305.0 / rek))
}

/// Terminal velocity from the Ganser drag law.
///
/// The settling balance `Cd(Re)·Re² = 4/3·Ar` is monotonic in `Re`, so the root is found by
/// bisection in log space.
pub fn ut_ganser(dp: f64, mu: f64, phi: f64, rhog: f64, rhos: f64) -> CorrelationResult<f64> {
    let phi = ensure_positive(phi, "sphericity")?;
    let phi = ensure_in_range(phi, 0.0, 1.0, "sphericity")?;
    let ar = archimedes(dp, mu, rhog, rhos)?;
    let target = 4.0 / 3.0 * ar;

    let residual = |log_re: f64| {
        let re = log_re.exp();
        cd_ganser(re, phi) * re * re - target
    };

    let mut lo = (1e-12f64).ln();
    let mut hi = (1e8f64).ln();
    if residual(lo) > 0.0 || residual(hi) < 0.0 {
        return Err(CorrelationError::ConvergenceFailed {
            what: "Ganser terminal velocity bracket",
        });
    }

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if residual(mid) > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        if hi - lo < 1e-13 {
            break;
        }
    }

    let re = (0.5 * (lo + hi)).exp();
    Ok(re * mu / (rhog * dp))
}

/// Abrahamsen and Geldart ratio of minimum bubbling to minimum fluidization velocity.
///
/// `fines` is the mass fraction of particles below 45 µm. The raw ratio is returned; values
/// below one mean the powder bubbles as soon as it fluidizes.
pub fn umb_umf_abrahamsen(
    dp: f64,
    mu: f64,
    rhog: f64,
    rhos: f64,
    fines: f64,
) -> CorrelationResult<f64> {
    let dp = ensure_positive(dp, "particle diameter")?;
    let mu = ensure_positive(mu, "gas viscosity")?;
    let fines = ensure_in_range(fines, 0.0, 1.0, "fines fraction")?;
    let drho = density_difference(rhog, rhos)?;

    let num = 2300.0 * rhog.powf(0.126) * mu.powf(0.523) * (0.716 * fines).exp();
    let den = dp.powf(0.8) * G0_MPS2.powf(0.934) * drho.powf(0.934);
    Ok(num / den)
}

// N2 at 773 K and 1 atm
#[cfg(test)]
const MU: f64 = 3.507e-5;
#[cfg(test)]
const RHOG: f64 = 0.4416;
