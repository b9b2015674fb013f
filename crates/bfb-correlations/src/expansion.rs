//! Bed expansion and transport disengaging height.

use bfb_core::ensure_positive;

use crate::error::{CorrelationError, CorrelationResult};

/// Reactor diameter [m] separating the small- and large-column expansion correlations.
pub const FBEXP_DIAMETER_SPLIT_M: f64 = 0.0635;

/// Bed expansion factor `z_exp / z_mf` (Souza-Santos, eqs. 14.7 and 14.8).
///
/// Columns narrower than [`FBEXP_DIAMETER_SPLIT_M`] use the diameter-dependent form; wider
/// columns use the particle-diameter form. A bed at or below minimum fluidization does not
/// expand and returns exactly `1.0`.
pub fn fbexp(di: f64, dp: f64, rhog: f64, rhos: f64, umf: f64, us: f64) -> CorrelationResult<f64> {
    let di = ensure_positive(di, "reactor inner diameter")?;
    let dp = ensure_positive(dp, "particle diameter")?;
    let rhog = ensure_positive(rhog, "gas density")?;
    let rhos = ensure_positive(rhos, "particle density")?;
    let umf = ensure_positive(umf, "minimum fluidization velocity")?;
    let us = ensure_positive(us, "superficial gas velocity")?;

    if us <= umf {
        return Ok(1.0);
    }
    let excess = us - umf;

    let factor = if di < FBEXP_DIAMETER_SPLIT_M {
        1.0 + 1.032 * excess.powf(0.57) * rhog.powf(0.083)
            / (rhos.powf(0.166) * umf.powf(0.063) * di.powf(0.445))
    } else {
        1.0 + 14.314 * excess.powf(0.738) * dp.powf(1.006) * rhos.powf(0.376)
            / (rhog.powf(0.126) * umf.powf(0.937))
    };
    Ok(factor)
}

/// Transport disengaging height [m] from Chan and Knowlton.
pub fn tdh_chan(us: f64) -> CorrelationResult<f64> {
    let us = ensure_positive(us, "superficial gas velocity")?;
    let tdh = 0.85 * us.powf(1.2) * (7.33 - 1.2 * us.ln());
    if tdh <= 0.0 {
        return Err(CorrelationError::OutOfRange {
            what: "superficial gas velocity for Chan TDH",
            value: us,
        });
    }
    Ok(tdh)
}

/// Transport disengaging height [m] from Horio et al.
pub fn tdh_horio(di: f64, us: f64) -> CorrelationResult<f64> {
    let di = ensure_positive(di, "reactor inner diameter")?;
    let us = ensure_positive(us, "superficial gas velocity")?;
    Ok((2.7 * di.powf(-0.36) - 0.7) * di * (0.74 * us * di.powf(-0.23)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_expansion_below_umf() {
        assert_eq!(fbexp(0.05, 0.0004, 0.44, 2600.0, 0.1, 0.05).unwrap(), 1.0);
        assert_eq!(fbexp(0.05, 0.0004, 0.44, 2600.0, 0.1, 0.1).unwrap(), 1.0);
    }

    #[test]
    fn small_column_expansion() {
        let f = fbexp(0.05, 0.0004, 0.4416, 2600.0, 0.1024, 0.3363).unwrap();
        assert!((f - 1.50).abs() < 0.02, "fbexp = {f}");
    }

    #[test]
    fn large_column_expansion() {
        let f = fbexp(0.1, 0.0004, 0.4416, 2600.0, 0.1024, 0.3363).unwrap();
        assert!(f > 1.0 && f < 2.0, "fbexp = {f}");
    }

    #[test]
    fn expansion_grows_with_velocity() {
        let lo = fbexp(0.05, 0.0004, 0.44, 2600.0, 0.1, 0.2).unwrap();
        let hi = fbexp(0.05, 0.0004, 0.44, 2600.0, 0.1, 0.4).unwrap();
        assert!(hi > lo);
    }

    #[test]
    fn tdh_values() {
        let chan = tdh_chan(0.3363).unwrap();
        let horio = tdh_horio(0.05, 0.3363).unwrap();
        assert!((chan - 1.98).abs() < 0.05, "chan = {chan}");
        assert!((horio - 0.594).abs() < 0.02, "horio = {horio}");
    }

    #[test]
    fn tdh_rejects_zero_velocity() {
        assert!(tdh_chan(0.0).is_err());
        assert!(tdh_horio(0.05, 0.0).is_err());
    }
}
