//! Gas mixture rules, ideal-gas density, and volumetric flow conversion.

use std::fmt;
use std::str::FromStr;

use bfb_core::units::constants::{R_J_PER_MOL_K, STD_PRESSURE_KPA, STD_TEMPERATURE_K};
use bfb_core::{ensure_positive, numeric::MOLE_FRACTION_SUM_TOL};

use crate::error::{CorrelationError, CorrelationResult};

/// Rule combining per-species viscosities into a mixture viscosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixingRule {
    /// Mole-fraction weighted mean.
    Graham,
    /// Herning–Zipperer, weighted by `x·√mw`.
    #[default]
    Herning,
}

impl MixingRule {
    pub fn label(self) -> &'static str {
        match self {
            Self::Graham => "graham",
            Self::Herning => "herning",
        }
    }
}

impl fmt::Display for MixingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MixingRule {
    type Err = CorrelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graham" => Ok(Self::Graham),
            "herning" => Ok(Self::Herning),
            _ => Err(CorrelationError::UnknownMixingRule {
                name: s.to_string(),
            }),
        }
    }
}

fn check_weights(values: &[f64], x: &[f64]) -> CorrelationResult<()> {
    if values.is_empty() || values.len() != x.len() {
        return Err(CorrelationError::InvalidArg {
            what: "property and mole fraction arrays must be non-empty and equal length",
        });
    }
    let sum: f64 = x.iter().sum();
    if (sum - 1.0).abs() > MOLE_FRACTION_SUM_TOL {
        return Err(CorrelationError::OutOfRange {
            what: "sum of mole fractions",
            value: sum,
        });
    }
    Ok(())
}

/// Mixture molecular weight [g/mol] as `Σ xᵢ·mwᵢ`.
pub fn mw_mix(mw: &[f64], x: &[f64]) -> CorrelationResult<f64> {
    check_weights(mw, x)?;
    Ok(mw.iter().zip(x).map(|(m, xi)| m * xi).sum())
}

/// Graham mixture viscosity, `Σ xᵢ·μᵢ`. Units follow the inputs.
pub fn mu_graham(mu: &[f64], x: &[f64]) -> CorrelationResult<f64> {
    check_weights(mu, x)?;
    Ok(mu.iter().zip(x).map(|(m, xi)| m * xi).sum())
}

/// Herning–Zipperer mixture viscosity, `Σ μᵢxᵢ√mwᵢ / Σ xᵢ√mwᵢ`. Units follow the inputs.
pub fn mu_herning(mu: &[f64], mw: &[f64], x: &[f64]) -> CorrelationResult<f64> {
    check_weights(mu, x)?;
    if mw.len() != mu.len() {
        return Err(CorrelationError::InvalidArg {
            what: "viscosity and molecular weight arrays differ in length",
        });
    }
    let mut num = 0.0;
    let mut den = 0.0;
    for ((m, w), xi) in mu.iter().zip(mw).zip(x) {
        let weight = xi * w.sqrt();
        num += m * weight;
        den += weight;
    }
    if den <= 0.0 {
        return Err(CorrelationError::NonPhysical {
            what: "Herning weight sum",
            value: den,
        });
    }
    Ok(num / den)
}

/// Apply the selected mixing rule.
pub fn mu_mix(rule: MixingRule, mu: &[f64], mw: &[f64], x: &[f64]) -> CorrelationResult<f64> {
    match rule {
        MixingRule::Graham => mu_graham(mu, x),
        MixingRule::Herning => mu_herning(mu, mw, x),
    }
}

/// Ideal-gas density [kg/m³] from molecular weight [g/mol], pressure [Pa], temperature [K].
pub fn rhog(mw: f64, p: f64, tk: f64) -> CorrelationResult<f64> {
    let mw = ensure_positive(mw, "molecular weight")?;
    let p = ensure_positive(p, "gas pressure")?;
    let tk = ensure_positive(tk, "gas temperature")?;
    Ok(p * mw / (1000.0 * R_J_PER_MOL_K * tk))
}

/// Convert standard litres per minute to actual litres per minute at `p_kpa` [kPa], `tk` [K].
pub fn slm_to_lpm(slm: f64, p_kpa: f64, tk: f64) -> CorrelationResult<f64> {
    let p_kpa = ensure_positive(p_kpa, "gas pressure")?;
    let tk = ensure_positive(tk, "gas temperature")?;
    Ok(slm * (STD_PRESSURE_KPA / p_kpa) * (tk / STD_TEMPERATURE_K))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_rule_parse() {
        assert_eq!("Herning".parse::<MixingRule>().unwrap(), MixingRule::Herning);
        assert_eq!("graham".parse::<MixingRule>().unwrap(), MixingRule::Graham);
        assert!(matches!(
            "wilke".parse::<MixingRule>(),
            Err(CorrelationError::UnknownMixingRule { .. })
        ));
        assert_eq!(MixingRule::default(), MixingRule::Herning);
    }

    #[test]
    fn air_like_mixture_mw() {
        let mw = mw_mix(&[28.0134, 31.9988], &[0.79, 0.21]).unwrap();
        assert!((mw - 28.85).abs() < 0.01);
    }

    #[test]
    fn mixing_rules_agree_for_equal_components() {
        let mu = [300.0, 300.0];
        let mw = [28.0, 44.0];
        let x = [0.4, 0.6];
        assert!((mu_graham(&mu, &x).unwrap() - 300.0).abs() < 1e-12);
        assert!((mu_herning(&mu, &mw, &x).unwrap() - 300.0).abs() < 1e-12);
    }

    #[test]
    fn herning_weights_heavier_species() {
        let mu = [100.0, 200.0];
        let mw = [2.0, 44.0];
        let x = [0.5, 0.5];
        let graham = mu_graham(&mu, &x).unwrap();
        let herning = mu_herning(&mu, &mw, &x).unwrap();
        assert!(herning > graham);
    }

    #[test]
    fn unnormalized_fractions_rejected() {
        assert!(mw_mix(&[28.0, 32.0], &[0.5, 0.6]).is_err());
    }

    #[test]
    fn nitrogen_density_at_stp() {
        let rho = rhog(28.0134, 101_325.0, 273.15).unwrap();
        assert!((rho - 1.2498).abs() < 1e-3, "rho = {rho}");
    }

    #[test]
    fn slm_is_identity_at_standard_conditions() {
        let lpm = slm_to_lpm(14.0, 101.325, 273.15).unwrap();
        assert!((lpm - 14.0).abs() < 1e-12);
    }

    #[test]
    fn slm_expands_with_temperature() {
        let lpm = slm_to_lpm(14.0, 101.325, 773.0).unwrap();
        assert!((lpm - 14.0 * 773.0 / 273.15).abs() < 1e-9);
    }

    #[test]
    fn rhog_rejects_non_positive_inputs() {
        assert!(rhog(28.0, 0.0, 300.0).is_err());
        assert!(rhog(28.0, 101_325.0, -1.0).is_err());
    }
}
