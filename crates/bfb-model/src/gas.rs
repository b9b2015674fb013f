//! Gas properties for a pure gas or an N-component mixture.

use bfb_core::units::{
    Density, DynVisc, Pressure, Temperature, k, kg_m3, micropoise, pa, pa_s, to_micropoise,
};
use bfb_correlations::{Composition, MixingRule, Species, gas};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Gas state at the reactor pressure and temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GasStateSi", from = "GasStateSi")]
pub struct GasState {
    /// Species keys, in input order.
    pub species: Vec<String>,
    /// Mole fractions, parallel to `species`.
    pub x: Vec<f64>,
    /// Viscosity mixing rule, `None` for a pure gas.
    pub mixing: Option<MixingRule>,
    /// Molecular weight [g/mol].
    pub mw: f64,
    pub p: Pressure,
    pub tk: Temperature,
    pub rho: Density,
    pub mu: DynVisc,
}

impl GasState {
    /// Evaluate the gas state.
    ///
    /// A single species uses its own molecular weight and viscosity. Mixtures weight the
    /// molecular weight by mole fraction and combine viscosities with `rule`. Density is
    /// ideal-gas in both cases.
    pub fn evaluate(
        composition: &Composition,
        rule: MixingRule,
        p_pa: f64,
        tk: f64,
    ) -> ModelResult<Self> {
        if composition.is_empty() {
            return Err(ModelError::Configuration {
                message: "gas composition is empty".to_string(),
            });
        }
        if !(p_pa.is_finite() && p_pa > 0.0) {
            return Err(ModelError::Configuration {
                message: format!("gas pressure must be positive, got {p_pa}"),
            });
        }
        if !(tk.is_finite() && tk > 0.0) {
            return Err(ModelError::Configuration {
                message: format!("gas temperature must be positive, got {tk}"),
            });
        }

        let (mw, mu_si, mixing) = match composition.is_pure() {
            Some(sp) => (sp.molar_mass(), viscosity_pa_s(sp, tk), None),
            None => {
                let x = composition.fractions();
                let mws: Vec<f64> = composition.iter().map(|(sp, _)| sp.molar_mass()).collect();
                let mus: Vec<f64> = composition
                    .iter()
                    .map(|(sp, _)| viscosity_pa_s(sp, tk))
                    .collect();
                let mw = gas::mw_mix(&mws, &x).map_err(ModelError::configuration)?;
                let mu = gas::mu_mix(rule, &mus, &mws, &x).map_err(ModelError::configuration)?;
                (mw, mu, Some(rule))
            }
        };

        let rho = gas::rhog(mw, p_pa, tk)?;
        if !(mu_si.is_finite() && mu_si > 0.0) {
            return Err(ModelError::Configuration {
                message: format!("gas viscosity is non-physical at {tk} K: {mu_si} Pa·s"),
            });
        }

        Ok(Self {
            species: composition.iter().map(|(sp, _)| sp.key().to_string()).collect(),
            x: composition.fractions(),
            mixing,
            mw,
            p: pa(p_pa),
            tk: k(tk),
            rho: kg_m3(rho),
            mu: pa_s(mu_si),
        })
    }

    /// Evaluate from species keys and mole fractions as written in a parameter file.
    pub fn from_keys(
        sp: &[String],
        x: &[f64],
        mixing: Option<&str>,
        p_pa: f64,
        tk: f64,
    ) -> ModelResult<Self> {
        let species = sp
            .iter()
            .map(|name| name.parse::<Species>())
            .collect::<Result<Vec<_>, _>>()?;
        let rule = match mixing {
            Some(name) => name.parse::<MixingRule>()?,
            None => MixingRule::default(),
        };
        // Composition errors are input errors, not geometry.
        let composition =
            Composition::from_parallel(&species, x).map_err(ModelError::configuration)?;
        Self::evaluate(&composition, rule, p_pa, tk)
    }

    pub fn p_pa(&self) -> f64 {
        self.p.value
    }

    pub fn tk_k(&self) -> f64 {
        self.tk.value
    }

    pub fn rho_kg_m3(&self) -> f64 {
        self.rho.value
    }

    pub fn mu_pa_s(&self) -> f64 {
        self.mu.value
    }

    pub fn mu_micropoise(&self) -> f64 {
        to_micropoise(self.mu)
    }
}

fn viscosity_pa_s(species: Species, tk: f64) -> f64 {
    micropoise(species.viscosity_micropoise(tk)).value
}

/// Plain SI representation used for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GasStateSi {
    species: Vec<String>,
    x: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mixing: Option<MixingRule>,
    mw: f64,
    p_pa: f64,
    tk: f64,
    rho_kg_m3: f64,
    mu_pa_s: f64,
}

impl From<GasState> for GasStateSi {
    fn from(g: GasState) -> Self {
        Self {
            p_pa: g.p.value,
            tk: g.tk.value,
            rho_kg_m3: g.rho.value,
            mu_pa_s: g.mu.value,
            species: g.species,
            x: g.x,
            mixing: g.mixing,
            mw: g.mw,
        }
    }
}

impl From<GasStateSi> for GasState {
    fn from(g: GasStateSi) -> Self {
        Self {
            species: g.species,
            x: g.x,
            mixing: g.mixing,
            mw: g.mw,
            p: pa(g.p_pa),
            tk: k(g.tk),
            rho: kg_m3(g.rho_kg_m3),
            mu: pa_s(g.mu_pa_s),
        }
    }
}
