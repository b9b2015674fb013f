//! Parameter file schema.
//!
//! One [`ParameterSet`] describes one case. Every group rejects unknown keys so that a
//! misspelled parameter fails at load time instead of silently taking a default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseInfo>,
    pub reactor: ReactorParams,
    pub bed: BedParams,
    pub biomass: BiomassParams,
    pub char: CharParams,
    pub gas: GasParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
}

/// Descriptive labels carried into the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactor: Option<String>,
}

/// Reactor geometry and operating conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReactorParams {
    /// Inner diameter [m]
    pub di: f64,
    /// Bed void fraction at minimum fluidization [-]
    pub ep: f64,
    /// Total reactor height [m]
    pub ht: f64,
    /// Fluidizing gas flow [SLM]
    pub q: f64,
    /// Bed height at minimum fluidization [m]
    pub zmf: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BedParams {
    /// Mean particle diameter [m]
    pub dp: f64,
    pub dp_min: f64,
    pub dp_max: f64,
    /// Sphericity [-]
    pub phi: f64,
    /// Particle density [kg/m³]
    pub rhos: f64,
    /// Mass fraction of fines below 45 µm [-]
    #[serde(default)]
    pub fines: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BiomassParams {
    /// Mean particle diameter [m]
    pub dp_mean: f64,
    pub phi: f64,
    /// Particle density [kg/m³]
    pub rho: f64,
    /// Shape factor for conduction: 0 slab, 1 cylinder, 2 sphere
    pub b: f64,
    /// Convective heat transfer coefficient [W/(m² K)]
    pub h: f64,
    /// Thermal conductivity [W/(m K)]
    pub k: f64,
    /// Radial nodes from center to surface
    pub m: usize,
    /// Moisture content [% wet basis]
    pub mc: f64,
    /// Time samples for the temperature profile
    pub nt: usize,
    /// Initial particle temperature [K]
    pub tk_init: f64,
    /// Temperature profile duration [s]
    pub t_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CharParams {
    pub dp: f64,
    pub phi: f64,
    pub rho: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GasParams {
    /// Species keys, e.g. `["N2"]` or `["H2", "CO", "CO2"]`
    pub sp: Vec<String>,
    /// Mole fractions, same length as `sp`
    pub x: Vec<f64>,
    /// Pressure [Pa]
    pub p: f64,
    /// Temperature [K]
    pub tk: f64,
    /// Viscosity mixing rule (`herning` when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixing: Option<String>,
}

/// Linear gas-temperature sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SweepDef {
    pub tk_start: f64,
    pub tk_end: f64,
    pub points: usize,
}
