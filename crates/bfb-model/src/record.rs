//! Per-case result record.

use serde::{Deserialize, Serialize};

use crate::gas::GasState;
use crate::particle::{BedResult, BiomassResult, ParticleResult, Population};
use crate::sweep::TemperatureSweep;

/// Reactor-level quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorResult {
    /// Cross-sectional area [m²]
    pub ac: f64,
    /// Superficial gas velocity at reactor conditions [m/s]
    pub us: f64,
    /// Transport disengaging height, Chan [m]
    pub tdh_chan: f64,
    /// Transport disengaging height, Horio [m]
    pub tdh_horio: f64,
    /// Expanded bed height using Ergun Umf [m]
    pub zexp_ergun: f64,
    /// Expanded bed height using Wen-Yu Umf [m]
    pub zexp_wenyu: f64,
}

/// Everything computed for one case. Built once by the solver, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub case_id: String,
    pub gas: GasState,
    pub bed: BedResult,
    pub biomass: BiomassResult,
    pub char: ParticleResult,
    pub bfb: ReactorResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<TemperatureSweep>,
}

impl ResultRecord {
    /// Velocities of each population, labelled.
    pub fn populations(&self) -> [(Population, &ParticleResult); 3] {
        [
            (Population::Bed, &self.bed.particle),
            (Population::Biomass, &self.biomass.particle),
            (Population::Char, &self.char),
        ]
    }

    /// True when every population's velocities are finite.
    pub fn all_finite(&self) -> bool {
        self.populations().iter().all(|(_, p)| p.is_finite())
    }
}
