//! Steady-state property pipeline for bubbling fluidized bed cases.
//!
//! Provides:
//! - Gas state for pure gases and mixtures
//! - Per-population fluidization and terminal velocities
//! - Biomass devolatilization time and intra-particle heating profile
//! - Reactor-level superficial velocity, bed expansion and TDH
//! - Optional gas-temperature sweep

pub mod error;
pub mod gas;
pub mod particle;
pub mod record;
pub mod solver;
pub mod sweep;

pub use error::{ModelError, ModelResult};
pub use gas::GasState;
pub use particle::{
    BedResult, BiomassResult, BiomassThermal, Particle, ParticleResult, Population,
    T_REF_TOLERANCE_K,
};
pub use record::{ReactorResult, ResultRecord};
pub use solver::{SolveOptions, cross_section, solve_case, superficial_velocity};
pub use sweep::{SweepFailure, SweepPoint, TemperatureSweep, run_temperature_sweep};
