//! bfb-correlations: physical-property correlations for bubbling fluidized beds.
//!
//! Provides:
//! - Gas species table (molecular weight, Yaws viscosity polynomials)
//! - Composition handling (pure gases and mixtures)
//! - Mixture rules, ideal-gas density, standard-to-actual flow conversion
//! - Minimum fluidization, minimum bubbling, and terminal velocities
//! - Bed expansion and transport disengaging height
//! - Devolatilization time and wood heat capacity
//! - Implicit transient intra-particle heat conduction
//!
//! Every function is pure and takes SI inputs unless its documentation says otherwise.
//!
//! # Example
//!
//! ```
//! use bfb_correlations::{fluidization, gas, Species};
//!
//! let mw = Species::N2.molar_mass();
//! let rhog = gas::rhog(mw, 101_325.0, 773.0).unwrap();
//! let mu = Species::N2.viscosity_micropoise(773.0) * 1e-7;
//! let umf = fluidization::umf_ergun(0.0004, 0.46, mu, 0.86, rhog, 2600.0).unwrap();
//! assert!(umf > 0.0);
//! ```

pub mod composition;
pub mod conduction;
pub mod error;
pub mod expansion;
pub mod fluidization;
pub mod gas;
pub mod geldart;
pub mod pyrolysis;
pub mod species;

// Re-exports for ergonomics
pub use composition::Composition;
pub use conduction::{ConductionInput, ProfileSample, TemperatureProfile, solve_transient};
pub use error::{CorrelationError, CorrelationResult};
pub use gas::MixingRule;
pub use geldart::{GeldartGroup, geldart_group};
pub use species::Species;
