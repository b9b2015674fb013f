//! Fluidization and terminal velocities for one particle population.

use bfb_correlations::{
    ConductionInput, GeldartGroup, TemperatureProfile, fluidization, geldart_group, pyrolysis,
    solve_transient,
};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::gas::GasState;

/// Center-to-ambient tolerance for the reference heating time [K].
pub const T_REF_TOLERANCE_K: f64 = 1.0;

/// Particle population within the reactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Population {
    Bed,
    Biomass,
    Char,
}

impl Population {
    pub fn label(self) -> &'static str {
        match self {
            Population::Bed => "bed",
            Population::Biomass => "biomass",
            Population::Char => "char",
        }
    }
}

/// Geometry of one particle population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Diameter [m]
    pub dp: f64,
    /// Sphericity [-]
    pub phi: f64,
    /// Particle density [kg/m³]
    pub rho: f64,
}

impl Particle {
    fn check(&self) -> ModelResult<()> {
        if !(self.dp.is_finite() && self.dp > 0.0) {
            return Err(geometry("dp", self.dp));
        }
        if !(self.phi.is_finite() && self.phi > 0.0 && self.phi <= 1.0) {
            return Err(geometry("phi", self.phi));
        }
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(geometry("rho", self.rho));
        }
        Ok(())
    }
}

fn geometry(what: &str, value: f64) -> ModelError {
    ModelError::InvalidGeometry {
        what: what.to_string(),
        value,
    }
}

/// Velocities common to every population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleResult {
    /// Minimum fluidization velocity, Ergun [m/s]
    pub umf_ergun: f64,
    /// Minimum fluidization velocity, Wen-Yu [m/s]
    pub umf_wenyu: f64,
    /// Terminal velocity, Ganser [m/s]
    pub ut_ganser: f64,
    /// Terminal velocity, Haider-Levenspiel [m/s]
    pub ut_haider: f64,
    pub us_umf_ergun: f64,
    pub us_umf_wenyu: f64,
    pub us_ut_ganser: f64,
    pub us_ut_haider: f64,
}

impl ParticleResult {
    /// Evaluate both Umf and both Ut variants against superficial velocity `us`.
    ///
    /// `ep` is the bed void fraction at minimum fluidization.
    pub fn evaluate(particle: &Particle, ep: f64, gas: &GasState, us: f64) -> ModelResult<Self> {
        particle.check()?;
        if !(ep.is_finite() && ep > 0.0 && ep < 1.0) {
            return Err(geometry("ep", ep));
        }

        let mu = gas.mu_pa_s();
        let rhog = gas.rho_kg_m3();
        let Particle { dp, phi, rho } = *particle;

        let umf_ergun = fluidization::umf_ergun(dp, ep, mu, phi, rhog, rho)?;
        let umf_wenyu = fluidization::umf_wenyu(dp, mu, rhog, rho)?;
        let ut_ganser = fluidization::ut_ganser(dp, mu, phi, rhog, rho)?;
        let ut_haider = fluidization::ut_haider(dp, mu, phi, rhog, rho)?;

        Ok(Self {
            umf_ergun,
            umf_wenyu,
            ut_ganser,
            ut_haider,
            us_umf_ergun: us / umf_ergun,
            us_umf_wenyu: us / umf_wenyu,
            us_ut_ganser: us / ut_ganser,
            us_ut_haider: us / ut_haider,
        })
    }

    /// True when every velocity and ratio is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.umf_ergun,
            self.umf_wenyu,
            self.ut_ganser,
            self.ut_haider,
            self.us_umf_ergun,
            self.us_umf_wenyu,
            self.us_ut_ganser,
            self.us_ut_haider,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Bed material: velocities plus bubbling onset and powder class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedResult {
    #[serde(flatten)]
    pub particle: ParticleResult,
    /// Minimum bubbling velocity [m/s]
    pub umb: f64,
    /// `umb / umf_wenyu`, never below one
    pub umb_umf: f64,
    pub geldart: GeldartGroup,
}

impl BedResult {
    pub fn evaluate(
        particle: &Particle,
        ep: f64,
        fines: f64,
        gas: &GasState,
        us: f64,
    ) -> ModelResult<Self> {
        let velocities = ParticleResult::evaluate(particle, ep, gas, us)?;
        let ratio = fluidization::umb_umf_abrahamsen(
            particle.dp,
            gas.mu_pa_s(),
            gas.rho_kg_m3(),
            particle.rho,
            fines,
        )?;
        // A bed cannot bubble before it fluidizes.
        let umb_umf = ratio.max(1.0);
        let geldart = geldart_group(particle.dp, gas.rho_kg_m3(), particle.rho)?;

        Ok(Self {
            umb: umb_umf * velocities.umf_wenyu,
            umb_umf,
            geldart,
            particle: velocities,
        })
    }
}

/// Thermal inputs of the biomass population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomassThermal {
    /// Shape factor, 0 slab, 1 cylinder, 2 sphere
    pub b: f64,
    /// Surface heat transfer coefficient [W/(m² K)]
    pub h: f64,
    /// Thermal conductivity [W/(m K)]
    pub k: f64,
    pub m: usize,
    /// Moisture content [% wet basis]
    pub mc: f64,
    pub nt: usize,
    pub tk_init: f64,
    pub t_max: f64,
}

/// Biomass: velocities, devolatilization time and intra-particle heating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassResult {
    #[serde(flatten)]
    pub particle: ParticleResult,
    /// Devolatilization time at the gas temperature [s]
    pub t_devol: f64,
    /// First time the particle center is within 1 K of the gas temperature [s]
    pub t_ref: Option<f64>,
    /// Heat capacity used for the conduction solve [J/(kg K)]
    pub cp: f64,
    #[serde(default, skip_serializing_if = "TemperatureProfile::is_empty")]
    pub profile: TemperatureProfile,
}

impl BiomassResult {
    /// Evaluate the biomass population.
    ///
    /// With `with_profile` unset the conduction solve is skipped, leaving `t_ref` empty.
    pub fn evaluate(
        particle: &Particle,
        thermal: &BiomassThermal,
        ep: f64,
        gas: &GasState,
        us: f64,
        with_profile: bool,
    ) -> ModelResult<Self> {
        let velocities = ParticleResult::evaluate(particle, ep, gas, us)?;
        let tk_gas = gas.tk_k();
        let t_devol = pyrolysis::devol_time(particle.dp * 1000.0, tk_gas)?;
        let cp = pyrolysis::cp_wood(thermal.mc, thermal.tk_init)?;

        let (t_ref, profile) = if with_profile {
            let input = ConductionInput {
                dp: particle.dp,
                cp,
                k: thermal.k,
                rho: particle.rho,
                h: thermal.h,
                tk_init: thermal.tk_init,
                tk_inf: tk_gas,
                b: thermal.b,
                m: thermal.m,
                nt: thermal.nt,
                t_max: thermal.t_max,
            };
            let profile = solve_transient(&input)?;
            (profile.time_to_reach(tk_gas, T_REF_TOLERANCE_K), profile)
        } else {
            (None, TemperatureProfile::default())
        };

        Ok(Self {
            particle: velocities,
            t_devol,
            t_ref,
            cp,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfb_correlations::{Composition, MixingRule, Species};

    fn n2() -> GasState {
        GasState::evaluate(&Composition::pure(Species::N2), MixingRule::Herning, 101_325.0, 773.0)
            .unwrap()
    }

    fn sand() -> Particle {
        Particle {
            dp: 0.0004,
            phi: 0.86,
            rho: 2600.0,
        }
    }

    fn thermal() -> BiomassThermal {
        BiomassThermal {
            b: 2.0,
            h: 350.0,
            k: 0.12,
            m: 20,
            mc: 8.0,
            nt: 500,
            tk_init: 293.0,
            t_max: 10.0,
        }
    }

    #[test]
    fn sand_velocities_match_reference_values() {
        let r = ParticleResult::evaluate(&sand(), 0.46, &n2(), 0.3363).unwrap();
        assert!((r.umf_ergun - 0.1024).abs() < 2e-3);
        assert!((r.umf_wenyu - 0.0702).abs() < 2e-3);
        assert!((r.ut_haider - 3.04).abs() < 0.05);
        assert!((r.ut_ganser - 2.92).abs() < 0.05);
        assert_eq!(r.us_umf_ergun, 0.3363 / r.umf_ergun);
        assert!(r.is_finite());
    }

    #[test]
    fn sphericity_above_one_is_invalid_geometry() {
        let mut p = sand();
        p.phi = 1.2;
        let err = ParticleResult::evaluate(&p, 0.46, &n2(), 0.3).unwrap_err();
        assert!(matches!(err, ModelError::InvalidGeometry { ref what, .. } if what == "phi"));
    }

    #[test]
    fn zero_porosity_is_invalid_geometry() {
        let err = ParticleResult::evaluate(&sand(), 0.0, &n2(), 0.3).unwrap_err();
        assert!(matches!(err, ModelError::InvalidGeometry { ref what, .. } if what == "ep"));
    }

    #[test]
    fn bed_bubbles_no_earlier_than_it_fluidizes() {
        let bed = BedResult::evaluate(&sand(), 0.46, 0.0, &n2(), 0.3363).unwrap();
        assert!(bed.umb_umf >= 1.0);
        assert!((bed.umb - bed.umb_umf * bed.particle.umf_wenyu).abs() < 1e-15);
        assert_eq!(bed.geldart, GeldartGroup::B);
    }

    #[test]
    fn biomass_heats_to_gas_temperature() {
        let wood = Particle {
            dp: 0.0005,
            phi: 0.8,
            rho: 540.0,
        };
        let r = BiomassResult::evaluate(&wood, &thermal(), 0.46, &n2(), 0.3363, true).unwrap();
        assert!(r.t_devol > 0.0);
        assert_eq!(r.profile.len_time(), 500);
        assert_eq!(r.profile.len_nodes(), 20);
        let t_ref = r.t_ref.unwrap();
        assert!(t_ref > 0.0 && t_ref <= 10.0);
    }

    #[test]
    fn biomass_without_profile_has_no_reference_time() {
        let wood = Particle {
            dp: 0.0005,
            phi: 0.8,
            rho: 540.0,
        };
        let r = BiomassResult::evaluate(&wood, &thermal(), 0.46, &n2(), 0.3363, false).unwrap();
        assert!(r.profile.is_empty());
        assert!(r.t_ref.is_none());
        assert!(r.t_devol > 0.0);
    }

    #[test]
    fn population_labels() {
        assert_eq!(Population::Biomass.label(), "biomass");
    }
}
