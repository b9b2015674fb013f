//! Gas species table: molecular weight and viscosity coefficients.

use std::fmt;

use crate::error::CorrelationError;

/// Gas species available as fluidizing or product gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Hydrogen (H₂)
    H2,
    /// Carbon monoxide (CO)
    CO,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Methane (CH₄)
    CH4,
    /// Water vapor (H₂O)
    H2O,
    /// Argon (Ar)
    Ar,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::N2,
        Species::O2,
        Species::H2,
        Species::CO,
        Species::CO2,
        Species::CH4,
        Species::H2O,
        Species::Ar,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::H2 => "H2",
            Species::CO => "CO",
            Species::CO2 => "CO2",
            Species::CH4 => "CH4",
            Species::H2O => "H2O",
            Species::Ar => "Ar",
        }
    }

    /// Molecular weight [g/mol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::N2 => 28.0134,
            Species::O2 => 31.9988,
            Species::H2 => 2.01588,
            Species::CO => 28.0101,
            Species::CO2 => 44.0095,
            Species::CH4 => 16.0425,
            Species::H2O => 18.0153,
            Species::Ar => 39.948,
        }
    }

    /// Yaws viscosity coefficients `(A, B, C)` for `mu = A + B*T + C*T^2` in µP.
    fn viscosity_coefficients(&self) -> (f64, f64, f64) {
        match self {
            Species::N2 => (42.606, 4.75e-1, -9.88e-5),
            Species::O2 => (44.224, 5.62e-1, -1.13e-4),
            Species::H2 => (27.758, 2.12e-1, -3.28e-5),
            Species::CO => (23.811, 5.3944e-1, -1.5411e-4),
            Species::CO2 => (11.811, 4.9838e-1, -1.0851e-4),
            Species::CH4 => (3.844, 4.0112e-1, -1.4303e-4),
            Species::H2O => (-36.826, 4.29e-1, -1.62e-5),
            Species::Ar => (44.997, 6.3892e-1, -1.2455e-4),
        }
    }

    /// Gas viscosity [µP] at temperature `tk` [K].
    pub fn viscosity_micropoise(&self, tk: f64) -> f64 {
        let (a, b, c) = self.viscosity_coefficients();
        a + b * tk + c * tk * tk
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = CorrelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N2" | "NITROGEN" => Ok(Species::N2),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CO),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "H2O" | "WATER" | "STEAM" => Ok(Species::H2O),
            "AR" | "ARGON" => Ok(Species::Ar),
            _ => Err(CorrelationError::UnknownSpecies {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("n2".parse::<Species>().unwrap(), Species::N2);
        assert_eq!("Carbon Dioxide".parse::<Species>().unwrap(), Species::CO2);
        assert_eq!("steam".parse::<Species>().unwrap(), Species::H2O);
    }

    #[test]
    fn unknown_species_names_input() {
        let err = "Xe".parse::<Species>().unwrap_err();
        assert!(err.to_string().contains("Xe"));
    }

    #[test]
    fn canonical_key_roundtrip() {
        for species in Species::ALL {
            let parsed = species
                .key()
                .parse::<Species>()
                .expect("canonical key should parse");
            assert_eq!(parsed, species);
        }
    }

    #[test]
    fn nitrogen_viscosity_near_reference() {
        // ~178 µP at 300 K, ~355 µP at 773 K
        let mu_300 = Species::N2.viscosity_micropoise(300.0);
        let mu_773 = Species::N2.viscosity_micropoise(773.0);
        assert!((mu_300 - 178.0).abs() < 5.0, "mu_300 = {mu_300}");
        assert!((mu_773 - 350.0).abs() < 15.0, "mu_773 = {mu_773}");
    }

    #[test]
    fn viscosity_increases_with_temperature() {
        for species in Species::ALL {
            let lo = species.viscosity_micropoise(400.0);
            let hi = species.viscosity_micropoise(900.0);
            assert!(hi > lo, "{species}: {lo} !< {hi}");
        }
    }
}
