//! Geldart powder classification.

use std::fmt;

use bfb_core::ensure_positive;
use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult};

/// Geldart fluidization group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeldartGroup {
    /// Cohesive powders.
    C,
    /// Aeratable powders, bubble-free expansion above Umf.
    A,
    /// Sand-like powders, bubble at Umf.
    B,
    /// Spoutable, large or dense particles.
    D,
}

impl fmt::Display for GeldartGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GeldartGroup::C => "C",
            GeldartGroup::A => "A",
            GeldartGroup::B => "B",
            GeldartGroup::D => "D",
        };
        f.write_str(s)
    }
}

/// Classify a powder from mean diameter [m] and gas/particle densities [kg/m³].
///
/// Boundaries in the chart's units (µm, g/cm³): B/D at `Δρ·dp² = 1e6`, A/B at
/// `Δρ·dp = 225`, and C below 30 µm.
pub fn geldart_group(dp: f64, rhog: f64, rhos: f64) -> CorrelationResult<GeldartGroup> {
    let dp = ensure_positive(dp, "particle diameter")?;
    let rhog = ensure_positive(rhog, "gas density")?;
    let rhos = ensure_positive(rhos, "particle density")?;
    if rhos <= rhog {
        return Err(CorrelationError::NonPhysical {
            what: "particle density must exceed gas density",
            value: rhos - rhog,
        });
    }

    let dp_um = dp * 1e6;
    let drho_gcc = (rhos - rhog) * 1e-3;

    let group = if drho_gcc * dp_um * dp_um >= 1e6 {
        GeldartGroup::D
    } else if drho_gcc * dp_um >= 225.0 {
        GeldartGroup::B
    } else if dp_um < 30.0 {
        GeldartGroup::C
    } else {
        GeldartGroup::A
    };
    Ok(group)
}
