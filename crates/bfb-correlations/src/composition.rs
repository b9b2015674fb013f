//! Gas composition (pure or mixture).

use bfb_core::numeric::MOLE_FRACTION_SUM_TOL;

use crate::error::{CorrelationError, CorrelationResult};
use crate::species::Species;

/// Gas composition defined by mole fractions.
///
/// Unlike a normalizing constructor, the fractions are taken as given: they must already
/// sum to one within [`MOLE_FRACTION_SUM_TOL`].
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    items: Vec<(Species, f64)>,
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(species: Species) -> Self {
        Self {
            items: vec![(species, 1.0)],
        }
    }

    /// Create a composition from parallel species and mole-fraction slices.
    pub fn from_parallel(species: &[Species], fractions: &[f64]) -> CorrelationResult<Self> {
        if species.len() != fractions.len() {
            return Err(CorrelationError::InvalidArg {
                what: "species and mole fractions differ in length",
            });
        }
        Self::new_mole_fractions(species.iter().copied().zip(fractions.iter().copied()).collect())
    }

    /// Create a composition from mole fractions.
    ///
    /// Every fraction must be finite and in `[0, 1]`, and the sum must be one.
    pub fn new_mole_fractions(fractions: Vec<(Species, f64)>) -> CorrelationResult<Self> {
        if fractions.is_empty() {
            return Err(CorrelationError::InvalidArg {
                what: "empty composition",
            });
        }

        let mut sum = 0.0;
        for (_, frac) in &fractions {
            if !frac.is_finite() || !(0.0..=1.0).contains(frac) {
                return Err(CorrelationError::OutOfRange {
                    what: "mole fraction",
                    value: *frac,
                });
            }
            sum += frac;
        }

        if (sum - 1.0).abs() > MOLE_FRACTION_SUM_TOL {
            return Err(CorrelationError::OutOfRange {
                what: "sum of mole fractions",
                value: sum,
            });
        }

        Ok(Self { items: fractions })
    }

    /// Get mole fraction of a species (0.0 if not present).
    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.items
            .iter()
            .filter(|(s, _)| *s == species)
            .map(|(_, f)| *f)
            .sum()
    }

    /// `Some(species)` when the composition holds a single species.
    pub fn is_pure(&self) -> Option<Species> {
        match self.items.as_slice() {
            [(species, _)] => Some(*species),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over species in input order.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.items.iter().copied()
    }

    pub fn species(&self) -> Vec<Species> {
        self.items.iter().map(|(s, _)| *s).collect()
    }

    pub fn fractions(&self) -> Vec<f64> {
        self.items.iter().map(|(_, f)| *f).collect()
    }
}
