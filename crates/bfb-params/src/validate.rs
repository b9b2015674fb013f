//! Parameter validation logic.

use bfb_core::numeric::MOLE_FRACTION_SUM_TOL;
use bfb_correlations::{MixingRule, Species};

use crate::schema::{BedParams, BiomassParams, CharParams, GasParams, ParameterSet, ReactorParams};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Length mismatch: {field} has {left} entries but {other} has {right}")]
    LengthMismatch {
        field: String,
        left: usize,
        other: String,
        right: usize,
    },

    #[error("Unknown species `{name}` in gas.sp")]
    UnknownSpecies { name: String },

    #[error("Unknown viscosity mixing rule `{name}` (expected `graham` or `herning`)")]
    UnknownMixingRule { name: String },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite and > 0"))
    }
}

fn fraction(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, v, "must be within [0, 1]"))
    }
}

fn sphericity(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "sphericity must be within (0, 1]"))
    }
}

/// Validate a parameter set, stopping at the first violation.
pub fn validate_parameters(params: &ParameterSet) -> Result<(), ValidationError> {
    validate_reactor(&params.reactor)?;
    validate_bed(&params.bed)?;
    validate_biomass(&params.biomass)?;
    validate_char(&params.char)?;
    validate_gas(&params.gas)?;

    if let Some(sweep) = &params.sweep {
        positive("sweep.tk_start", sweep.tk_start)?;
        positive("sweep.tk_end", sweep.tk_end)?;
        if sweep.tk_end <= sweep.tk_start {
            return Err(invalid(
                "sweep.tk_end",
                sweep.tk_end,
                "must be greater than sweep.tk_start",
            ));
        }
        if sweep.points < 2 {
            return Err(invalid("sweep.points", sweep.points, "must be at least 2"));
        }
    }

    Ok(())
}

fn validate_reactor(reactor: &ReactorParams) -> Result<(), ValidationError> {
    positive("reactor.di", reactor.di)?;
    positive("reactor.ht", reactor.ht)?;
    positive("reactor.q", reactor.q)?;
    positive("reactor.zmf", reactor.zmf)?;
    if !(reactor.ep.is_finite() && reactor.ep > 0.0 && reactor.ep < 1.0) {
        return Err(invalid("reactor.ep", reactor.ep, "void fraction must be within (0, 1)"));
    }
    if reactor.zmf > reactor.ht {
        return Err(invalid(
            "reactor.zmf",
            reactor.zmf,
            "bed height exceeds reactor height",
        ));
    }
    Ok(())
}

fn validate_bed(bed: &BedParams) -> Result<(), ValidationError> {
    positive("bed.dp", bed.dp)?;
    positive("bed.dp_min", bed.dp_min)?;
    positive("bed.dp_max", bed.dp_max)?;
    if bed.dp_min > bed.dp || bed.dp > bed.dp_max {
        return Err(invalid(
            "bed.dp",
            bed.dp,
            "must lie within [bed.dp_min, bed.dp_max]",
        ));
    }
    sphericity("bed.phi", bed.phi)?;
    positive("bed.rhos", bed.rhos)?;
    fraction("bed.fines", bed.fines)?;
    Ok(())
}

fn validate_biomass(biomass: &BiomassParams) -> Result<(), ValidationError> {
    positive("biomass.dp_mean", biomass.dp_mean)?;
    sphericity("biomass.phi", biomass.phi)?;
    positive("biomass.rho", biomass.rho)?;
    if ![0.0, 1.0, 2.0].contains(&biomass.b) {
        return Err(invalid(
            "biomass.b",
            biomass.b,
            "shape factor must be 0 (slab), 1 (cylinder) or 2 (sphere)",
        ));
    }
    positive("biomass.h", biomass.h)?;
    positive("biomass.k", biomass.k)?;
    if biomass.m < 2 {
        return Err(invalid("biomass.m", biomass.m, "at least 2 nodes are required"));
    }
    if !(biomass.mc.is_finite() && (0.0..100.0).contains(&biomass.mc)) {
        return Err(invalid("biomass.mc", biomass.mc, "must be within [0, 100)"));
    }
    if biomass.nt < 2 {
        return Err(invalid("biomass.nt", biomass.nt, "at least 2 time samples are required"));
    }
    positive("biomass.tk_init", biomass.tk_init)?;
    positive("biomass.t_max", biomass.t_max)?;
    Ok(())
}

fn validate_char(char: &CharParams) -> Result<(), ValidationError> {
    positive("char.dp", char.dp)?;
    sphericity("char.phi", char.phi)?;
    positive("char.rho", char.rho)?;
    Ok(())
}

fn validate_gas(gas: &GasParams) -> Result<(), ValidationError> {
    if gas.sp.is_empty() {
        return Err(invalid("gas.sp", "[]", "at least one species is required"));
    }
    if gas.sp.len() != gas.x.len() {
        return Err(ValidationError::LengthMismatch {
            field: "gas.sp".to_string(),
            left: gas.sp.len(),
            other: "gas.x".to_string(),
            right: gas.x.len(),
        });
    }
    species(gas)?;
    for (i, &x) in gas.x.iter().enumerate() {
        fraction(&format!("gas.x[{i}]"), x)?;
    }
    let sum: f64 = gas.x.iter().sum();
    if (sum - 1.0).abs() > MOLE_FRACTION_SUM_TOL {
        return Err(invalid("gas.x", sum, "mole fractions must sum to 1"));
    }
    positive("gas.p", gas.p)?;
    positive("gas.tk", gas.tk)?;
    mixing_rule(gas)?;
    Ok(())
}

/// Parse the species list.
pub fn species(gas: &GasParams) -> Result<Vec<Species>, ValidationError> {
    gas.sp
        .iter()
        .map(|name| {
            name.parse::<Species>()
                .map_err(|_| ValidationError::UnknownSpecies { name: name.clone() })
        })
        .collect()
}

/// Parse the mixing rule, defaulting to Herning.
pub fn mixing_rule(gas: &GasParams) -> Result<MixingRule, ValidationError> {
    match &gas.mixing {
        None => Ok(MixingRule::default()),
        Some(name) => name
            .parse::<MixingRule>()
            .map_err(|_| ValidationError::UnknownMixingRule { name: name.clone() }),
    }
}
