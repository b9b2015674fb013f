use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Tolerance on the sum of mole fractions.
pub const MOLE_FRACTION_SUM_TOL: Real = 1e-6;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NonPositive { what, value: v })
    }
}

/// Finite and inside the closed interval `[min, max]`.
pub fn ensure_in_range(
    v: Real,
    min: Real,
    max: Real,
    what: &'static str,
) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// Endpoints are exact. `n == 1` yields `[start]`, `n == 0` an empty vector.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + step * i as Real
                    }
                })
                .collect()
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_monotonic(start in -1e3_f64..1e3, span in 1e-3_f64..1e3, n in 2_usize..200) {
            let v = linspace(start, start + span, n);
            prop_assert_eq!(v.len(), n);
            for w in v.windows(2) {
                prop_assert!(w[1] > w[0]);
            }
        }
    }
}
