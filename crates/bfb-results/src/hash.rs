//! Content hash of a parameter set.

use bfb_params::ParameterSet;
use sha2::{Digest, Sha256};

/// SHA-256 of the canonical JSON form of `params` and the solver version.
pub fn compute_params_hash(params: &ParameterSet, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let params_json = serde_json::to_string(params).unwrap_or_default();
    hasher.update(params_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfb_params::schema::*;

    fn params(tk: f64) -> ParameterSet {
        ParameterSet {
            case: None,
            reactor: ReactorParams {
                di: 0.05,
                ep: 0.46,
                ht: 0.5,
                q: 14.0,
                zmf: 0.1,
            },
            bed: BedParams {
                dp: 0.0004,
                dp_min: 0.0003,
                dp_max: 0.0005,
                phi: 0.86,
                rhos: 2600.0,
                fines: 0.0,
                sample_desc: None,
                sample_id: None,
            },
            biomass: BiomassParams {
                dp_mean: 0.0005,
                phi: 0.8,
                rho: 540.0,
                b: 2.0,
                h: 350.0,
                k: 0.12,
                m: 20,
                mc: 8.0,
                nt: 100,
                tk_init: 293.0,
                t_max: 10.0,
                sample_desc: None,
                sample_id: None,
            },
            char: CharParams {
                dp: 0.0002,
                phi: 0.8,
                rho: 300.0,
            },
            gas: GasParams {
                sp: vec!["N2".into()],
                x: vec![1.0],
                p: 101_325.0,
                tk,
                mixing: None,
            },
            sweep: None,
        }
    }

    #[test]
    fn hash_stability() {
        let a = compute_params_hash(&params(773.0), "0.1.0");
        let b = compute_params_hash(&params(773.0), "0.1.0");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = compute_params_hash(&params(773.0), "0.1.0");
        let b = compute_params_hash(&params(800.0), "0.1.0");
        let c = compute_params_hash(&params(773.0), "0.2.0");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
