//! Transient intra-particle heat conduction.
//!
//! One-dimensional conduction from particle center (node 0) to surface (node `m - 1`) with a
//! convective surface boundary. The geometry enters through the shape factor `b`
//! (0 slab, 1 cylinder, 2 sphere):
//!
//! ```text
//! ∂T/∂t = α (∂²T/∂r² + (b/r) ∂T/∂r),   -k ∂T/∂r|R = h (T(R) - T∞),   ∂T/∂r|0 = 0
//! ```
//!
//! # Discretization
//!
//! Central differences in space and backward (implicit) Euler in time. Each step solves a
//! tridiagonal system with the Thomas algorithm. The system matrix is strictly diagonally
//! dominant with non-positive off-diagonals for any Fourier number `α·Δt/Δr²` and any Biot
//! number, so the scheme is unconditionally stable and bounded by the initial and ambient
//! temperatures; there is no time-step restriction. Every step is still checked for
//! non-finite values, which can only arise from non-finite inputs.

use bfb_core::{ensure_in_range, ensure_positive, linspace};
use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult};

/// Inputs for the transient conduction solve (SI units).
#[derive(Debug, Clone, PartialEq)]
pub struct ConductionInput {
    /// Particle diameter [m].
    pub dp: f64,
    /// Heat capacity [J/(kg K)].
    pub cp: f64,
    /// Thermal conductivity [W/(m K)].
    pub k: f64,
    /// Particle density [kg/m³].
    pub rho: f64,
    /// Surface heat transfer coefficient [W/(m² K)].
    pub h: f64,
    /// Uniform initial temperature [K].
    pub tk_init: f64,
    /// Ambient gas temperature [K].
    pub tk_inf: f64,
    /// Shape factor, 0 slab, 1 cylinder, 2 sphere.
    pub b: f64,
    /// Number of radial nodes, center to surface inclusive.
    pub m: usize,
    /// Number of time samples, including `t = 0`.
    pub nt: usize,
    /// Duration [s].
    pub t_max: f64,
}

/// One (time, position, temperature) point of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub time_s: f64,
    pub r_m: f64,
    pub tk: f64,
}

/// Temperature history on a fixed radial grid.
///
/// Computed eagerly; indexing is random-access and re-iterating is free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureProfile {
    /// Sample times [s], length `nt`.
    pub time_s: Vec<f64>,
    /// Node positions from center [m], length `m`.
    pub r_m: Vec<f64>,
    /// Temperatures [K], `tk[time][node]`.
    pub tk: Vec<Vec<f64>>,
}

impl TemperatureProfile {
    pub fn len_time(&self) -> usize {
        self.time_s.len()
    }

    pub fn len_nodes(&self) -> usize {
        self.r_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Temperature at time index `it` and node `node`.
    pub fn at(&self, it: usize, node: usize) -> Option<f64> {
        self.tk.get(it).and_then(|row| row.get(node)).copied()
    }

    /// Center-node temperature history.
    pub fn center(&self) -> Vec<f64> {
        self.tk.iter().filter_map(|row| row.first().copied()).collect()
    }

    /// All samples in time-major order.
    pub fn samples(&self) -> impl Iterator<Item = ProfileSample> + '_ {
        self.time_s
            .iter()
            .zip(&self.tk)
            .flat_map(move |(&time_s, row)| {
                self.r_m
                    .iter()
                    .zip(row)
                    .map(move |(&r_m, &tk)| ProfileSample { time_s, r_m, tk })
            })
    }

    /// First time at which the center node is within `tol` kelvin of `tk_inf`.
    pub fn time_to_reach(&self, tk_inf: f64, tol: f64) -> Option<f64> {
        self.time_s
            .iter()
            .zip(&self.tk)
            .find(|(_, row)| row.first().is_some_and(|tc| (tc - tk_inf).abs() <= tol))
            .map(|(t, _)| *t)
    }
}

/// Solve tridiagonal system `A·x = d` with the Thomas algorithm.
///
/// - `a`: sub-diagonal (a\[0\] unused)
/// - `b`: main diagonal
/// - `c`: super-diagonal (c\[n-1\] unused)
/// - `d`: right-hand side
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> CorrelationResult<Vec<f64>> {
    let n = d.len();
    if n == 0 || a.len() != n || b.len() != n || c.len() != n {
        return Err(CorrelationError::InvalidArg {
            what: "tridiagonal system dimensions",
        });
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if b[0] == 0.0 {
        return Err(CorrelationError::ConvergenceFailed {
            what: "tridiagonal pivot",
        });
    }
    c_prime[0] = c[0] / b[0];
    d_prime[0] = d[0] / b[0];

    for i in 1..n {
        let den = b[i] - a[i] * c_prime[i - 1];
        if den == 0.0 {
            return Err(CorrelationError::ConvergenceFailed {
                what: "tridiagonal pivot",
            });
        }
        if i < n - 1 {
            c_prime[i] = c[i] / den;
        }
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / den;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Solve the transient conduction problem and return the full profile.
pub fn solve_transient(input: &ConductionInput) -> CorrelationResult<TemperatureProfile> {
    let dp = ensure_positive(input.dp, "particle diameter")?;
    let cp = ensure_positive(input.cp, "heat capacity")?;
    let kc = ensure_positive(input.k, "thermal conductivity")?;
    let rho = ensure_positive(input.rho, "particle density")?;
    let h = ensure_positive(input.h, "heat transfer coefficient")?;
    let tk_init = ensure_positive(input.tk_init, "initial particle temperature")?;
    let tk_inf = ensure_positive(input.tk_inf, "ambient gas temperature")?;
    let b = ensure_in_range(input.b, 0.0, 2.0, "shape factor")?;
    let t_max = ensure_positive(input.t_max, "profile duration")?;
    let (m, nt) = (input.m, input.nt);
    if m < 2 {
        return Err(CorrelationError::InvalidArg {
            what: "at least two radial nodes are required",
        });
    }
    if nt < 2 {
        return Err(CorrelationError::InvalidArg {
            what: "at least two time samples are required",
        });
    }

    let radius = dp / 2.0;
    let dr = radius / (m - 1) as f64;
    let dt = t_max / (nt - 1) as f64;
    let alpha = kc / (rho * cp);
    let fo = alpha * dt / (dr * dr);
    let bi = h * dr / kc;

    // Matrix is time-invariant; assemble once.
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];

    diag[0] = 1.0 + 2.0 * (1.0 + b) * fo;
    sup[0] = -2.0 * (1.0 + b) * fo;

    for i in 1..m - 1 {
        let geom = b / (2.0 * i as f64);
        sub[i] = -fo * (1.0 - geom);
        diag[i] = 1.0 + 2.0 * fo;
        sup[i] = -fo * (1.0 + geom);
    }

    let last = m - 1;
    let surface_gain = 2.0 * fo * bi * (1.0 + b / (2.0 * last as f64));
    sub[last] = -2.0 * fo;
    diag[last] = 1.0 + 2.0 * fo + surface_gain;

    let time_s = linspace(0.0, t_max, nt);
    let r_m = linspace(0.0, radius, m);
    let mut tk = Vec::with_capacity(nt);
    tk.push(vec![tk_init; m]);

    for step in 1..nt {
        let mut rhs = tk[step - 1].clone();
        rhs[last] += surface_gain * tk_inf;
        let next = thomas_solve(&sub, &diag, &sup, &rhs)?;
        if next.iter().any(|v| !v.is_finite()) {
            return Err(CorrelationError::Diverged {
                what: "intra-particle temperature",
                step,
            });
        }
        tk.push(next);
    }

    Ok(TemperatureProfile { time_s, r_m, tk })
}
