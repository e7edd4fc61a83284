//! # Anomaly solver
//!
//! Mean anomaly propagation, iterative solution of Kepler's equation for elliptical orbits,
//! and the conversion from eccentric anomaly to true anomaly and heliocentric distance.
//!
//! All angles are in **radians** and normalized to `[0, 2π)` on output.
//!
//! ```rust
//! use perihelion::kepler::{mean_anomaly, solve_eccentric_anomaly, true_anomaly_and_radius};
//!
//! let m = mean_anomaly(6.214, 0.017202, 100.0);
//! let sol = solve_eccentric_anomaly(m, 0.0167).unwrap();
//! let (v, r) = true_anomaly_and_radius(sol.eccentric_anomaly, 1.0, 0.0167);
//! assert!(r > 0.98 && r < 1.02);
//! # let _ = v;
//! ```
use log::{trace, warn};
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::{
    constants::{AstronomicalUnit, Days, Radian, DPI},
    orbit_type::keplerian_element::KeplerianElements,
    perihelion_errors::PerihelionError,
};

/// Eccentricity above which Newton starts from `E₀ = π` instead of `E₀ = M`.
const HIGH_ECCENTRICITY: f64 = 0.8;

/// Principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    let r = a.rem_euclid(DPI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Signed difference `a − b` reduced to [-π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Mean anomaly at time `t`, `M = M0 + n·t`, normalized to `[0, 2π)`.
///
/// Arguments
/// ---------
/// * `m0`: mean anomaly at the reference epoch (rad)
/// * `n`: mean motion (rad/day)
/// * `t`: time elapsed since the reference epoch (days, may be negative)
pub fn mean_anomaly(m0: Radian, n: f64, t: Days) -> Radian {
    principal_angle(m0 + n * t)
}

/// Inverse of Kepler's equation: `M = E − e·sin E`, normalized to `[0, 2π)`.
pub fn eccentric_to_mean_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    principal_angle(eccentric_anomaly - eccentricity * eccentric_anomaly.sin())
}

/// Iteration scheme used to solve Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeplerMethod {
    /// Newton–Raphson on `f(E) = E − e·sin E − M`.
    #[default]
    Newton,
    /// Fixed-point iteration `E_{k+1} = M + e·sin E_k`. Slow for large eccentricities.
    FixedPoint,
}

/// Converged eccentric anomaly and the number of iterations used to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: Radian,
    pub iterations: usize,
}

/// Settings of the iterative Kepler solver.
///
/// Defaults: Newton method, tolerance `1e-12` rad on successive iterates, 30 iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub method: KeplerMethod,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            method: KeplerMethod::Newton,
            tolerance: 1e-12,
            max_iterations: 30,
        }
    }
}

impl KeplerSolver {
    /// Check the solver settings: finite positive tolerance and at least one iteration.
    pub fn validate(&self) -> Result<(), PerihelionError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PerihelionError::InvalidParameter(
                "tolerance must be finite and > 0".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(PerihelionError::InvalidParameter(
                "max_iterations must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Solve `E − e·sin E = M` for the eccentric anomaly `E`.
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly`: mean anomaly `M` (rad), any value; it is first reduced to `[0, 2π)`
    /// * `eccentricity`: `e ∈ [0, 1)`
    ///
    /// Return
    /// ------
    /// * a [`KeplerSolution`] with `E ∈ [0, 2π)`
    ///
    /// Errors
    /// ------
    /// * [`PerihelionError::InvalidParameter`] if the settings fail [`KeplerSolver::validate`]
    /// * [`PerihelionError::InvalidElements`] if `e ∉ [0, 1)` or `M` is not finite
    /// * [`PerihelionError::ConvergenceFailure`] if `|E_{k+1} − E_k|` is still above the
    ///   tolerance after `max_iterations` updates
    pub fn solve(
        &self,
        mean_anomaly: Radian,
        eccentricity: f64,
    ) -> Result<KeplerSolution, PerihelionError> {
        self.validate()?;
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(PerihelionError::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {eccentricity}"
            )));
        }
        if !mean_anomaly.is_finite() {
            return Err(PerihelionError::InvalidElements(format!(
                "mean anomaly must be finite, got {mean_anomaly}"
            )));
        }

        let m = principal_angle(mean_anomaly);

        let mut ecc_anom = match self.method {
            KeplerMethod::Newton if eccentricity >= HIGH_ECCENTRICITY => PI,
            _ => m,
        };

        for iteration in 1..=self.max_iterations {
            let next = match self.method {
                KeplerMethod::Newton => {
                    let f = ecc_anom - eccentricity * ecc_anom.sin() - m;
                    let fp = 1.0 - eccentricity * ecc_anom.cos();
                    ecc_anom - f / fp
                }
                KeplerMethod::FixedPoint => m + eccentricity * ecc_anom.sin(),
            };

            let step = (next - ecc_anom).abs();
            ecc_anom = next;

            if step < self.tolerance {
                trace!("Kepler solve converged: M = {m}, e = {eccentricity}, iterations = {iteration}");
                return Ok(KeplerSolution {
                    eccentric_anomaly: principal_angle(ecc_anom),
                    iterations: iteration,
                });
            }
        }

        warn!(
            "Kepler solve ({:?}) did not converge in {} iterations for M = {m}, e = {eccentricity}",
            self.method, self.max_iterations
        );
        Err(PerihelionError::ConvergenceFailure {
            mean_anomaly: m,
            eccentricity,
            iterations: self.max_iterations,
        })
    }
}

/// Solve Kepler's equation with the default [`KeplerSolver`].
pub fn solve_eccentric_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
) -> Result<KeplerSolution, PerihelionError> {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

/// True anomaly and heliocentric distance from the eccentric anomaly.
///
/// `r = a·(1 − e·cos E)` and `v = atan2(√(1−e²)·sin E, cos E − e)`, with `v ∈ [0, 2π)`.
pub fn true_anomaly_and_radius(
    eccentric_anomaly: Radian,
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
) -> (Radian, AstronomicalUnit) {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    let radius = semi_major_axis * (1.0 - eccentricity * cos_e);
    let true_anomaly = ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity);
    (principal_angle(true_anomaly), radius)
}

/// Position in the orbital plane, x axis towards perihelion.
pub fn orbital_plane_position(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> Vector3<f64> {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    Vector3::new(
        semi_major_axis * (cos_e - eccentricity),
        semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt() * sin_e,
        0.0,
    )
}

/// Anomalies and distance of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyState {
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
    pub radius: AstronomicalUnit,
    /// Iterations spent in the Kepler solve.
    pub iterations: usize,
}

/// Chain mean anomaly → eccentric anomaly → (true anomaly, radius) for `elements` at `t`.
///
/// `elements` must already be evaluated at `t` if they carry secular rates
/// (see [`KeplerianElements::at`]); the mean anomaly is propagated here from the elements'
/// reference epoch.
pub fn anomaly_state(
    elements: &KeplerianElements,
    t: Days,
    solver: &KeplerSolver,
) -> Result<AnomalyState, PerihelionError> {
    let m = mean_anomaly(
        elements.mean_anomaly,
        elements.mean_motion,
        t - elements.reference_epoch,
    );
    let solution = solver.solve(m, elements.eccentricity)?;
    let (v, r) = true_anomaly_and_radius(
        solution.eccentric_anomaly,
        elements.semi_major_axis,
        elements.eccentricity,
    );

    Ok(AnomalyState {
        mean_anomaly: m,
        eccentric_anomaly: solution.eccentric_anomaly,
        true_anomaly: v,
        radius: r,
        iterations: solution.iterations,
    })
}
