//! # Ephemeris pipeline
//!
//! This module chains the stateless building blocks of the crate into a single query:
//!
//! ```text
//! timestamp ─▶ days since J2000 ─▶ elements at t ─▶ mean anomaly ─▶ eccentric anomaly
//!           ─▶ (true anomaly, radius) ─▶ heliocentric (x, y, z)
//! ```
//!
//! [`EphemerisParams`] collects the tunable settings (epoch convention, Kepler solver method,
//! tolerance and iteration cap) and is built through a validating builder, in the same way
//! for every entry point.
//!
//! ## Example
//!
//! ```rust
//! use perihelion::ephemeris::{Ephemeris, EphemerisParams};
//! use perihelion::planets::Planet;
//! use perihelion::time::epoch_from_gregorian;
//!
//! let params = EphemerisParams::builder()
//!     .tolerance(1e-10)
//!     .max_iterations(50)
//!     .build()
//!     .unwrap();
//! let ephem = Ephemeris::new(params);
//!
//! let epoch = epoch_from_gregorian(2024, 3, 20, 0, 0, 0).unwrap();
//! let report = ephem.position_at(&Planet::Mars.elements(), &epoch).unwrap();
//! println!("{}", report.position);
//! ```
use hifitime::Epoch;
use itertools::iproduct;
use log::{debug, warn};

use crate::{
    constants::Days,
    kepler::{anomaly_state, AnomalyState, KeplerMethod, KeplerSolver},
    orbit_type::keplerian_element::KeplerianElements,
    perihelion_errors::PerihelionError,
    ref_system::{project, HeliocentricPosition},
    time::{days_since_j2000, EpochConvention},
};

/// Configuration of an [`Ephemeris`].
///
/// Fields
/// -----------------
/// * `convention` – reference instant for day counts (see [`EpochConvention`]).
/// * `kepler` – method, tolerance (rad) and iteration cap of the Kepler solver.
///
/// Default values:
///
/// * `convention`: [`EpochConvention::Noon`]
/// * `kepler.method`: [`KeplerMethod::Newton`]
/// * `kepler.tolerance`: 1e-12 rad
/// * `kepler.max_iterations`: 30
///
/// Settings assembled without the builder are checked again by the solver, so invalid
/// values surface as [`PerihelionError::InvalidParameter`] on the first query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EphemerisParams {
    pub convention: EpochConvention,
    pub kepler: KeplerSolver,
}

impl EphemerisParams {
    /// Construct a new [`EphemerisParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`EphemerisParamsBuilder`] initialized with the defaults.
    pub fn builder() -> EphemerisParamsBuilder {
        EphemerisParamsBuilder::new()
    }
}

/// Builder for [`EphemerisParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct EphemerisParamsBuilder {
    params: EphemerisParams,
}

impl EphemerisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: EphemerisParams::default(),
        }
    }

    pub fn convention(mut self, v: EpochConvention) -> Self {
        self.params.convention = v;
        self
    }
    pub fn method(mut self, v: KeplerMethod) -> Self {
        self.params.kepler.method = v;
        self
    }
    pub fn tolerance(mut self, v: f64) -> Self {
        self.params.kepler.tolerance = v;
        self
    }
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.params.kepler.max_iterations = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Errors
    /// ------
    /// * [`PerihelionError::InvalidParameter`] if the tolerance is not a finite positive
    ///   number or the iteration cap is zero.
    pub fn build(self) -> Result<EphemerisParams, PerihelionError> {
        self.params.kepler.validate()?;
        Ok(self.params)
    }
}

/// Position of one body at one instant, with the intermediate anomalies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReport {
    pub days_since_j2000: Days,
    pub anomalies: AnomalyState,
    pub position: HeliocentricPosition,
}

/// Stateless front end of the position pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeris {
    params: EphemerisParams,
}

impl Ephemeris {
    pub fn new(params: EphemerisParams) -> Self {
        Ephemeris { params }
    }

    pub fn params(&self) -> &EphemerisParams {
        &self.params
    }

    /// Heliocentric position of `elements` at `t` days since the reference instant.
    ///
    /// Secular rates attached to the elements are applied before the Kepler solve.
    pub fn position_at_days(
        &self,
        elements: &KeplerianElements,
        t: Days,
    ) -> Result<PositionReport, PerihelionError> {
        let current = elements.at(t)?;

        let anomalies = anomaly_state(&current, t, &self.params.kepler).inspect_err(|err| {
            warn!("position solve failed at t = {t}: {err}");
        })?;

        let position = project(
            anomalies.radius,
            anomalies.true_anomaly,
            current.periapsis_argument,
            current.ascending_node_longitude,
            current.inclination,
        );

        debug!(
            "t = {t:.6} d: M = {:.9}, E = {:.9} ({} it.), v = {:.9}, r = {:.9} → {position}",
            anomalies.mean_anomaly,
            anomalies.eccentric_anomaly,
            anomalies.iterations,
            anomalies.true_anomaly,
            anomalies.radius
        );

        Ok(PositionReport {
            days_since_j2000: t,
            anomalies,
            position,
        })
    }

    /// Heliocentric position of `elements` at a calendar timestamp (UTC).
    pub fn position_at(
        &self,
        elements: &KeplerianElements,
        epoch: &Epoch,
    ) -> Result<PositionReport, PerihelionError> {
        self.position_at_days(elements, days_since_j2000(epoch, self.params.convention))
    }

    /// Positions of several bodies at several instants.
    ///
    /// Results are returned in body-major order: all epochs of the first body, then all
    /// epochs of the second, and so on. A failure for one pair does not stop the others.
    pub fn positions<'a, S: AsRef<str>>(
        &self,
        bodies: &'a [(S, KeplerianElements)],
        epochs: &[Epoch],
    ) -> Vec<(&'a str, Epoch, Result<PositionReport, PerihelionError>)> {
        iproduct!(bodies.iter(), epochs.iter())
            .map(|((name, elements), epoch)| {
                (name.as_ref(), *epoch, self.position_at(elements, epoch))
            })
            .collect()
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::{constants::RADEG, time::epoch_from_gregorian};
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults() {
        let params = EphemerisParams::builder().build().unwrap();
        assert_eq!(params, EphemerisParams::default());
        assert_eq!(params.kepler, KeplerSolver::default());
        assert_eq!(params.convention, EpochConvention::Noon);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            EphemerisParams::builder().tolerance(0.0).build(),
            Err(PerihelionError::InvalidParameter(
                "tolerance must be finite and > 0".into()
            ))
        );
        assert!(EphemerisParams::builder()
            .tolerance(f64::NAN)
            .build()
            .is_err());
        assert_eq!(
            EphemerisParams::builder().max_iterations(0).build(),
            Err(PerihelionError::InvalidParameter(
                "max_iterations must be >= 1".into()
            ))
        );

        let params = EphemerisParams::builder()
            .method(KeplerMethod::FixedPoint)
            .convention(EpochConvention::Midnight)
            .max_iterations(200)
            .build()
            .unwrap();
        assert_eq!(params.kepler.method, KeplerMethod::FixedPoint);
        assert_eq!(params.kepler.max_iterations, 200);
        assert_eq!(params.convention, EpochConvention::Midnight);
    }

    #[test]
    fn test_params_without_builder_are_checked() {
        let params = EphemerisParams {
            kepler: KeplerSolver {
                max_iterations: 0,
                ..KeplerSolver::default()
            },
            ..EphemerisParams::default()
        };
        let elements = KeplerianElements::new(0.0, 1.0, 0.1, 0.0, 0.0, 0.0, 0.0).unwrap();

        assert_eq!(
            Ephemeris::new(params).position_at_days(&elements, 10.0),
            Err(PerihelionError::InvalidParameter(
                "max_iterations must be >= 1".into()
            ))
        );
    }

    #[test]
    fn test_circular_equatorial_position() {
        let elements = KeplerianElements::new(0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let ephem = Ephemeris::default();

        let quarter = elements.orbital_period() / 4.0;
        let report = ephem.position_at_days(&elements, quarter).unwrap();

        assert_relative_eq!(report.anomalies.radius, 2.0);
        assert_relative_eq!(report.anomalies.true_anomaly, 90.0 * RADEG, epsilon = 1e-9);
        assert_relative_eq!(report.position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(report.position.y, 2.0, epsilon = 1e-9);
        assert_eq!(report.position.z, 0.0);
    }

    #[test]
    fn test_position_at_epoch_matches_days() {
        let elements =
            KeplerianElements::from_degrees(0.0, 1.5, 0.2, 10.0, 30.0, 60.0, 45.0).unwrap();
        let ephem = Ephemeris::default();
        let epoch = epoch_from_gregorian(2010, 6, 1, 6, 0, 0).unwrap();

        let from_epoch = ephem.position_at(&elements, &epoch).unwrap();
        let from_days = ephem
            .position_at_days(&elements, days_since_j2000(&epoch, EpochConvention::Noon))
            .unwrap();
        assert_eq!(from_epoch, from_days);
    }

    #[test]
    fn test_convention_shifts_half_day() {
        let elements =
            KeplerianElements::from_degrees(0.0, 1.0, 0.1, 1.0, 2.0, 3.0, 4.0).unwrap();
        let epoch = epoch_from_gregorian(2005, 1, 1, 0, 0, 0).unwrap();

        let noon = Ephemeris::default().position_at(&elements, &epoch).unwrap();
        let midnight = Ephemeris::new(
            EphemerisParams::builder()
                .convention(EpochConvention::Midnight)
                .build()
                .unwrap(),
        )
        .position_at(&elements, &epoch)
        .unwrap();

        assert_relative_eq!(
            midnight.days_since_j2000 - noon.days_since_j2000,
            0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_positions_batch_order_and_errors() {
        let good = KeplerianElements::from_degrees(0.0, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0).unwrap();
        let drifting = good.clone().with_rates(crate::orbit_type::ElementRates {
            eccentricity: 1e-3,
            ..Default::default()
        });
        let bodies = vec![("good", good), ("drifting", drifting)];
        let epochs = [
            epoch_from_gregorian(2000, 1, 1, 12, 0, 0).unwrap(),
            epoch_from_gregorian(2010, 1, 1, 12, 0, 0).unwrap(),
        ];

        let results = Ephemeris::default().positions(&bodies, &epochs);
        let names: Vec<&str> = results.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names, vec!["good", "good", "drifting", "drifting"]);
        assert_eq!(results[1].1, epochs[1]);

        assert!(results[0].2.is_ok());
        assert!(results[1].2.is_ok());
        assert!(results[2].2.is_ok());
        // e = 0.5 + 1e-3 · 3653 days leaves the elliptical domain
        assert!(matches!(
            results[3].2,
            Err(PerihelionError::InvalidElements(_))
        ));
    }
}
