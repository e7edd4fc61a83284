//! # Keplerian orbital elements
//!
//! This module defines [`KeplerianElements`], the classical element set of an **elliptical**
//! orbit around the Sun:
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless, `0 ≤ e < 1`)
//! 3. **i** – Inclination to the ecliptic (radians)
//! 4. **Ω** – Longitude of the ascending node (radians)
//! 5. **ω** – Argument of perihelion (radians)
//! 6. **M** – Mean anomaly at the reference epoch (radians)
//!
//! together with the reference epoch (days since J2000), the mean motion `n` (rad/day) and the
//! optional [`ElementRates`] used by [`KeplerianElements::at`].
//!
//! Derived quantities:
//!
//! - longitude of perihelion `ϖ = Ω + ω`
//! - mean longitude `L = M + ϖ`
//! - perihelion distance `q = a(1 − e)`, aphelion distance `Q = a(1 + e)`
//! - orbital period `P = 2π / n`
//! - time of perihelion `T = epoch − M / n`
//!
//! ## Example
//!
//! ```rust
//! use perihelion::orbit_type::keplerian_element::KeplerianElements;
//!
//! // Earth-like orbit, degrees at the boundary
//! let kep = KeplerianElements::from_degrees(0.0, 1.0, 0.016709, 0.0, 0.0, 282.9404, 356.0470)
//!     .unwrap();
//! assert!((kep.orbital_period() - 365.25).abs() < 0.1);
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Days, Degree, Radian, DPI, GAUSS_GRAV, RADEG},
    kepler::principal_angle,
    orbit_type::ElementRates,
    perihelion_errors::PerihelionError,
};

/// Keplerian orbital elements of an elliptical heliocentric orbit.
///
/// Units
/// -----
/// * `reference_epoch`: days since J2000.
/// * `semi_major_axis`: Astronomical Units (AU).
/// * `eccentricity`: unitless, in `[0, 1)`.
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `periapsis_argument`: radians (ω).
/// * `mean_anomaly`: radians (M at `reference_epoch`).
/// * `mean_motion`: radians per day.
/// * `rates`: secular drift of `a, e, i, Ω, ω`.
///
/// Angles are always stored in radians; use [`KeplerianElements::from_degrees`] to build
/// from degree-valued tables.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct KeplerianElements {
    pub reference_epoch: Days,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: Radian,
    pub mean_motion: f64,
    #[serde(default)]
    pub rates: ElementRates,
}

/// Keplerian mean motion `k / a^{3/2}` (rad/day) for a heliocentric orbit of semi-major
/// axis `a` (AU), neglecting the body's mass.
pub fn keplerian_mean_motion(semi_major_axis: AstronomicalUnit) -> f64 {
    GAUSS_GRAV / semi_major_axis.powf(1.5)
}

impl KeplerianElements {
    /// Build and validate an element set from radian-valued angles.
    ///
    /// The mean motion is set to the Keplerian value [`keplerian_mean_motion`] and no secular
    /// rates are attached.
    ///
    /// Errors
    /// ------
    /// * [`PerihelionError::InvalidElements`] if `e ∉ [0, 1)`, `a ≤ 0`, or any value is not finite.
    pub fn new(
        reference_epoch: Days,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
    ) -> Result<Self, PerihelionError> {
        let elements = KeplerianElements {
            reference_epoch,
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude: principal_angle(ascending_node_longitude),
            periapsis_argument: principal_angle(periapsis_argument),
            mean_anomaly: principal_angle(mean_anomaly),
            mean_motion: keplerian_mean_motion(semi_major_axis),
            rates: ElementRates::default(),
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Same as [`KeplerianElements::new`] with angles given in degrees.
    pub fn from_degrees(
        reference_epoch: Days,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
    ) -> Result<Self, PerihelionError> {
        Self::new(
            reference_epoch,
            semi_major_axis,
            eccentricity,
            inclination * RADEG,
            ascending_node_longitude * RADEG,
            periapsis_argument * RADEG,
            mean_anomaly * RADEG,
        )
    }

    /// Build from the longitude-based element set used by planetary tables
    /// `(a, e, i, L, ϖ, Ω)`, all angles in radians.
    ///
    /// The argument of perihelion is `ω = ϖ − Ω` and the mean anomaly `M = L − ϖ`, both
    /// reduced to `[0, 2π)`.
    pub fn from_longitudes(
        reference_epoch: Days,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Radian,
        mean_longitude: Radian,
        longitude_of_perihelion: Radian,
        ascending_node_longitude: Radian,
    ) -> Result<Self, PerihelionError> {
        Self::new(
            reference_epoch,
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            longitude_of_perihelion - ascending_node_longitude,
            mean_longitude - longitude_of_perihelion,
        )
    }

    /// Replace the Keplerian mean motion by an explicit value (rad/day).
    pub fn with_mean_motion(mut self, mean_motion: f64) -> Result<Self, PerihelionError> {
        self.mean_motion = mean_motion;
        self.validate()?;
        Ok(self)
    }

    /// Attach secular rates.
    pub fn with_rates(mut self, rates: ElementRates) -> Self {
        self.rates = rates;
        self
    }

    /// Check the invariants of an elliptical element set.
    ///
    /// Domain errors on `e` and `a` take precedence over non-finite values.
    pub fn validate(&self) -> Result<(), PerihelionError> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(PerihelionError::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(PerihelionError::InvalidElements(format!(
                "semi-major axis must be positive, got {}",
                self.semi_major_axis
            )));
        }

        let values = [
            ("reference_epoch", self.reference_epoch),
            ("semi_major_axis", self.semi_major_axis),
            ("inclination", self.inclination),
            ("ascending_node_longitude", self.ascending_node_longitude),
            ("periapsis_argument", self.periapsis_argument),
            ("mean_anomaly", self.mean_anomaly),
            ("mean_motion", self.mean_motion),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PerihelionError::InvalidElements(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.mean_motion <= 0.0 {
            return Err(PerihelionError::InvalidElements(format!(
                "mean motion must be positive, got {}",
                self.mean_motion
            )));
        }
        Ok(())
    }

    /// Elements evaluated at `t` (days since J2000) by linear drift of `a, e, i, Ω, ω`.
    ///
    /// The reference epoch, mean anomaly and mean motion are kept: the mean anomaly at `t` is
    /// obtained from them by [`crate::kepler::mean_anomaly`].
    ///
    /// Errors
    /// ------
    /// * [`PerihelionError::InvalidElements`] if the drifted elements leave the elliptical
    ///   domain (e.g. a table used far outside its validity interval).
    pub fn at(&self, t: Days) -> Result<KeplerianElements, PerihelionError> {
        if self.rates.is_zero() {
            return Ok(self.clone());
        }

        let dt = t - self.reference_epoch;
        let rates = &self.rates;

        let drifted = KeplerianElements {
            semi_major_axis: self.semi_major_axis + rates.semi_major_axis * dt,
            eccentricity: self.eccentricity + rates.eccentricity * dt,
            inclination: self.inclination + rates.inclination * dt,
            ascending_node_longitude: principal_angle(
                self.ascending_node_longitude + rates.ascending_node_longitude * dt,
            ),
            periapsis_argument: principal_angle(
                self.periapsis_argument + rates.periapsis_argument * dt,
            ),
            ..self.clone()
        };
        drifted.validate()?;
        Ok(drifted)
    }

    /// Longitude of perihelion `ϖ = Ω + ω`, in `[0, 2π)`.
    pub fn longitude_of_perihelion(&self) -> Radian {
        principal_angle(self.ascending_node_longitude + self.periapsis_argument)
    }

    /// Mean longitude at the reference epoch, `L = M + ϖ`, in `[0, 2π)`.
    pub fn mean_longitude(&self) -> Radian {
        principal_angle(self.mean_anomaly + self.longitude_of_perihelion())
    }

    pub fn perihelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Orbital period in days.
    pub fn orbital_period(&self) -> Days {
        DPI / self.mean_motion
    }

    /// Last perihelion passage at or before the reference epoch (days since J2000).
    pub fn time_of_perihelion(&self) -> Days {
        self.reference_epoch - self.mean_anomaly / self.mean_motion
    }
}

impl fmt::Display for KeplerianElements {
    /// Degrees for angles, with the derived distances and period.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deg = |angle: Radian| angle / RADEG;

        writeln!(f, "Elliptical orbit, epoch J2000 {:+.6} d", self.reference_epoch)?;
        writeln!(
            f,
            "  a = {:.8} AU   e = {:.8}   i = {:.6}°",
            self.semi_major_axis,
            self.eccentricity,
            deg(self.inclination)
        )?;
        writeln!(
            f,
            "  Ω = {:.6}°   ω = {:.6}°   M = {:.6}°",
            deg(self.ascending_node_longitude),
            deg(self.periapsis_argument),
            deg(self.mean_anomaly)
        )?;
        writeln!(
            f,
            "  q = {:.8} AU   Q = {:.8} AU",
            self.perihelion_distance(),
            self.aphelion_distance()
        )?;
        write!(
            f,
            "  n = {:.9}°/d   P = {:.4} d",
            deg(self.mean_motion),
            self.orbital_period()
        )?;
        if !self.rates.is_zero() {
            write!(f, "   (secular rates attached)")?;
        }
        Ok(())
    }
}
