//! # Orbital element representations
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element) — Classical elements
//!   `(a, e, i, Ω, ω, M)` of an elliptical orbit at a reference epoch, with their mean motion.
//! - [`ElementRates`] — secular (linear) drift of the slow elements, used to evaluate mean
//!   elements away from their reference epoch.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Angles: **radians**
//! - Time: **days** since J2000 (see [`crate::time::EpochConvention`])
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, DAYS_PER_CENTURY, RADEG};

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Secular rates of change of the slow orbital elements.
///
/// Units
/// -----
/// * `semi_major_axis`: AU/day
/// * `eccentricity`: 1/day
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`: rad/day
///
/// The mean anomaly is not listed: its rate is the element set's mean motion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRates {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node_longitude: f64,
    pub periapsis_argument: f64,
}

impl ElementRates {
    /// Build rates from per-century values, angles in degrees per century.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis`: AU/century
    /// * `eccentricity`: 1/century
    /// * `inclination`, `ascending_node_longitude`, `periapsis_argument`: deg/century
    pub fn from_century_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
    ) -> Self {
        ElementRates {
            semi_major_axis: semi_major_axis / DAYS_PER_CENTURY,
            eccentricity: eccentricity / DAYS_PER_CENTURY,
            inclination: inclination * RADEG / DAYS_PER_CENTURY,
            ascending_node_longitude: ascending_node_longitude * RADEG / DAYS_PER_CENTURY,
            periapsis_argument: periapsis_argument * RADEG / DAYS_PER_CENTURY,
        }
    }

    /// `true` when every rate is exactly zero (osculating, non-drifting elements).
    pub fn is_zero(&self) -> bool {
        *self == ElementRates::default()
    }
}

#[cfg(test)]
mod element_rates_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_century_degrees() {
        let rates = ElementRates::from_century_degrees(36525.0, 0.36525, 180.0, -36525.0, 0.0);
        assert_relative_eq!(rates.semi_major_axis, 1.0);
        assert_relative_eq!(rates.eccentricity, 1e-5, max_relative = 1e-12);
        assert_relative_eq!(
            rates.inclination,
            std::f64::consts::PI / 36525.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(rates.ascending_node_longitude, -RADEG, max_relative = 1e-12);
        assert_eq!(rates.periapsis_argument, 0.0);
        assert!(!rates.is_zero());
        assert!(ElementRates::default().is_zero());
    }
}
