//! # perihelion
//!
//! Heliocentric positions of bodies on elliptical orbits from their Keplerian elements.
//!
//! Crate layout:
//!
//! - [`time`] – timestamps to days since J2000 (noon or midnight convention).
//! - [`kepler`] – mean anomaly, Kepler's equation solvers, true anomaly and radius.
//! - [`orbit_type`] – validated Keplerian element sets and their secular rates.
//! - [`ref_system`] – rotation from the orbital plane to heliocentric ecliptic coordinates.
//! - [`ephemeris`] – the full pipeline, configured through [`ephemeris::EphemerisParams`].
//! - [`planets`] – mean elements of the eight major planets.
//! - [`elements_table`] – CSV tables of named element sets.
pub mod constants;
pub mod elements_table;
pub mod ephemeris;
pub mod kepler;
pub mod orbit_type;
pub mod perihelion_errors;
pub mod planets;
pub mod ref_system;
pub mod time;
