//! # Constants and type definitions for Perihelion
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, and
//! **type aliases** used throughout the `perihelion` library.
//!
//! ## Overview
//!
//! - Reference epochs (J2000.0 in Julian Date and Modified Julian Date)
//! - Unit conversions (degrees ↔ radians, days ↔ centuries)
//! - Gaussian gravitational constant for Keplerian mean motion
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Julian Date of J2000.0 (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (rad/day for a = 1 AU)
pub const GAUSS_GRAV: f64 = 0.01720209895;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Signed, fractional number of days elapsed since a reference epoch
pub type Days = f64;
/// Julian Date (days)
pub type JD = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
