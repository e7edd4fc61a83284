//! # Epoch conversions
//!
//! Conversion of calendar timestamps into the signed, fractional day counts consumed by the
//! anomaly solver. All timestamps are interpreted on the **UTC** scale in the proleptic
//! Gregorian calendar, through [`hifitime::Epoch`].
//!
//! The reference instant is selected with [`EpochConvention`]:
//!
//! - [`EpochConvention::Noon`] (default): J2000.0, 2000-01-01T12:00:00 UTC = JD 2451545.0.
//! - [`EpochConvention::Midnight`]: 2000-01-01T00:00:00 UTC, half a day earlier.
//!
//! Orbital elements and day offsets must be produced with the same convention.
use hifitime::{Epoch, Unit};
use std::str::FromStr;

use crate::{
    constants::{Days, DAYS_PER_CENTURY, J2000_JD, JD, JDTOMJD, MJD},
    perihelion_errors::PerihelionError,
};

/// Reference instant used when counting days since J2000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpochConvention {
    /// 2000-01-01T12:00:00 UTC (JD 2451545.0), the standard J2000.0 epoch.
    #[default]
    Noon,
    /// 2000-01-01T00:00:00 UTC (JD 2451544.5).
    Midnight,
}

impl EpochConvention {
    /// Julian Date of the reference instant.
    pub fn reference_jd(&self) -> JD {
        match self {
            EpochConvention::Noon => J2000_JD,
            EpochConvention::Midnight => J2000_JD - 0.5,
        }
    }
}

/// Signed fractional number of days between `epoch` and the reference instant.
///
/// Argument
/// --------
/// * `epoch`: the timestamp, read on the UTC scale
/// * `convention`: the reference instant
///
/// Return
/// ------
/// * days since the reference, negative before it
pub fn days_since_j2000(epoch: &Epoch, convention: EpochConvention) -> Days {
    epoch.to_jde_utc_days() - convention.reference_jd()
}

/// Largest day offset accepted by the conversions, ±3 million years.
pub const MAX_ABS_DAYS: Days = 30_000.0 * DAYS_PER_CENTURY;

fn check_day_offset(days: Days) -> Result<Days, PerihelionError> {
    if !days.is_finite() {
        return Err(PerihelionError::InvalidTimestamp(format!(
            "day offset must be finite, got {days}"
        )));
    }
    if days.abs() > MAX_ABS_DAYS {
        return Err(PerihelionError::InvalidTimestamp(format!(
            "day offset {days} outside ±{MAX_ABS_DAYS} days"
        )));
    }
    Ok(days)
}

/// Inverse of [`days_since_j2000`].
///
/// Errors
/// ------
/// * [`PerihelionError::InvalidTimestamp`] if `days` is not finite or beyond [`MAX_ABS_DAYS`]
pub fn epoch_from_days_since_j2000(
    days: Days,
    convention: EpochConvention,
) -> Result<Epoch, PerihelionError> {
    let days = check_day_offset(days)?;
    Ok(Epoch::from_jde_utc(days + convention.reference_jd()))
}

/// Julian centuries elapsed since the reference, from a day count.
pub fn centuries_since_j2000(days: Days) -> f64 {
    days / DAYS_PER_CENTURY
}

/// Build a UTC epoch from calendar components.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: Gregorian calendar date
/// * `hour`, `minute`, `second`: time of day (UTC)
///
/// Return
/// ------
/// * the [`Epoch`], or [`PerihelionError::InvalidTimestamp`] if any component is out of range
pub fn epoch_from_gregorian(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<Epoch, PerihelionError> {
    Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0).map_err(|err| {
        PerihelionError::InvalidTimestamp(format!(
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}: {err}"
        ))
    })
}

/// Parse an ISO 8601 timestamp (`YYYY-MM-DDTHH:MM:SS`, UTC unless a time scale is given).
pub fn parse_epoch(date: &str) -> Result<Epoch, PerihelionError> {
    Epoch::from_str(date.trim())
        .map_err(|err| PerihelionError::InvalidTimestamp(format!("{date}: {err}")))
}

/// Parse an ISO 8601 timestamp and return its offset in days from the reference.
pub fn days_since_j2000_from_str(
    date: &str,
    convention: EpochConvention,
) -> Result<Days, PerihelionError> {
    Ok(days_since_j2000(&parse_epoch(date)?, convention))
}

/// Transformation from a Julian Date (UTC) to days since the reference.
///
/// The Julian Date must be finite and within [`MAX_ABS_DAYS`] of the reference.
pub fn jd_to_days_since_j2000(jd: JD, convention: EpochConvention) -> Result<Days, PerihelionError> {
    if !jd.is_finite() {
        return Err(PerihelionError::InvalidTimestamp(format!(
            "Julian Date must be finite, got {jd}"
        )));
    }
    check_day_offset(jd - convention.reference_jd())
}

/// Transformation from a Modified Julian Date (UTC) to days since the reference.
pub fn mjd_to_days_since_j2000(
    mjd: MJD,
    convention: EpochConvention,
) -> Result<Days, PerihelionError> {
    jd_to_days_since_j2000(mjd + JDTOMJD, convention)
}

/// Transformation from date in the format YYYY MM DD.FFFFF (UTC) to days since the reference
///
/// Argument
/// --------
/// * `date_str`: a string representing the date in the format YYYY MM DD.FFFFF in the UTC frame
/// * `convention`: the reference instant
///
/// Return
/// ------
/// * a float representing the input date in days since the reference
pub fn frac_date_to_days_since_j2000(
    date_str: &str,
    convention: EpochConvention,
) -> Result<Days, PerihelionError> {
    let invalid = |reason: &str| PerihelionError::InvalidTimestamp(format!("{date_str}: {reason}"));

    let parts: Vec<&str> = date_str.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(invalid("expected format YYYY MM DD.FFFFF"));
    }

    let year = i32::from_str(parts[0]).map_err(|_| invalid("invalid year"))?;
    let month = u8::from_str(parts[1]).map_err(|_| invalid("invalid month"))?;
    let day_fraction = f64::from_str(parts[2]).map_err(|_| invalid("invalid fractional day"))?;

    if !day_fraction.is_finite() || !(1.0..32.0).contains(&day_fraction) {
        return Err(invalid("fractional day out of range"));
    }

    // Separation of day and fraction day
    let day = day_fraction.trunc() as u8;
    let fraction = day_fraction.fract();

    let start_of_day = epoch_from_gregorian(year, month, day, 0, 0, 0)?;
    let epoch = start_of_day + Unit::Day * fraction;

    Ok(days_since_j2000(&epoch, convention))
}
