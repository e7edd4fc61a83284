//! # Elements tables
//!
//! Reader for CSV tables of named mean elements in the longitude form used by planetary
//! tables. The header must name the columns; column order is free.
//!
//! Required columns (angles in degrees, `a` in AU):
//!
//! `name, semi_major_axis, eccentricity, inclination, mean_longitude,
//! longitude_of_perihelion, ascending_node_longitude`
//!
//! Optional columns:
//!
//! * `reference_epoch` – days since J2000 (default `0.0`)
//! * `<element>_rate` for each of the six elements above – change per Julian century
//!   (AU, unitless or degrees). When `mean_longitude_rate` is given the mean motion is
//!   `L̇ − ϖ̇`, otherwise the Keplerian mean motion of `a` is used.
//!
//! Lines starting with `#` are ignored.
//!
//! ```text
//! name,semi_major_axis,eccentricity,inclination,mean_longitude,longitude_of_perihelion,ascending_node_longitude
//! Ceres,2.7675,0.0758,10.594,153.94,153.26,80.305
//! ```
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

use crate::{
    constants::{Days, DAYS_PER_CENTURY, RADEG},
    orbit_type::{keplerian_element::KeplerianElements, ElementRates},
    perihelion_errors::PerihelionError,
};

/// An element set with the name it was listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedElements {
    pub name: String,
    pub elements: KeplerianElements,
}

#[derive(Debug, Deserialize)]
struct ElementsRecord {
    name: String,
    #[serde(default)]
    reference_epoch: Option<Days>,
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    mean_longitude: f64,
    longitude_of_perihelion: f64,
    ascending_node_longitude: f64,
    #[serde(default)]
    semi_major_axis_rate: Option<f64>,
    #[serde(default)]
    eccentricity_rate: Option<f64>,
    #[serde(default)]
    inclination_rate: Option<f64>,
    #[serde(default)]
    mean_longitude_rate: Option<f64>,
    #[serde(default)]
    longitude_of_perihelion_rate: Option<f64>,
    #[serde(default)]
    ascending_node_longitude_rate: Option<f64>,
}

impl ElementsRecord {
    fn into_named(self) -> Result<NamedElements, PerihelionError> {
        match self.to_elements() {
            Ok(elements) => Ok(NamedElements {
                name: self.name,
                elements,
            }),
            Err(PerihelionError::InvalidElements(msg)) => Err(PerihelionError::InvalidElements(
                format!("{}: {msg}", self.name),
            )),
            Err(other) => Err(other),
        }
    }

    fn to_elements(&self) -> Result<KeplerianElements, PerihelionError> {
        let elements = KeplerianElements::from_longitudes(
            self.reference_epoch.unwrap_or(0.0),
            self.semi_major_axis,
            self.eccentricity,
            self.inclination * RADEG,
            self.mean_longitude * RADEG,
            self.longitude_of_perihelion * RADEG,
            self.ascending_node_longitude * RADEG,
        )?;

        let node_rate = self.ascending_node_longitude_rate.unwrap_or(0.0);
        let peri_rate = self.longitude_of_perihelion_rate.unwrap_or(0.0);
        let rates = ElementRates::from_century_degrees(
            self.semi_major_axis_rate.unwrap_or(0.0),
            self.eccentricity_rate.unwrap_or(0.0),
            self.inclination_rate.unwrap_or(0.0),
            node_rate,
            peri_rate - node_rate,
        );

        let elements = match self.mean_longitude_rate {
            Some(l_rate) => {
                elements.with_mean_motion((l_rate - peri_rate) * RADEG / DAYS_PER_CENTURY)?
            }
            None => elements,
        };

        Ok(elements.with_rates(rates))
    }
}

/// Read every element set of a CSV table.
///
/// Errors
/// ------
/// * [`PerihelionError::CsvError`] for malformed CSV or missing/non-numeric columns.
/// * [`PerihelionError::InvalidElements`] (prefixed by the row name) for rows outside the
///   elliptical domain.
pub fn read_elements_csv<R: Read>(reader: R) -> Result<Vec<NamedElements>, PerihelionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    rdr.deserialize::<ElementsRecord>()
        .map(|record| record?.into_named())
        .collect()
}

/// Read every element set of a CSV file.
pub fn read_elements_csv_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<NamedElements>, PerihelionError> {
    read_elements_csv(File::open(path)?)
}

#[cfg(test)]
mod elements_table_test {
    use super::*;
    use crate::planets::Planet;
    use approx::assert_relative_eq;

    const HEADER: &str = "name,semi_major_axis,eccentricity,inclination,mean_longitude,longitude_of_perihelion,ascending_node_longitude";

    #[test]
    fn test_read_without_rates() {
        let data = format!("{HEADER}\n# dwarf planet\nCeres, 2.7675, 0.0758, 10.594, 153.94, 153.26, 80.305\n");
        let table = read_elements_csv(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        let ceres = &table[0];
        assert_eq!(ceres.name, "Ceres");
        assert_relative_eq!(ceres.elements.semi_major_axis, 2.7675);
        assert_relative_eq!(
            ceres.elements.mean_anomaly / RADEG,
            153.94 - 153.26,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            ceres.elements.mean_motion,
            crate::orbit_type::keplerian_element::keplerian_mean_motion(2.7675)
        );
        assert!(ceres.elements.rates.is_zero());
    }

    #[test]
    fn test_read_with_rates_matches_catalogue() {
        let data = "\
name,semi_major_axis,eccentricity,inclination,mean_longitude,longitude_of_perihelion,ascending_node_longitude,semi_major_axis_rate,eccentricity_rate,inclination_rate,mean_longitude_rate,longitude_of_perihelion_rate,ascending_node_longitude_rate
Mars,1.52371034,0.09339410,1.84969142,-4.55343205,-23.94362959,49.55953891,0.00001847,0.00007882,-0.00813131,19140.30268499,0.44441088,-0.29257343
";
        let table = read_elements_csv(data.as_bytes()).unwrap();
        let mars = &table[0].elements;
        let expected = Planet::Mars.elements();

        assert_relative_eq!(mars.mean_motion, expected.mean_motion, max_relative = 1e-12);
        assert_relative_eq!(mars.mean_anomaly, expected.mean_anomaly, epsilon = 1e-12);
        assert_relative_eq!(
            mars.periapsis_argument,
            expected.periapsis_argument,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            mars.rates.periapsis_argument,
            expected.rates.periapsis_argument,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            mars.rates.eccentricity,
            expected.rates.eccentricity,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_reject_hyperbolic_row() {
        let data = format!("{HEADER}\nOumuamua,-1.27,1.2,122.7,0.0,241.8,24.6\n");
        let err = read_elements_csv(data.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            PerihelionError::InvalidElements(
                "Oumuamua: eccentricity must be in [0, 1), got 1.2".into()
            )
        );
    }

    #[test]
    fn test_reject_negative_axis_row() {
        let data = format!("{HEADER}\nCeres,2.7675,0.0758,10.594,153.94,153.26,80.305\nBroken,-2.0,0.1,1.0,0.0,0.0,0.0\n");
        assert_eq!(
            read_elements_csv(data.as_bytes()),
            Err(PerihelionError::InvalidElements(
                "Broken: semi-major axis must be positive, got -2".into()
            ))
        );
    }

    #[test]
    fn test_malformed_csv() {
        let data = format!("{HEADER}\nBad,abc,0.1,0,0,0,0\n");
        assert!(matches!(
            read_elements_csv(data.as_bytes()),
            Err(PerihelionError::CsvError(_))
        ));

        let missing_column = "name,semi_major_axis\nX,1.0\n";
        assert!(matches!(
            read_elements_csv(missing_column.as_bytes()),
            Err(PerihelionError::CsvError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_elements_csv_file("does/not/exist.csv"),
            Err(PerihelionError::IoError(_))
        ));
    }
}
