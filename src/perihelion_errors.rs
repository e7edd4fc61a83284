use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerihelionError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error(
        "Kepler equation did not converge after {iterations} iterations (M = {mean_anomaly} rad, e = {eccentricity})"
    )]
    ConvergenceFailure {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },

    #[error("Invalid ephemeris parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Error while reading an elements table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for PerihelionError {
    fn eq(&self, other: &Self) -> bool {
        use PerihelionError::*;
        match (self, other) {
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (InvalidElements(a), InvalidElements(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (
                ConvergenceFailure {
                    mean_anomaly: m1,
                    eccentricity: e1,
                    iterations: i1,
                },
                ConvergenceFailure {
                    mean_anomaly: m2,
                    eccentricity: e2,
                    iterations: i2,
                },
            ) => m1 == m2 && e1 == e2 && i1 == i2,

            // foreign errors are not comparable: same variant is enough
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
