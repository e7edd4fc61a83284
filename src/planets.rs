//! Mean orbital elements of the major planets.
//!
//! Values from the JPL table *Keplerian Elements for Approximate Positions of the Major
//! Planets* (E. M. Standish), valid from 1800 AD to 2050 AD, referred to the mean ecliptic
//! and equinox of J2000. "Earth" is the Earth–Moon barycentre.
use std::fmt;
use std::str::FromStr;

use crate::{
    constants::{DAYS_PER_CENTURY, RADEG},
    kepler::principal_angle,
    orbit_type::{keplerian_element::KeplerianElements, ElementRates},
    perihelion_errors::PerihelionError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// One row of the table: `(a, e, I, L, ϖ, Ω)` at J2000 and their rates per Julian century.
/// Angles in degrees, `a` in AU.
struct MeanElements {
    values: [f64; 6],
    rates: [f64; 6],
}

const MERCURY: MeanElements = MeanElements {
    values: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    rates: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};

const VENUS: MeanElements = MeanElements {
    values: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    rates: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};

const EARTH: MeanElements = MeanElements {
    values: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rates: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

const MARS: MeanElements = MeanElements {
    values: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    rates: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};

const JUPITER: MeanElements = MeanElements {
    values: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
    rates: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
};

const SATURN: MeanElements = MeanElements {
    values: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
    rates: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};

const URANUS: MeanElements = MeanElements {
    values: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
    rates: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
};

const NEPTUNE: MeanElements = MeanElements {
    values: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
    rates: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
};

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    fn table(&self) -> &'static MeanElements {
        match self {
            Planet::Mercury => &MERCURY,
            Planet::Venus => &VENUS,
            Planet::Earth => &EARTH,
            Planet::Mars => &MARS,
            Planet::Jupiter => &JUPITER,
            Planet::Saturn => &SATURN,
            Planet::Uranus => &URANUS,
            Planet::Neptune => &NEPTUNE,
        }
    }

    /// Mean elements at J2000.0 (noon convention) with their secular rates.
    ///
    /// The mean motion is the table's mean-longitude rate minus the
    /// longitude-of-perihelion rate, so that `M(t) = L(t) − ϖ(t)`.
    pub fn elements(&self) -> KeplerianElements {
        let [a, e, incl, l, peri, node] = self.table().values;
        let [da, de, dincl, dl, dperi, dnode] = self.table().rates;

        let rates = ElementRates::from_century_degrees(da, de, dincl, dnode, dperi - dnode);
        let mean_motion = (dl - dperi) * RADEG / DAYS_PER_CENTURY;

        KeplerianElements {
            reference_epoch: 0.0,
            semi_major_axis: a,
            eccentricity: e,
            inclination: incl * RADEG,
            ascending_node_longitude: principal_angle(node * RADEG),
            periapsis_argument: principal_angle((peri - node) * RADEG),
            mean_anomaly: principal_angle((l - peri) * RADEG),
            mean_motion,
            rates,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Planet {
    type Err = PerihelionError;

    /// Case-insensitive planet name; "EMB" is accepted for the Earth–Moon barycentre.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("emb") {
            return Ok(Planet::Earth);
        }
        Planet::ALL
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| PerihelionError::UnknownBody(s.to_string()))
    }
}
