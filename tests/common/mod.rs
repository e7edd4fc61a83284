use approx::assert_relative_eq;
use perihelion::orbit_type::keplerian_element::KeplerianElements;
use perihelion::ref_system::HeliocentricPosition;

pub fn assert_orbit_close(actual: &KeplerianElements, expected: &KeplerianElements, epsilon: f64) {
    assert_relative_eq!(
        actual.reference_epoch,
        expected.reference_epoch,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(
        actual.ascending_node_longitude,
        expected.ascending_node_longitude,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.periapsis_argument,
        expected.periapsis_argument,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly,
        expected.mean_anomaly,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.mean_motion, expected.mean_motion, epsilon = epsilon);
}

pub fn assert_position_close(
    actual: &HeliocentricPosition,
    expected: &HeliocentricPosition,
    epsilon: f64,
) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}
