use std::env;

use perihelion::constants::RADEG;
use perihelion::elements_table::read_elements_csv_file;
use perihelion::ephemeris::{Ephemeris, EphemerisParams};
use perihelion::orbit_type::keplerian_element::KeplerianElements;
use perihelion::perihelion_errors::PerihelionError;
use perihelion::planets::Planet;
use perihelion::time::{parse_epoch, EpochConvention};

/// Print heliocentric ecliptic positions at a UTC timestamp.
/// Usage:
///   planet_positions <TIMESTAMP> [--midnight] [--csv <FILE>]
/// Example:
///   planet_positions 2024-03-20T00:00:00 --csv tests/data/minor_bodies.csv
///
/// Set `RUST_LOG=debug` to see the intermediate anomalies.
fn main() -> Result<(), PerihelionError> {
    env_logger::init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let convention = if let Some(pos) = args.iter().position(|a| a == "--midnight") {
        args.remove(pos);
        EpochConvention::Midnight
    } else {
        EpochConvention::Noon
    };

    let mut bodies: Vec<(String, KeplerianElements)> = Planet::ALL
        .iter()
        .map(|p| (p.name().to_string(), p.elements()))
        .collect();

    if let Some(pos) = args.iter().position(|a| a == "--csv") {
        args.remove(pos);
        if pos >= args.len() {
            return Err(PerihelionError::InvalidParameter(
                "--csv expects a file path".into(),
            ));
        }
        let path = args.remove(pos);
        bodies.extend(
            read_elements_csv_file(&path)?
                .into_iter()
                .map(|row| (row.name, row.elements)),
        );
    }

    let timestamp = args
        .first()
        .cloned()
        .unwrap_or_else(|| "2000-01-01T12:00:00".to_string());
    let epoch = parse_epoch(&timestamp)?;

    let params = EphemerisParams::builder().convention(convention).build()?;
    let ephem = Ephemeris::new(params);

    println!("Heliocentric ecliptic positions (J2000) at {epoch}");
    for (name, _, result) in ephem.positions(&bodies, &[epoch]) {
        match result {
            Ok(report) => println!(
                "{name:<10} {}  r = {:.6} AU  lon = {:8.4}°  lat = {:+8.4}°",
                report.position,
                report.anomalies.radius,
                report.position.ecliptic_longitude() / RADEG,
                report.position.ecliptic_latitude() / RADEG,
            ),
            Err(err) => eprintln!("{name:<10} failed: {err}"),
        }
    }

    Ok(())
}
