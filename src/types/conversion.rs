//! Scalar Imperial/Metric converters.
//!
//! Conversion factors come from uom quantities rather than hand-typed
//! constants. The consistent calculation basis is feet/lbs/deg F for
//! Imperial and meters/N/deg C for Metric; these functions convert values
//! already expressed in one consistent basis into the other.

use thiserror::Error;

use crate::types::*;

/// Failure of a version-dispatched unit-style conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u32),
}

/// Convert a length between consistent bases (ft <-> m)
pub fn convert_length(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => Length::new::<foot>(value).get::<meter>(),
        (UnitSystem::Metric, UnitSystem::Imperial) => Length::new::<meter>(value).get::<foot>(),
        _ => value,
    }
}

/// Convert a force between consistent bases (lbs <-> N)
pub fn convert_force(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => {
            Force::new::<pound_force>(value).get::<newton>()
        }
        (UnitSystem::Metric, UnitSystem::Imperial) => {
            Force::new::<newton>(value).get::<pound_force>()
        }
        _ => value,
    }
}

/// Convert a temperature between consistent bases (deg F <-> deg C)
pub fn convert_temperature(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => {
            Temperature::new::<degree_fahrenheit>(value).get::<degree_celsius>()
        }
        (UnitSystem::Metric, UnitSystem::Imperial) => {
            Temperature::new::<degree_celsius>(value).get::<degree_fahrenheit>()
        }
        _ => value,
    }
}

/// Convert a temperature difference (thermal coefficient denominator),
/// which scales without the freezing-point offset (1/deg F <-> 1/deg C)
pub fn convert_temperature_coefficient(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    // 1 deg C interval = 1.8 deg F interval; per-degree coefficients scale
    // by the interval ratio, not through the offset conversion
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => value * 1.8,
        (UnitSystem::Metric, UnitSystem::Imperial) => value / 1.8,
        _ => value,
    }
}

/// Convert an area between consistent bases (ft^2 <-> m^2)
pub fn convert_area(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => {
            Area::new::<square_foot>(value).get::<square_meter>()
        }
        (UnitSystem::Metric, UnitSystem::Imperial) => {
            Area::new::<square_meter>(value).get::<square_foot>()
        }
        _ => value,
    }
}

/// Convert a pressure between consistent bases (lbs/ft^2 <-> Pa)
pub fn convert_pressure(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => {
            Pressure::new::<pound_force_per_square_foot>(value).get::<pascal>()
        }
        (UnitSystem::Metric, UnitSystem::Imperial) => {
            Pressure::new::<pascal>(value).get::<pound_force_per_square_foot>()
        }
        _ => value,
    }
}

/// Convert a distributed weight between consistent bases (lbs/ft <-> N/m)
pub fn convert_force_per_length(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) | (UnitSystem::Metric, UnitSystem::Imperial) => {
            convert_force(value, from, to) / convert_length(1.0, from, to)
        }
        _ => value,
    }
}

/// Convert a volumetric weight between consistent bases (lbs/ft^3 <-> N/m^3)
pub fn convert_force_per_volume(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) | (UnitSystem::Metric, UnitSystem::Imperial) => {
            let length = convert_length(1.0, from, to);
            convert_force(value, from, to) / (length * length * length)
        }
        _ => value,
    }
}
