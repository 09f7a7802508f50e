pub mod conversion;
pub mod geometry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use uom::si::f64::{Area, Force, Length, Pressure, ThermodynamicTemperature};
pub use uom::si::{
    area::{circular_mil, square_foot, square_inch, square_meter, square_millimeter},
    force::{newton, pound_force},
    length::{foot, inch, meter, millimeter},
    pressure::{pascal, pound_force_per_square_foot},
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
};

// Type alias for domain clarity (zero cost)
pub type Temperature = ThermodynamicTemperature;

// Re-export nalgebra
pub use nalgebra as na;

pub use geometry::{vector_3d, Point2d, Point3d, Vector3d};

// Standard units used internally (just documentation)
/// Internal standard: feet
pub const INTERNAL_LENGTH_UNIT: &str = "feet";
/// Internal standard: pounds
pub const INTERNAL_FORCE_UNIT: &str = "lbs";
/// Internal standard: degrees Fahrenheit
pub const INTERNAL_TEMPERATURE_UNIT: &str = "deg F";

/// Measurement system attached to cable files, documents, and config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    Imperial,
    Metric,
    /// No system attributed yet (freshly constructed, not loaded from file)
    #[default]
    Null,
}

impl UnitSystem {
    /// Attribute string used in XML files
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "Imperial",
            UnitSystem::Metric => "Metric",
            UnitSystem::Null => "",
        }
    }

    pub fn from_str_attr(s: &str) -> Option<UnitSystem> {
        match s {
            "Imperial" => Some(UnitSystem::Imperial),
            "Metric" => Some(UnitSystem::Metric),
            _ => None,
        }
    }
}

/// How values are expressed within a unit system.
///
/// `Different` is the human-friendly mix used in files and displays (cable
/// diameter in inches, electrical area in kcmil). `Consistent` is the single
/// coherent basis every calculation runs in (feet/lbs/deg F for Imperial,
/// meters/N/deg C for Metric).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStyle {
    Different,
    Consistent,
}

#[derive(Debug)]
pub struct DisplayLength(pub f64, pub UnitSystem);
#[derive(Debug)]
pub struct DisplayForce(pub f64, pub UnitSystem);
#[derive(Debug)]
pub struct DisplayTemperature(pub f64, pub UnitSystem);

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            UnitSystem::Metric => write!(f, "{:.2} m", self.0),
            _ => write!(f, "{:.2} ft", self.0),
        }
    }
}

impl fmt::Display for DisplayForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            UnitSystem::Metric => write!(f, "{:.0} N", self.0),
            _ => write!(f, "{:.0} lbs", self.0),
        }
    }
}

impl fmt::Display for DisplayTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            UnitSystem::Metric => write!(f, "{:.1} \u{00b0}C", self.0),
            _ => write!(f, "{:.1} \u{00b0}F", self.0),
        }
    }
}
