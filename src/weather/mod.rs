pub mod unit_load;

use serde::{Deserialize, Serialize};

use crate::types::conversion::*;
use crate::types::{UnitStyle, UnitSystem};

pub use unit_load::UnitLoadAnalysis;

/// A named wind/ice/temperature loading scenario.
///
/// Weathercases are owned by the application data set and referenced
/// everywhere else by description string. Values are in the consistent
/// basis of the attributed system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherLoadCase {
    /// Unique description, e.g. "1/2in Ice 8psf 0F"
    pub description: String,
    /// Radial ice accretion thickness (ft)
    pub thickness_ice: f64,
    /// Ice unit weight (lbs/ft^3)
    pub density_ice: f64,
    /// Wind pressure on the projected face (lbs/ft^2)
    pub pressure_wind: f64,
    /// Cable temperature for this scenario (deg F)
    pub temperature_cable: f64,
}

impl WeatherLoadCase {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Default::default()
        }
    }
}

/// Latest weathercase schema scope; tracks the document schema
pub const VERSION_LATEST: u32 = 1;

type StyleConverter = fn(&mut WeatherLoadCase, UnitSystem, bool);

const STYLE_CONVERTERS: &[(u32, StyleConverter)] = &[(1, convert_unit_style_v1)];

/// Convert a weathercase into the target unit style for the given schema
/// version. Version 0 means "latest"; anything unrecognized is an error.
pub fn convert_unit_style(
    weathercase: &mut WeatherLoadCase,
    version: u32,
    system: UnitSystem,
    style_to: UnitStyle,
) -> Result<(), crate::types::conversion::ConversionError> {
    let version = if version == 0 { VERSION_LATEST } else { version };
    let converter = STYLE_CONVERTERS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, f)| *f)
        .ok_or(crate::types::conversion::ConversionError::UnsupportedVersion(version))?;
    converter(weathercase, system, style_to == UnitStyle::Consistent);
    Ok(())
}

// Files keep ice thickness in inches (Imperial) or millimeters (Metric)
fn convert_unit_style_v1(weathercase: &mut WeatherLoadCase, system: UnitSystem, to_consistent: bool) {
    use crate::types::*;
    weathercase.thickness_ice = match system {
        UnitSystem::Metric => {
            if to_consistent {
                Length::new::<millimeter>(weathercase.thickness_ice).get::<meter>()
            } else {
                Length::new::<meter>(weathercase.thickness_ice).get::<millimeter>()
            }
        }
        _ => {
            if to_consistent {
                Length::new::<inch>(weathercase.thickness_ice).get::<foot>()
            } else {
                Length::new::<foot>(weathercase.thickness_ice).get::<inch>()
            }
        }
    };
}

/// Convert a weathercase between unit systems
pub fn convert_unit_system(
    weathercase: &mut WeatherLoadCase,
    system_from: UnitSystem,
    system_to: UnitSystem,
) {
    weathercase.thickness_ice = convert_length(weathercase.thickness_ice, system_from, system_to);
    weathercase.density_ice =
        convert_force_per_volume(weathercase.density_ice, system_from, system_to);
    weathercase.pressure_wind = convert_pressure(weathercase.pressure_wind, system_from, system_to);
    weathercase.temperature_cable =
        convert_temperature(weathercase.temperature_cable, system_from, system_to);
}
