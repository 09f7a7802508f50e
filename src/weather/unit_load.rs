use std::f64::consts::PI;

use crate::cable::Cable;
use crate::types::{vector_3d, Vector3d};
use crate::weather::WeatherLoadCase;

/// Resultant per-length loading of a cable under a weathercase.
///
/// Axes follow the span convention: x along the line (always zero here),
/// y transverse horizontal (wind), z vertical with weight positive downward.
#[derive(Debug, Clone)]
pub struct UnitLoadAnalysis<'a> {
    pub cable: &'a Cable,
    pub weathercase: &'a WeatherLoadCase,
}

impl<'a> UnitLoadAnalysis<'a> {
    pub fn new(cable: &'a Cable, weathercase: &'a WeatherLoadCase) -> Self {
        Self { cable, weathercase }
    }

    /// Ice weight per unit length (lbs/ft)
    ///
    /// Annulus area around the cable: pi * t * (d + t)
    pub fn weight_ice(&self) -> f64 {
        let d = self.cable.diameter;
        let t = self.weathercase.thickness_ice;
        self.weathercase.density_ice * PI * t * (d + t)
    }

    /// Wind load per unit length (lbs/ft)
    ///
    /// Pressure times the projected face of the iced cable: p * (d + 2t)
    pub fn load_wind(&self) -> f64 {
        let d = self.cable.diameter;
        let t = self.weathercase.thickness_ice;
        self.weathercase.pressure_wind * (d + 2.0 * t)
    }

    /// Resultant unit weight vector (0, transverse, vertical)
    pub fn unit_load(&self) -> Vector3d {
        vector_3d(
            0.0,
            self.load_wind(),
            self.cable.weight_unit + self.weight_ice(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drake() -> Cable {
        Cable {
            name: "795 ACSR".into(),
            diameter: 1.108 / 12.0,
            weight_unit: 1.094,
            ..Default::default()
        }
    }

    #[test]
    fn test_bare_case_is_weight_only() {
        let cable = drake();
        let case = WeatherLoadCase::new("Everyday");
        let load = UnitLoadAnalysis::new(&cable, &case).unit_load();
        assert_relative_eq!(load.x, 0.0);
        assert_relative_eq!(load.y, 0.0);
        assert_relative_eq!(load.z, 1.094);
    }

    #[test]
    fn test_iced_case() {
        let cable = drake();
        let case = WeatherLoadCase {
            description: "Heavy ice".into(),
            thickness_ice: 0.5 / 12.0,
            density_ice: 57.0,
            pressure_wind: 0.0,
            temperature_cable: 0.0,
        };
        let analysis = UnitLoadAnalysis::new(&cable, &case);

        let t: f64 = 0.5 / 12.0;
        let d: f64 = 1.108 / 12.0;
        let expected = 57.0 * PI * t * (d + t);
        assert_relative_eq!(analysis.weight_ice(), expected, max_relative = 1e-12);
        assert!(analysis.unit_load().z > cable.weight_unit);
    }

    #[test]
    fn test_wind_acts_on_iced_face() {
        let cable = drake();
        let case = WeatherLoadCase {
            description: "Wind on ice".into(),
            thickness_ice: 0.25 / 12.0,
            density_ice: 57.0,
            pressure_wind: 4.0,
            temperature_cable: 32.0,
        };
        let analysis = UnitLoadAnalysis::new(&cable, &case);
        let expected = 4.0 * (1.108 / 12.0 + 2.0 * 0.25 / 12.0);
        assert_relative_eq!(analysis.load_wind(), expected, max_relative = 1e-12);
        assert_relative_eq!(analysis.unit_load().y, expected, max_relative = 1e-12);
    }
}
