//! XML handler for weathercases.
//!
//! Weathercase nodes live inside a document and share its schema version;
//! they carry no version attribute of their own. Values are written in the
//! file's unit style; the owning document applies style and system
//! conversion.

use crate::types::UnitSystem;
use crate::weather::WeatherLoadCase;
use crate::xml::node::XmlNode;
use crate::xml::{check_root, parse_value_f64, parse_value_string, unit_labels, warn_unrecognized};

pub struct WeatherLoadCaseXmlHandler;

impl WeatherLoadCaseXmlHandler {
    pub fn create_node(weathercase: &WeatherLoadCase, units: UnitSystem) -> XmlNode {
        let labels = unit_labels(units);
        let mut node = XmlNode::new("weather_load_case");
        node.add_child(XmlNode::element("description", &weathercase.description, ""));
        node.add_child(XmlNode::element(
            "thickness_ice",
            weathercase.thickness_ice,
            labels.length_small,
        ));
        node.add_child(XmlNode::element(
            "density_ice",
            weathercase.density_ice,
            labels.density,
        ));
        node.add_child(XmlNode::element(
            "pressure_wind",
            weathercase.pressure_wind,
            labels.pressure,
        ));
        node.add_child(XmlNode::element(
            "temperature_cable",
            weathercase.temperature_cable,
            labels.temperature,
        ));
        node
    }

    pub fn parse_node(node: &XmlNode, weathercase: &mut WeatherLoadCase) -> bool {
        Self::parse_into(node, weathercase).unwrap_or(false)
    }

    pub(crate) fn parse_into(node: &XmlNode, weathercase: &mut WeatherLoadCase) -> Option<bool> {
        if !check_root(node, "weather_load_case") {
            return None;
        }

        let mut staging = WeatherLoadCase::default();
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "description" => staging.description = parse_value_string(child),
                "thickness_ice" => staging.thickness_ice = parse_value_f64(child)?,
                "density_ice" => staging.density_ice = parse_value_f64(child)?,
                "pressure_wind" => staging.pressure_wind = parse_value_f64(child)?,
                "temperature_cable" => staging.temperature_cable = parse_value_f64(child)?,
                _ => {
                    warn_unrecognized(child, "weather_load_case");
                    status = false;
                }
            }
        }
        *weathercase = staging;
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip() {
        let original = WeatherLoadCase {
            description: "1/2in Ice 8psf 0F".into(),
            thickness_ice: 0.5,
            density_ice: 57.0,
            pressure_wind: 8.0,
            temperature_cable: 0.0,
        };
        let node = WeatherLoadCaseXmlHandler::create_node(&original, UnitSystem::Imperial);

        let mut parsed = WeatherLoadCase::new("x");
        assert!(WeatherLoadCaseXmlHandler::parse_node(&node, &mut parsed));
        assert_eq!(parsed.description, original.description);
        assert_relative_eq!(parsed.thickness_ice, 0.5, max_relative = 1e-9);
        assert_relative_eq!(parsed.density_ice, 57.0, max_relative = 1e-9);
    }

    #[test]
    fn test_bad_field_aborts() {
        let mut node = WeatherLoadCaseXmlHandler::create_node(
            &WeatherLoadCase::new("Everyday"),
            UnitSystem::Imperial,
        );
        for child in node.children.iter_mut() {
            if child.name == "pressure_wind" {
                child.text = Some("breezy".into());
            }
        }
        let mut parsed = WeatherLoadCase::new("sentinel");
        assert!(!WeatherLoadCaseXmlHandler::parse_node(&node, &mut parsed));
        assert_eq!(parsed.description, "sentinel");
    }
}
