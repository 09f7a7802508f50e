//! Versioned XML interchange.
//!
//! Every persisted entity has a handler with two faces: `create_node`
//! always emits the latest schema version, and `parse_node` dispatches on
//! the node's `version` attribute through a registry of version-specific
//! parsers, so every prior version stays readable forever. Parsers populate
//! a local staging value and commit only on success; schema errors and bad
//! field values abort a node with the caller's output untouched, while
//! unrecognized child elements are logged and skipped.

pub mod cable;
pub mod config;
pub mod document;
pub mod node;
pub mod span;
pub mod weather;

pub use cable::{CableComponentXmlHandler, CableFileXmlHandler, CableXmlHandler};
pub use config::SpanAnalyzerConfigXmlHandler;
pub use document::SpanAnalyzerDocXmlHandler;
pub use node::{XmlError, XmlNode};
pub use span::SpanXmlHandler;
pub use weather::WeatherLoadCaseXmlHandler;

use crate::types::UnitSystem;

/// Read and validate the mandatory integer `version` attribute.
/// None means the node cannot be parsed at all (critical).
pub(crate) fn parse_version(node: &XmlNode) -> Option<u32> {
    match node.attribute("version") {
        Some(value) => match value.parse::<u32>() {
            Ok(version) => Some(version),
            Err(_) => {
                log::error!(
                    "line {}: invalid version attribute '{}' on <{}>",
                    node.line,
                    value,
                    node.name
                );
                None
            }
        },
        None => {
            log::error!(
                "line {}: missing version attribute on <{}>",
                node.line,
                node.name
            );
            None
        }
    }
}

/// Check the root element name; logs on mismatch (critical)
pub(crate) fn check_root(node: &XmlNode, expected: &str) -> bool {
    if node.name == expected {
        true
    } else {
        log::error!(
            "line {}: expected root <{}>, found <{}>",
            node.line,
            expected,
            node.name
        );
        false
    }
}

/// Parse the text content of a leaf node as f64; logs on failure (critical)
pub(crate) fn parse_value_f64(node: &XmlNode) -> Option<f64> {
    let text = node.text.as_deref().unwrap_or("");
    match text.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::error!(
                "line {}: invalid numeric value '{}' in <{}>",
                node.line,
                text,
                node.name
            );
            None
        }
    }
}

/// Text content of a leaf node, empty string when absent
pub(crate) fn parse_value_string(node: &XmlNode) -> String {
    node.text.clone().unwrap_or_default()
}

/// Parse a named attribute as f64; logs on absence/failure (critical)
pub(crate) fn parse_attribute_f64(node: &XmlNode, name: &str) -> Option<f64> {
    let Some(value) = node.attribute(name) else {
        log::error!(
            "line {}: missing attribute '{}' on <{}>",
            node.line,
            name,
            node.name
        );
        return None;
    };
    match value.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::error!(
                "line {}: invalid attribute {}='{}' on <{}>",
                node.line,
                name,
                value,
                node.name
            );
            None
        }
    }
}

pub(crate) fn warn_unrecognized(node: &XmlNode, parent: &str) {
    log::warn!(
        "line {}: unrecognized element <{}> in <{}>",
        node.line,
        node.name,
        parent
    );
}

// Descriptive unit labels written to `units` attributes. Never parsed
// back; the version + units-system attributes define the real semantics.
pub(crate) struct UnitLabels {
    pub length: &'static str,
    pub length_small: &'static str,
    pub area_small: &'static str,
    pub area_electrical: &'static str,
    pub force: &'static str,
    pub force_per_length: &'static str,
    pub temperature: &'static str,
    pub modulus: &'static str,
    pub thermal: &'static str,
    pub pressure: &'static str,
    pub density: &'static str,
}

pub(crate) fn unit_labels(system: UnitSystem) -> UnitLabels {
    match system {
        UnitSystem::Metric => UnitLabels {
            length: "m",
            length_small: "mm",
            area_small: "mm^2",
            area_electrical: "mm^2",
            force: "N",
            force_per_length: "N/m",
            temperature: "deg C",
            modulus: "N/%",
            thermal: "1/deg C",
            pressure: "Pa",
            density: "N/m^3",
        },
        _ => UnitLabels {
            length: "ft",
            length_small: "in",
            area_small: "in^2",
            area_electrical: "kcmil",
            force: "lbs",
            force_per_length: "lbs/ft",
            temperature: "deg F",
            modulus: "lbs/%",
            thermal: "1/deg F",
            pressure: "lbs/ft^2",
            density: "lbs/ft^3",
        },
    }
}
