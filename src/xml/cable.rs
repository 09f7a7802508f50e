//! XML handlers for cables, their components, and cable files.

use std::path::PathBuf;

use crate::cable::{self, Cable, CableComponent, CableFile};
use crate::types::{UnitStyle, UnitSystem};
use crate::xml::node::XmlNode;
use crate::xml::{
    check_root, parse_value_f64, parse_value_string, parse_version, unit_labels, warn_unrecognized,
};

/// Current cable/cable_component schema version
const VERSION_LATEST: u32 = cable::conversion::VERSION_LATEST;
/// Current cable_file schema version
const VERSION_LATEST_FILE: u32 = 1;

// Version parsers populate a staging value. None = critical failure (the
// caller must not commit); Some(status) = scan finished, status false when
// unrecognized elements were skipped.
type ComponentParser = fn(&XmlNode, &mut CableComponent) -> Option<bool>;
type CableParser = fn(&XmlNode, &mut Cable) -> Option<bool>;
type FileParser = fn(&XmlNode, Option<UnitSystem>, &mut CableFile) -> Option<bool>;

pub struct CableComponentXmlHandler;

const COMPONENT_PARSERS: &[(u32, ComponentParser)] = &[
    (1, CableComponentXmlHandler::parse_node_v1),
    (2, CableComponentXmlHandler::parse_node_v2),
];

impl CableComponentXmlHandler {
    /// Emit a component at the latest schema version. `name` distinguishes
    /// the core and shell child nodes of a cable.
    pub fn create_node(component: &CableComponent, name: &str, units: UnitSystem) -> XmlNode {
        let labels = unit_labels(units);
        let mut node = XmlNode::new("cable_component");
        node.set_attribute("version", VERSION_LATEST);
        node.set_attribute("name", name);

        node.add_child(XmlNode::element(
            "coefficient_expansion_thermal",
            component.coefficient_expansion_thermal,
            labels.thermal,
        ));
        node.add_child(XmlNode::element(
            "modulus_tension_elastic",
            component.modulus_tension_elastic,
            labels.modulus,
        ));
        node.add_child(XmlNode::element(
            "modulus_compression_elastic",
            component.modulus_compression_elastic,
            labels.modulus,
        ));

        let mut loadstrain = XmlNode::new("coefficients_loadstrain");
        for (position, coefficient) in component.coefficients_loadstrain.iter().enumerate() {
            loadstrain.add_child(XmlNode::element(
                &format!("a{position}"),
                coefficient,
                labels.force,
            ));
        }
        node.add_child(loadstrain);

        let mut creep = XmlNode::new("coefficients_creep");
        for (position, coefficient) in component.coefficients_creep.iter().enumerate() {
            creep.add_child(XmlNode::element(
                &format!("b{position}"),
                coefficient,
                labels.force,
            ));
        }
        node.add_child(creep);

        node.add_child(XmlNode::element(
            "load_limit_loadstrain",
            component.load_limit_loadstrain,
            labels.force,
        ));
        node.add_child(XmlNode::element(
            "load_limit_creep",
            component.load_limit_creep,
            labels.force,
        ));
        node
    }

    /// Parse any supported schema version into `component`; on failure the
    /// output is left untouched
    pub fn parse_node(node: &XmlNode, component: &mut CableComponent) -> bool {
        Self::parse_into(node, component).unwrap_or(false)
    }

    pub(crate) fn parse_into(node: &XmlNode, component: &mut CableComponent) -> Option<bool> {
        if !check_root(node, "cable_component") {
            return None;
        }
        let version = parse_version(node)?;
        let Some((_, parser)) = COMPONENT_PARSERS.iter().find(|(v, _)| *v == version) else {
            log::error!(
                "line {}: unsupported cable_component version {}",
                node.line,
                version
            );
            return None;
        };

        let mut staging = CableComponent::default();
        let status = parser(node, &mut staging)?;
        *component = staging;
        Some(status)
    }

    fn parse_node_v1(node: &XmlNode, staging: &mut CableComponent) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "coefficient_expansion_thermal" => {
                    staging.coefficient_expansion_thermal = parse_value_f64(child)?;
                }
                "modulus_tension_elastic" => {
                    staging.modulus_tension_elastic = parse_value_f64(child)?;
                }
                "coefficients_loadstrain" => {
                    parse_coefficients(child, 'a', &mut staging.coefficients_loadstrain)?;
                }
                "coefficients_creep" => {
                    parse_coefficients(child, 'b', &mut staging.coefficients_creep)?;
                }
                _ => {
                    warn_unrecognized(child, "cable_component");
                    status = false;
                }
            }
        }
        Some(status)
    }

    fn parse_node_v2(node: &XmlNode, staging: &mut CableComponent) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "coefficient_expansion_thermal" => {
                    staging.coefficient_expansion_thermal = parse_value_f64(child)?;
                }
                "modulus_tension_elastic" => {
                    staging.modulus_tension_elastic = parse_value_f64(child)?;
                }
                "modulus_compression_elastic" => {
                    staging.modulus_compression_elastic = parse_value_f64(child)?;
                }
                "coefficients_loadstrain" => {
                    parse_coefficients(child, 'a', &mut staging.coefficients_loadstrain)?;
                }
                "coefficients_creep" => {
                    parse_coefficients(child, 'b', &mut staging.coefficients_creep)?;
                }
                "load_limit_loadstrain" => {
                    staging.load_limit_loadstrain = parse_value_f64(child)?;
                }
                "load_limit_creep" => {
                    staging.load_limit_creep = parse_value_f64(child)?;
                }
                _ => {
                    warn_unrecognized(child, "cable_component");
                    status = false;
                }
            }
        }
        Some(status)
    }
}

// Fixed a0..a4 / b0..b4 element names; absent trailing terms stay zero
fn parse_coefficients(node: &XmlNode, prefix: char, out: &mut [f64; 5]) -> Option<()> {
    for (position, slot) in out.iter_mut().enumerate() {
        if let Some(child) = node.child(&format!("{prefix}{position}")) {
            *slot = parse_value_f64(child)?;
        }
    }
    Some(())
}

pub struct CableXmlHandler;

const CABLE_PARSERS: &[(u32, CableParser)] = &[
    (1, CableXmlHandler::parse_node_v1),
    (2, CableXmlHandler::parse_node_v2),
];

impl CableXmlHandler {
    /// Emit a consistent-style cable at the latest schema version, with
    /// file values converted to the human-friendly unit style
    pub fn create_node(cable: &Cable, units: UnitSystem) -> XmlNode {
        let mut out = cable.clone();
        // The version-0 sentinel resolves to the latest converter
        let _ = cable::conversion::convert_unit_style(&mut out, 0, units, UnitStyle::Different);
        let labels = unit_labels(units);

        let mut node = XmlNode::new("cable");
        node.set_attribute("version", VERSION_LATEST);
        node.set_attribute("units", units.as_str());
        node.add_child(XmlNode::element("name", &out.name, ""));
        node.add_child(XmlNode::element("construction", &out.construction, ""));
        node.add_child(XmlNode::element(
            "area_electrical",
            out.area_electrical,
            labels.area_electrical,
        ));
        node.add_child(XmlNode::element(
            "area_physical",
            out.area_physical,
            labels.area_small,
        ));
        node.add_child(XmlNode::element(
            "diameter",
            out.diameter,
            labels.length_small,
        ));
        node.add_child(XmlNode::element(
            "strength_rated",
            out.strength_rated,
            labels.force,
        ));
        node.add_child(XmlNode::element(
            "temperature_components",
            out.temperature_components,
            labels.temperature,
        ));
        node.add_child(XmlNode::element(
            "weight_unit",
            out.weight_unit,
            labels.force_per_length,
        ));
        node.add_child(CableComponentXmlHandler::create_node(
            &out.component_core,
            "core",
            units,
        ));
        node.add_child(CableComponentXmlHandler::create_node(
            &out.component_shell,
            "shell",
            units,
        ));
        node
    }

    /// Parse any supported schema version into `cable`.
    ///
    /// When `units_target` is given, the parsed cable is rewritten from
    /// file units into the target system's consistent basis using the
    /// style converter matching the node's declared version; otherwise the
    /// values stay in file units. On failure the output is untouched.
    pub fn parse_node(node: &XmlNode, units_target: Option<UnitSystem>, cable: &mut Cable) -> bool {
        Self::parse_into(node, units_target, cable).unwrap_or(false)
    }

    pub(crate) fn parse_into(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        cable: &mut Cable,
    ) -> Option<bool> {
        if !check_root(node, "cable") {
            return None;
        }
        let version = parse_version(node)?;
        let Some((_, parser)) = CABLE_PARSERS.iter().find(|(v, _)| *v == version) else {
            log::error!("line {}: unsupported cable version {}", node.line, version);
            return None;
        };

        let mut status = true;
        let units_file = match node.attribute("units") {
            Some(value) => match UnitSystem::from_str_attr(value) {
                Some(system) => system,
                None => {
                    log::warn!(
                        "line {}: unrecognized units attribute '{}' on <cable>",
                        node.line,
                        value
                    );
                    status = false;
                    UnitSystem::Null
                }
            },
            None => {
                log::warn!("line {}: missing units attribute on <cable>", node.line);
                status = false;
                UnitSystem::Null
            }
        };

        let mut staging = Cable::default();
        status &= parser(node, &mut staging)?;

        if let Some(target) = units_target {
            if cable::conversion::convert_unit_style(&mut staging, version, units_file, UnitStyle::Consistent)
                .is_err()
            {
                log::error!(
                    "line {}: no unit-style converter for cable version {}",
                    node.line,
                    version
                );
                return None;
            }
            cable::conversion::convert_unit_system(&mut staging, units_file, target, true);
        }
        *cable = staging;
        Some(status)
    }

    fn parse_node_v1(node: &XmlNode, staging: &mut Cable) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "name" => staging.name = parse_value_string(child),
                "construction" => staging.construction = parse_value_string(child),
                "area_physical" => staging.area_physical = parse_value_f64(child)?,
                "diameter" => staging.diameter = parse_value_f64(child)?,
                "strength_rated" => staging.strength_rated = parse_value_f64(child)?,
                "temperature_components" => {
                    staging.temperature_components = parse_value_f64(child)?;
                }
                "weight_unit" => staging.weight_unit = parse_value_f64(child)?,
                "cable_component" => status &= parse_component_child(child, staging)?,
                _ => {
                    warn_unrecognized(child, "cable");
                    status = false;
                }
            }
        }
        Some(status)
    }

    fn parse_node_v2(node: &XmlNode, staging: &mut Cable) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "area_electrical" => staging.area_electrical = parse_value_f64(child)?,
                "name" | "construction" | "area_physical" | "diameter" | "strength_rated"
                | "temperature_components" | "weight_unit" | "cable_component" => {
                    status &= parse_shared_field(child, staging)?;
                }
                _ => {
                    warn_unrecognized(child, "cable");
                    status = false;
                }
            }
        }
        Some(status)
    }
}

// Fields carried by every cable schema version
fn parse_shared_field(child: &XmlNode, staging: &mut Cable) -> Option<bool> {
    match child.name.as_str() {
        "name" => staging.name = parse_value_string(child),
        "construction" => staging.construction = parse_value_string(child),
        "area_physical" => staging.area_physical = parse_value_f64(child)?,
        "diameter" => staging.diameter = parse_value_f64(child)?,
        "strength_rated" => staging.strength_rated = parse_value_f64(child)?,
        "temperature_components" => staging.temperature_components = parse_value_f64(child)?,
        "weight_unit" => staging.weight_unit = parse_value_f64(child)?,
        "cable_component" => return parse_component_child(child, staging),
        _ => {}
    }
    Some(true)
}

fn parse_component_child(child: &XmlNode, staging: &mut Cable) -> Option<bool> {
    match child.attribute("name") {
        Some("core") => CableComponentXmlHandler::parse_into(child, &mut staging.component_core),
        Some("shell") => CableComponentXmlHandler::parse_into(child, &mut staging.component_shell),
        other => {
            log::warn!(
                "line {}: cable_component with unrecognized name {:?}",
                child.line,
                other
            );
            Some(false)
        }
    }
}

pub struct CableFileXmlHandler;

const FILE_PARSERS: &[(u32, FileParser)] = &[(1, CableFileXmlHandler::parse_node_v1)];

impl CableFileXmlHandler {
    pub fn create_node(file: &CableFile, units: UnitSystem) -> XmlNode {
        let mut node = XmlNode::new("cable_file");
        node.set_attribute("version", VERSION_LATEST_FILE);
        node.add_child(XmlNode::element(
            "path",
            file.path.display().to_string(),
            "",
        ));
        node.add_child(CableXmlHandler::create_node(&file.cable, units));
        node
    }

    pub fn parse_node(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        file: &mut CableFile,
    ) -> bool {
        Self::parse_into(node, units_target, file).unwrap_or(false)
    }

    pub(crate) fn parse_into(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        file: &mut CableFile,
    ) -> Option<bool> {
        if !check_root(node, "cable_file") {
            return None;
        }
        let version = parse_version(node)?;
        let Some((_, parser)) = FILE_PARSERS.iter().find(|(v, _)| *v == version) else {
            log::error!(
                "line {}: unsupported cable_file version {}",
                node.line,
                version
            );
            return None;
        };

        let mut staging = CableFile::default();
        let status = parser(node, units_target, &mut staging)?;
        *file = staging;
        Some(status)
    }

    fn parse_node_v1(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        staging: &mut CableFile,
    ) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "path" => staging.path = PathBuf::from(parse_value_string(child)),
                "cable" => {
                    status &= CableXmlHandler::parse_into(child, units_target, &mut staging.cable)?;
                }
                _ => {
                    warn_unrecognized(child, "cable_file");
                    status = false;
                }
            }
        }
        Some(status)
    }
}
