//! XML handler for spans.
//!
//! Schema v1 carried the name and line cable; v2 added the optional
//! stretch-weathercase reference elements.

use crate::analysis::CableCondition;
use crate::span::{CableConstraint, ConstraintLimitType, LineCable, Span};
use crate::types::{UnitSystem, Vector3d};
use crate::xml::node::XmlNode;
use crate::xml::{
    check_root, parse_attribute_f64, parse_value_f64, parse_value_string, parse_version,
    unit_labels, warn_unrecognized,
};

const VERSION_LATEST: u32 = 2;

type SpanParser = fn(&XmlNode, &mut Span) -> Option<bool>;

const SPAN_PARSERS: &[(u32, SpanParser)] = &[
    (1, SpanXmlHandler::parse_node_v1),
    (2, SpanXmlHandler::parse_node_v2),
];

pub struct SpanXmlHandler;

impl SpanXmlHandler {
    pub fn create_node(span: &Span, units: UnitSystem) -> XmlNode {
        let labels = unit_labels(units);
        let mut node = XmlNode::new("span");
        node.set_attribute("version", VERSION_LATEST);
        node.add_child(XmlNode::element("name", &span.name, ""));

        let mut line_cable = XmlNode::new("line_cable");
        line_cable.add_child(XmlNode::element("cable", &span.line_cable.cable, ""));

        let constraint = &span.line_cable.constraint;
        let mut constraint_node = XmlNode::new("cable_constraint");
        constraint_node.add_child(XmlNode::element(
            "limit_type",
            constraint.limit_type.as_str(),
            "",
        ));
        let limit_units = match constraint.limit_type {
            ConstraintLimitType::HorizontalTension | ConstraintLimitType::SupportTension => {
                labels.force
            }
            _ => labels.length,
        };
        constraint_node.add_child(XmlNode::element("limit", constraint.limit, limit_units));
        constraint_node.add_child(XmlNode::element(
            "weathercase",
            &constraint.weathercase,
            "",
        ));
        constraint_node.add_child(XmlNode::element(
            "condition",
            constraint.condition.as_str(),
            "",
        ));
        line_cable.add_child(constraint_node);

        let spacing = &span.line_cable.spacing_attachments;
        let mut spacing_node = XmlNode::new("spacing_attachments");
        spacing_node.set_attribute("x", spacing.x);
        spacing_node.set_attribute("y", spacing.y);
        spacing_node.set_attribute("z", spacing.z);
        spacing_node.set_attribute("units", labels.length);
        line_cable.add_child(spacing_node);
        node.add_child(line_cable);

        if let Some(weathercase) = &span.weathercase_stretch_creep {
            node.add_child(XmlNode::element("weathercase_stretch_creep", weathercase, ""));
        }
        if let Some(weathercase) = &span.weathercase_stretch_load {
            node.add_child(XmlNode::element("weathercase_stretch_load", weathercase, ""));
        }
        node
    }

    pub fn parse_node(node: &XmlNode, span: &mut Span) -> bool {
        Self::parse_into(node, span).unwrap_or(false)
    }

    pub(crate) fn parse_into(node: &XmlNode, span: &mut Span) -> Option<bool> {
        if !check_root(node, "span") {
            return None;
        }
        let version = parse_version(node)?;
        let Some((_, parser)) = SPAN_PARSERS.iter().find(|(v, _)| *v == version) else {
            log::error!("line {}: unsupported span version {}", node.line, version);
            return None;
        };

        let mut staging = Span::default();
        let status = parser(node, &mut staging)?;
        *span = staging;
        Some(status)
    }

    fn parse_node_v1(node: &XmlNode, staging: &mut Span) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "name" => staging.name = parse_value_string(child),
                "line_cable" => status &= parse_line_cable(child, &mut staging.line_cable)?,
                _ => {
                    warn_unrecognized(child, "span");
                    status = false;
                }
            }
        }
        Some(status)
    }

    fn parse_node_v2(node: &XmlNode, staging: &mut Span) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "name" => staging.name = parse_value_string(child),
                "line_cable" => status &= parse_line_cable(child, &mut staging.line_cable)?,
                "weathercase_stretch_creep" => {
                    staging.weathercase_stretch_creep = Some(parse_value_string(child));
                }
                "weathercase_stretch_load" => {
                    staging.weathercase_stretch_load = Some(parse_value_string(child));
                }
                _ => {
                    warn_unrecognized(child, "span");
                    status = false;
                }
            }
        }
        Some(status)
    }
}

fn parse_line_cable(node: &XmlNode, line_cable: &mut LineCable) -> Option<bool> {
    let mut status = true;
    for child in &node.children {
        match child.name.as_str() {
            "cable" => line_cable.cable = parse_value_string(child),
            "cable_constraint" => {
                status &= parse_constraint(child, &mut line_cable.constraint)?;
            }
            "spacing_attachments" => {
                line_cable.spacing_attachments = Vector3d::new(
                    parse_attribute_f64(child, "x")?,
                    parse_attribute_f64(child, "y")?,
                    parse_attribute_f64(child, "z")?,
                );
            }
            _ => {
                warn_unrecognized(child, "line_cable");
                status = false;
            }
        }
    }
    Some(status)
}

fn parse_constraint(node: &XmlNode, constraint: &mut CableConstraint) -> Option<bool> {
    let mut status = true;
    for child in &node.children {
        match child.name.as_str() {
            "limit_type" => {
                let tag = parse_value_string(child);
                match ConstraintLimitType::from_str_attr(&tag) {
                    Some(limit_type) => constraint.limit_type = limit_type,
                    None => {
                        log::error!("line {}: unknown limit_type '{}'", child.line, tag);
                        return None;
                    }
                }
            }
            "limit" => constraint.limit = parse_value_f64(child)?,
            "weathercase" => constraint.weathercase = parse_value_string(child),
            "condition" => {
                let tag = parse_value_string(child);
                match CableCondition::from_str_attr(&tag) {
                    Some(condition) => constraint.condition = condition,
                    None => {
                        log::error!("line {}: unknown condition '{}'", child.line, tag);
                        return None;
                    }
                }
            }
            _ => {
                warn_unrecognized(child, "cable_constraint");
                status = false;
            }
        }
    }
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn river_crossing() -> Span {
        Span {
            name: "River Crossing".into(),
            line_cable: LineCable {
                cable: "795 ACSR".into(),
                constraint: CableConstraint {
                    limit_type: ConstraintLimitType::Sag,
                    limit: 12.5,
                    weathercase: "Everyday".into(),
                    condition: CableCondition::Initial,
                },
                spacing_attachments: Vector3d::new(500.0, 0.0, 20.0),
            },
            weathercase_stretch_creep: Some("Everyday".into()),
            weathercase_stretch_load: Some("Heavy Ice".into()),
        }
    }

    #[test]
    fn test_roundtrip_latest_version() {
        let original = river_crossing();
        let node = SpanXmlHandler::create_node(&original, UnitSystem::Imperial);
        assert_eq!(node.attribute("version"), Some("2"));

        let mut parsed = Span::default();
        assert!(SpanXmlHandler::parse_node(&node, &mut parsed));
        assert_eq!(parsed.name, original.name);
        assert_eq!(parsed.line_cable.cable, original.line_cable.cable);
        assert_eq!(
            parsed.line_cable.constraint.limit_type,
            ConstraintLimitType::Sag
        );
        assert_relative_eq!(parsed.line_cable.constraint.limit, 12.5);
        assert_relative_eq!(parsed.line_cable.spacing_attachments.z, 20.0);
        assert_eq!(parsed.weathercase_stretch_load.as_deref(), Some("Heavy Ice"));
    }

    #[test]
    fn test_v1_fixture_has_no_stretch_references() {
        let xml = r#"<span version="1">
  <name>Old Span</name>
  <line_cable>
    <cable>795 ACSR</cable>
    <cable_constraint>
      <limit_type>HorizontalTension</limit_type>
      <limit units="lbs">2000</limit>
      <weathercase>Everyday</weathercase>
      <condition>Initial</condition>
    </cable_constraint>
    <spacing_attachments x="450" y="0" z="-10" units="ft"/>
  </line_cable>
</span>"#;
        let node = XmlNode::from_xml_str(xml).unwrap();
        let mut parsed = Span::default();
        assert!(SpanXmlHandler::parse_node(&node, &mut parsed));
        assert_eq!(parsed.name, "Old Span");
        assert_relative_eq!(parsed.line_cable.spacing_attachments.x, 450.0);
        assert_relative_eq!(parsed.line_cable.spacing_attachments.z, -10.0);
        assert!(parsed.weathercase_stretch_creep.is_none());
        assert!(parsed.weathercase_stretch_load.is_none());
    }

    #[test]
    fn test_bad_spacing_attribute_aborts() {
        let mut node = SpanXmlHandler::create_node(&river_crossing(), UnitSystem::Imperial);
        for child in node.children.iter_mut() {
            if child.name == "line_cable" {
                for grandchild in child.children.iter_mut() {
                    if grandchild.name == "spacing_attachments" {
                        grandchild.set_attribute("x", "long");
                    }
                }
            }
        }
        let mut parsed = river_crossing();
        let sentinel = parsed.clone();
        assert!(!SpanXmlHandler::parse_node(&node, &mut parsed));
        assert_eq!(parsed, sentinel);
    }

    #[test]
    fn test_unknown_condition_aborts() {
        let xml = r#"<span version="2">
  <name>s</name>
  <line_cable>
    <cable>c</cable>
    <cable_constraint>
      <limit_type>Sag</limit_type>
      <limit units="ft">10</limit>
      <weathercase>w</weathercase>
      <condition>Relaxed</condition>
    </cable_constraint>
    <spacing_attachments x="1" y="0" z="0"/>
  </line_cable>
</span>"#;
        let node = XmlNode::from_xml_str(xml).unwrap();
        let mut parsed = Span::default();
        assert!(!SpanXmlHandler::parse_node(&node, &mut parsed));
    }
}
