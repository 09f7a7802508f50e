//! XML handler for the application configuration.

use std::path::PathBuf;

use crate::document::{FrameSize, SpanAnalyzerConfig};
use crate::types::UnitSystem;
use crate::xml::node::XmlNode;
use crate::xml::{check_root, parse_value_string, parse_version, warn_unrecognized};

const VERSION_LATEST: u32 = 1;

type ConfigParser = fn(&XmlNode, &mut SpanAnalyzerConfig) -> Option<bool>;

const CONFIG_PARSERS: &[(u32, ConfigParser)] =
    &[(1, SpanAnalyzerConfigXmlHandler::parse_node_v1)];

pub struct SpanAnalyzerConfigXmlHandler;

impl SpanAnalyzerConfigXmlHandler {
    pub fn create_node(config: &SpanAnalyzerConfig) -> XmlNode {
        let mut node = XmlNode::new("span_analyzer_config");
        node.set_attribute("version", VERSION_LATEST);
        node.add_child(XmlNode::element("units", config.units.as_str(), ""));

        // Frame placement is a structured value: attributes, not children
        let mut frame = XmlNode::new("size_frame");
        frame.set_attribute("x", config.size_frame.x);
        frame.set_attribute("y", config.size_frame.y);
        frame.set_attribute("is_maximized", config.size_frame.is_maximized);
        node.add_child(frame);

        node.add_child(XmlNode::element(
            "directory_cables",
            config.directory_cables.display().to_string(),
            "",
        ));
        node
    }

    pub fn parse_node(node: &XmlNode, config: &mut SpanAnalyzerConfig) -> bool {
        Self::parse_into(node, config).unwrap_or(false)
    }

    pub(crate) fn parse_into(node: &XmlNode, config: &mut SpanAnalyzerConfig) -> Option<bool> {
        if !check_root(node, "span_analyzer_config") {
            return None;
        }
        let version = parse_version(node)?;
        let Some((_, parser)) = CONFIG_PARSERS.iter().find(|(v, _)| *v == version) else {
            log::error!(
                "line {}: unsupported span_analyzer_config version {}",
                node.line,
                version
            );
            return None;
        };

        let mut staging = SpanAnalyzerConfig::default();
        let status = parser(node, &mut staging)?;
        *config = staging;
        Some(status)
    }

    fn parse_node_v1(node: &XmlNode, staging: &mut SpanAnalyzerConfig) -> Option<bool> {
        let mut status = true;
        for child in &node.children {
            match child.name.as_str() {
                "units" => {
                    let tag = parse_value_string(child);
                    match UnitSystem::from_str_attr(&tag) {
                        Some(units) => staging.units = units,
                        None => {
                            log::error!("line {}: unknown unit system '{}'", child.line, tag);
                            return None;
                        }
                    }
                }
                "size_frame" => staging.size_frame = parse_frame_size(child)?,
                "directory_cables" => {
                    staging.directory_cables = PathBuf::from(parse_value_string(child));
                }
                _ => {
                    warn_unrecognized(child, "span_analyzer_config");
                    status = false;
                }
            }
        }
        Some(status)
    }
}

fn parse_frame_size(node: &XmlNode) -> Option<FrameSize> {
    let parse_u32 = |name: &str| -> Option<u32> {
        let value = node.attribute(name)?;
        value.parse::<u32>().ok()
    };
    let Some(x) = parse_u32("x") else {
        log::error!("line {}: missing/invalid frame attribute 'x'", node.line);
        return None;
    };
    let Some(y) = parse_u32("y") else {
        log::error!("line {}: missing/invalid frame attribute 'y'", node.line);
        return None;
    };
    let is_maximized = match node.attribute("is_maximized") {
        Some("true") => true,
        Some("false") | None => false,
        Some(other) => {
            log::error!(
                "line {}: invalid frame attribute is_maximized='{}'",
                node.line,
                other
            );
            return None;
        }
    };
    Some(FrameSize { x, y, is_maximized })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = SpanAnalyzerConfig {
            units: UnitSystem::Metric,
            size_frame: FrameSize {
                x: 1280,
                y: 800,
                is_maximized: true,
            },
            directory_cables: PathBuf::from("/srv/cables"),
        };
        let node = SpanAnalyzerConfigXmlHandler::create_node(&original);
        let xml = node.to_xml_string().unwrap();
        let reparsed = XmlNode::from_xml_str(&xml).unwrap();

        let mut parsed = SpanAnalyzerConfig::default();
        assert!(SpanAnalyzerConfigXmlHandler::parse_node(&reparsed, &mut parsed));
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_invalid_frame_aborts() {
        let mut node =
            SpanAnalyzerConfigXmlHandler::create_node(&SpanAnalyzerConfig::default());
        for child in node.children.iter_mut() {
            if child.name == "size_frame" {
                child.set_attribute("is_maximized", "sideways");
            }
        }
        let mut parsed = SpanAnalyzerConfig::default();
        assert!(!SpanAnalyzerConfigXmlHandler::parse_node(&node, &mut parsed));
    }

    #[test]
    fn test_unknown_version_fails() {
        let mut node =
            SpanAnalyzerConfigXmlHandler::create_node(&SpanAnalyzerConfig::default());
        node.set_attribute("version", "99");
        let mut parsed = SpanAnalyzerConfig::default();
        assert!(!SpanAnalyzerConfigXmlHandler::parse_node(&node, &mut parsed));
    }
}
