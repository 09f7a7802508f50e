//! XML handler for the analysis document.

use crate::analysis::{AnalysisFilter, AnalysisFilterGroup, CableCondition};
use crate::cable::CableFile;
use crate::document::SpanAnalyzerDoc;
use crate::span::Span;
use crate::types::{UnitStyle, UnitSystem};
use crate::weather::{self, WeatherLoadCase};
use crate::xml::cable::CableFileXmlHandler;
use crate::xml::node::XmlNode;
use crate::xml::span::SpanXmlHandler;
use crate::xml::weather::WeatherLoadCaseXmlHandler;
use crate::xml::{check_root, parse_value_string, parse_version, warn_unrecognized};

const VERSION_LATEST: u32 = 1;

pub struct SpanAnalyzerDocXmlHandler;

impl SpanAnalyzerDocXmlHandler {
    pub fn create_node(doc: &SpanAnalyzerDoc) -> XmlNode {
        let units = doc.units;
        let mut node = XmlNode::new("span_analyzer_doc");
        node.set_attribute("version", VERSION_LATEST);
        node.set_attribute("units", units.as_str());

        let mut cable_files = XmlNode::new("cable_files");
        for file in &doc.cable_files {
            cable_files.add_child(CableFileXmlHandler::create_node(file, units));
        }
        node.add_child(cable_files);

        let mut weathercases = XmlNode::new("weathercases");
        for weathercase in &doc.weathercases {
            let mut out = weathercase.clone();
            // Files keep the human-friendly style
            let _ = weather::convert_unit_style(&mut out, 0, units, UnitStyle::Different);
            weathercases.add_child(WeatherLoadCaseXmlHandler::create_node(&out, units));
        }
        node.add_child(weathercases);

        let mut groups = XmlNode::new("analysis_filter_groups");
        for group in &doc.filter_groups {
            groups.add_child(create_filter_group_node(group));
        }
        node.add_child(groups);

        let mut spans = XmlNode::new("spans");
        for (_, span) in doc.spans.iter() {
            spans.add_child(SpanXmlHandler::create_node(span, units));
        }
        node.add_child(spans);
        node
    }

    /// Parse a document. With `units_target` set, every parsed entity is
    /// rewritten from file units into the target system's consistent basis.
    pub fn parse_node(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        doc: &mut SpanAnalyzerDoc,
    ) -> bool {
        Self::parse_into(node, units_target, doc).unwrap_or(false)
    }

    fn parse_into(
        node: &XmlNode,
        units_target: Option<UnitSystem>,
        doc: &mut SpanAnalyzerDoc,
    ) -> Option<bool> {
        if !check_root(node, "span_analyzer_doc") {
            return None;
        }
        let version = parse_version(node)?;
        if version != VERSION_LATEST {
            log::error!(
                "line {}: unsupported span_analyzer_doc version {}",
                node.line,
                version
            );
            return None;
        }

        let mut status = true;
        let units_file = match node.attribute("units").and_then(UnitSystem::from_str_attr) {
            Some(system) => system,
            None => {
                log::warn!(
                    "line {}: missing or invalid units attribute on <span_analyzer_doc>",
                    node.line
                );
                status = false;
                UnitSystem::Null
            }
        };

        let mut staging = SpanAnalyzerDoc::new(units_file);
        for child in &node.children {
            match child.name.as_str() {
                "cable_files" => {
                    for entry in &child.children {
                        let mut file = CableFile::default();
                        status &= CableFileXmlHandler::parse_into(entry, units_target, &mut file)?;
                        staging.cable_files.push(file);
                    }
                }
                "weathercases" => {
                    for entry in &child.children {
                        let mut weathercase = WeatherLoadCase::default();
                        status &=
                            WeatherLoadCaseXmlHandler::parse_into(entry, &mut weathercase)?;
                        if let Some(target) = units_target {
                            if weather::convert_unit_style(
                                &mut weathercase,
                                version,
                                units_file,
                                UnitStyle::Consistent,
                            )
                            .is_err()
                            {
                                return None;
                            }
                            weather::convert_unit_system(&mut weathercase, units_file, target);
                        }
                        staging.weathercases.push(weathercase);
                    }
                }
                "analysis_filter_groups" => {
                    for entry in &child.children {
                        let (group, group_status) = parse_filter_group(entry)?;
                        status &= group_status;
                        staging.filter_groups.push(group);
                    }
                }
                "spans" => {
                    for entry in &child.children {
                        let mut span = Span::default();
                        status &= SpanXmlHandler::parse_into(entry, &mut span)?;
                        if let Some(target) = units_target {
                            crate::span::convert_unit_system(&mut span, units_file, target, true);
                        }
                        staging.spans.push(span);
                    }
                }
                _ => {
                    warn_unrecognized(child, "span_analyzer_doc");
                    status = false;
                }
            }
        }

        if let Some(target) = units_target {
            staging.units = target;
        }
        *doc = staging;
        Some(status)
    }
}

fn create_filter_group_node(group: &AnalysisFilterGroup) -> XmlNode {
    let mut node = XmlNode::new("analysis_filter_group");
    node.set_attribute("name", &group.name);
    for filter in &group.filters {
        let mut filter_node = XmlNode::new("analysis_filter");
        filter_node.add_child(XmlNode::element("condition", filter.condition.as_str(), ""));
        filter_node.add_child(XmlNode::element("weathercase", &filter.weathercase, ""));
        node.add_child(filter_node);
    }
    node
}

fn parse_filter_group(node: &XmlNode) -> Option<(AnalysisFilterGroup, bool)> {
    if !check_root(node, "analysis_filter_group") {
        return None;
    }
    let mut status = true;
    let mut group = AnalysisFilterGroup {
        name: node.attribute("name").unwrap_or_default().to_string(),
        filters: Vec::new(),
    };
    for child in &node.children {
        if child.name != "analysis_filter" {
            warn_unrecognized(child, "analysis_filter_group");
            status = false;
            continue;
        }
        let Some(condition_tag) = child.child("condition").map(parse_value_string) else {
            log::error!("line {}: analysis_filter without condition", child.line);
            return None;
        };
        let Some(condition) = CableCondition::from_str_attr(&condition_tag) else {
            log::error!("line {}: unknown condition '{}'", child.line, condition_tag);
            return None;
        };
        let Some(weathercase) = child.child("weathercase").map(parse_value_string) else {
            log::error!("line {}: analysis_filter without weathercase", child.line);
            return None;
        };
        group.filters.push(AnalysisFilter {
            condition,
            weathercase,
        });
    }
    Some((group, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cable::Cable;
    use crate::span::{CableConstraint, ConstraintLimitType, LineCable};
    use crate::types::Vector3d;
    use approx::assert_relative_eq;

    fn sample_doc() -> SpanAnalyzerDoc {
        let mut doc = SpanAnalyzerDoc::new(UnitSystem::Imperial);
        doc.cable_files.push(CableFile {
            path: "/cables/795_acsr.cable".into(),
            cable: Cable {
                name: "795 ACSR".into(),
                construction: "ACSR 26/7".into(),
                diameter: 1.108 / 12.0,
                area_physical: 0.7264 / 144.0,
                area_electrical: 0.005516,
                strength_rated: 31500.0,
                temperature_components: 70.0,
                weight_unit: 1.094,
                ..Default::default()
            },
        });
        doc.weathercases.push(WeatherLoadCase {
            description: "Everyday".into(),
            thickness_ice: 0.0,
            density_ice: 57.0,
            pressure_wind: 0.0,
            temperature_cable: 60.0,
        });
        doc.weathercases.push(WeatherLoadCase {
            description: "Heavy Ice".into(),
            thickness_ice: 0.5 / 12.0,
            density_ice: 57.0,
            pressure_wind: 8.0,
            temperature_cable: 0.0,
        });
        doc.filter_groups.push(AnalysisFilterGroup {
            name: "Report".into(),
            filters: vec![
                AnalysisFilter {
                    condition: CableCondition::Initial,
                    weathercase: "Everyday".into(),
                },
                AnalysisFilter {
                    condition: CableCondition::Load,
                    weathercase: "Heavy Ice".into(),
                },
            ],
        });
        doc.spans.push(Span {
            name: "Crossing".into(),
            line_cable: LineCable {
                cable: "795 ACSR".into(),
                constraint: CableConstraint {
                    limit_type: ConstraintLimitType::HorizontalTension,
                    limit: 2000.0,
                    weathercase: "Everyday".into(),
                    condition: CableCondition::Initial,
                },
                spacing_attachments: Vector3d::new(500.0, 0.0, 0.0),
            },
            ..Default::default()
        });
        doc
    }

    #[test]
    fn test_document_roundtrip() {
        let original = sample_doc();
        let xml = SpanAnalyzerDocXmlHandler::create_node(&original)
            .to_xml_string()
            .unwrap();
        let node = XmlNode::from_xml_str(&xml).unwrap();

        let mut parsed = SpanAnalyzerDoc::default();
        assert!(SpanAnalyzerDocXmlHandler::parse_node(
            &node,
            Some(UnitSystem::Imperial),
            &mut parsed
        ));

        assert_eq!(parsed.units, UnitSystem::Imperial);
        assert_eq!(parsed.cable_files.len(), 1);
        assert_eq!(parsed.cable_files[0].cable.name, "795 ACSR");
        assert_relative_eq!(
            parsed.cable_files[0].cable.diameter,
            1.108 / 12.0,
            max_relative = 1e-9
        );

        assert_eq!(parsed.weathercases.len(), 2);
        // Ice thickness returns to the consistent basis (feet)
        assert_relative_eq!(
            parsed.weathercases[1].thickness_ice,
            0.5 / 12.0,
            max_relative = 1e-9
        );

        assert_eq!(parsed.filter_groups.len(), 1);
        assert_eq!(parsed.filter_groups[0].filters.len(), 2);
        assert_eq!(
            parsed.filter_groups[0].filters[1].condition,
            CableCondition::Load
        );

        assert_eq!(parsed.spans.len(), 1);
        assert_relative_eq!(
            parsed.spans.get_at(0).unwrap().line_cable.constraint.limit,
            2000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_document_loads_into_metric_application() {
        let original = sample_doc();
        let node = SpanAnalyzerDocXmlHandler::create_node(&original);

        let mut parsed = SpanAnalyzerDoc::default();
        assert!(SpanAnalyzerDocXmlHandler::parse_node(
            &node,
            Some(UnitSystem::Metric),
            &mut parsed
        ));
        assert_eq!(parsed.units, UnitSystem::Metric);
        assert_relative_eq!(
            parsed
                .spans
                .get_at(0)
                .unwrap()
                .line_cable
                .spacing_attachments
                .x,
            152.4,
            max_relative = 1e-9
        );
        assert_relative_eq!(parsed.weathercases[0].temperature_cable, 15.5556, epsilon = 1e-4);
    }

    #[test]
    fn test_wrong_root_fails() {
        let node = XmlNode::from_xml_str("<project version=\"1\"/>").unwrap();
        let mut parsed = SpanAnalyzerDoc::default();
        assert!(!SpanAnalyzerDocXmlHandler::parse_node(&node, None, &mut parsed));
    }

    #[test]
    fn test_unknown_section_is_nonfatal() {
        let mut node = SpanAnalyzerDocXmlHandler::create_node(&sample_doc());
        node.add_child(XmlNode::new("plot_settings"));

        let mut parsed = SpanAnalyzerDoc::default();
        let status =
            SpanAnalyzerDocXmlHandler::parse_node(&node, Some(UnitSystem::Imperial), &mut parsed);
        assert!(!status);
        assert_eq!(parsed.cable_files.len(), 1);
        assert_eq!(parsed.spans.len(), 1);
    }
}
