use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisFilterGroup;
use crate::cable::{self, CableFile};
use crate::span::{CableConstraint, SpanList};
use crate::types::UnitSystem;
use crate::weather::{self, WeatherLoadCase};

/// Application frame placement, persisted for session restore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub x: u32,
    pub y: u32,
    pub is_maximized: bool,
}

/// Application-level configuration.
///
/// Participates in the versioned XML layer like any other entity; holds no
/// calculation state of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanAnalyzerConfig {
    /// Unit system newly loaded documents are converted into
    pub units: UnitSystem,
    pub size_frame: FrameSize,
    /// Directory scanned for `*.cable` files
    pub directory_cables: PathBuf,
}

impl Default for SpanAnalyzerConfig {
    fn default() -> Self {
        Self {
            units: UnitSystem::Imperial,
            size_frame: FrameSize::default(),
            directory_cables: PathBuf::new(),
        }
    }
}

/// The analysis document: everything a saved project file carries.
///
/// Cable files and weathercases are owned here and referenced elsewhere by
/// name/description; list order is user-significant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanAnalyzerDoc {
    /// Unit system the document's values are expressed in
    pub units: UnitSystem,
    pub cable_files: Vec<CableFile>,
    pub weathercases: Vec<WeatherLoadCase>,
    pub filter_groups: Vec<AnalysisFilterGroup>,
    pub spans: SpanList,
}

impl SpanAnalyzerDoc {
    pub fn new(units: UnitSystem) -> Self {
        Self {
            units,
            ..Default::default()
        }
    }

    /// The document's constraint list: one constraint per span, in span
    /// order, gathered from the line cables that own them
    pub fn constraints(&self) -> Vec<&CableConstraint> {
        self.spans
            .iter()
            .map(|(_, span)| &span.line_cable.constraint)
            .collect()
    }

    pub fn weathercase(&self, description: &str) -> Option<&WeatherLoadCase> {
        self.weathercases
            .iter()
            .find(|case| case.description == description)
    }

    pub fn cable(&self, name: &str) -> Option<&crate::cable::Cable> {
        self.cable_files
            .iter()
            .map(|file| &file.cable)
            .find(|cable| cable.name == name)
    }
}

/// Convert a whole document between unit systems
pub fn convert_unit_system(
    doc: &mut SpanAnalyzerDoc,
    system_from: UnitSystem,
    system_to: UnitSystem,
) {
    for file in &mut doc.cable_files {
        cable::conversion::convert_unit_system(&mut file.cable, system_from, system_to, true);
    }
    for weathercase in &mut doc.weathercases {
        weather::convert_unit_system(weathercase, system_from, system_to);
    }
    let ids: Vec<_> = doc.spans.iter().map(|(id, _)| id).collect();
    for id in ids {
        if let Some(span) = doc.spans.get(id) {
            let mut span = span.clone();
            crate::span::convert_unit_system(&mut span, system_from, system_to, true);
            doc.spans.modify(id, span);
        }
    }
    doc.units = system_to;
}
