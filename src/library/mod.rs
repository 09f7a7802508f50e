//! Cable file library.
//!
//! Loads every `*.cable` XML file from a directory into an ordered list.
//! Individual unreadable files are logged and skipped so one bad file
//! never hides the rest of the directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cable::{Cable, CableFile};
use crate::document::SpanAnalyzerDoc;
use crate::types::UnitSystem;
use crate::xml::node::{XmlError, XmlNode};
use crate::xml::CableXmlHandler;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Cable file failed to parse: {0}")]
    ParseFailed(PathBuf),
}

/// Ordered collection of loaded cable files
#[derive(Debug, Default)]
pub struct CableLibrary {
    files: Vec<CableFile>,
}

impl CableLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all `*.cable` files from a directory, in file-name order.
    /// Files that fail to read or parse are skipped with a log message.
    pub fn from_directory(
        path: impl AsRef<Path>,
        units_target: Option<UnitSystem>,
    ) -> Result<Self, LibraryError> {
        let mut library = Self::new();

        let mut paths: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("cable"))
            .collect();
        paths.sort();

        for path in paths {
            match Self::load_file(&path, units_target) {
                Ok(file) => {
                    log::info!("loaded cable file {}", path.display());
                    library.files.push(file);
                }
                Err(error) => {
                    log::warn!("skipped {}: {}", path.display(), error);
                }
            }
        }
        Ok(library)
    }

    /// Load one standalone `.cable` file (root element `cable`)
    pub fn load_file(
        path: impl AsRef<Path>,
        units_target: Option<UnitSystem>,
    ) -> Result<CableFile, LibraryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let node = XmlNode::from_xml_str(&content)?;

        let mut cable = Cable::default();
        if !CableXmlHandler::parse_node(&node, units_target, &mut cable) {
            return Err(LibraryError::ParseFailed(path.to_path_buf()));
        }
        Ok(CableFile {
            path: path.to_path_buf(),
            cable,
        })
    }

    /// Loaded files, in load order (user-significant, never resorted)
    pub fn files(&self) -> &[CableFile] {
        &self.files
    }

    pub fn add_file(&mut self, file: CableFile) {
        self.files.push(file);
    }

    /// Find a cable by name
    pub fn cable(&self, name: &str) -> Option<&Cable> {
        self.files
            .iter()
            .map(|file| &file.cable)
            .find(|cable| cable.name == name)
    }

    /// Re-resolve a parsed document's cable file paths against the
    /// filesystem, preferring the on-disk cable and keeping the embedded
    /// snapshot when the path is gone
    pub fn resolve_document(doc: &mut SpanAnalyzerDoc, units_target: Option<UnitSystem>) {
        for file in &mut doc.cable_files {
            match Self::load_file(&file.path, units_target) {
                Ok(loaded) => file.cable = loaded.cable,
                Err(error) => {
                    log::warn!(
                        "keeping embedded cable for {}: {}",
                        file.path.display(),
                        error
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cable(name: &str) -> Cable {
        Cable {
            name: name.into(),
            construction: "ACSR".into(),
            diameter: 1.108 / 12.0,
            area_physical: 0.7264 / 144.0,
            weight_unit: 1.094,
            strength_rated: 31500.0,
            temperature_components: 70.0,
            ..Default::default()
        }
    }

    fn write_cable_file(dir: &Path, file_name: &str, cable: &Cable) {
        let xml = CableXmlHandler::create_node(cable, UnitSystem::Imperial)
            .to_xml_string()
            .unwrap();
        fs::write(dir.join(file_name), xml).unwrap();
    }

    #[test]
    fn test_directory_scan_loads_cables() {
        let dir = tempfile::tempdir().unwrap();
        write_cable_file(dir.path(), "b_cable.cable", &sample_cable("B Cable"));
        write_cable_file(dir.path(), "a_cable.cable", &sample_cable("A Cable"));
        fs::write(dir.path().join("notes.txt"), "not a cable").unwrap();

        let library =
            CableLibrary::from_directory(dir.path(), Some(UnitSystem::Imperial)).unwrap();
        assert_eq!(library.files().len(), 2);
        // File-name order
        assert_eq!(library.files()[0].cable.name, "A Cable");
        assert!(library.cable("B Cable").is_some());
        assert!(library.cable("C Cable").is_none());
    }

    #[test]
    fn test_corrupt_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_cable_file(dir.path(), "good.cable", &sample_cable("Good"));
        fs::write(dir.path().join("bad.cable"), "<cable version=\"99\"/>").unwrap();
        fs::write(dir.path().join("worse.cable"), "not xml at all").unwrap();

        let library =
            CableLibrary::from_directory(dir.path(), Some(UnitSystem::Imperial)).unwrap();
        assert_eq!(library.files().len(), 1);
        assert_eq!(library.files()[0].cable.name, "Good");
    }

    #[test]
    fn test_resolve_document_prefers_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_cable_file(dir.path(), "fresh.cable", &sample_cable("Fresh"));

        let mut doc = SpanAnalyzerDoc::new(UnitSystem::Imperial);
        doc.cable_files.push(CableFile {
            path: dir.path().join("fresh.cable"),
            cable: sample_cable("Stale Snapshot"),
        });
        doc.cable_files.push(CableFile {
            path: dir.path().join("missing.cable"),
            cable: sample_cable("Embedded Only"),
        });

        CableLibrary::resolve_document(&mut doc, Some(UnitSystem::Imperial));
        assert_eq!(doc.cable_files[0].cable.name, "Fresh");
        assert_eq!(doc.cable_files[1].cable.name, "Embedded Only");
    }
}
