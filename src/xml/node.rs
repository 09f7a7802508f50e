//! Generic XML element tree over quick-xml events.

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document contains no root element")]
    MissingRoot,
    #[error("Unexpected end of document")]
    UnexpectedEof,
}

/// One XML element: name, attributes, optional text content, children.
///
/// `line` is the 1-based source line of the start tag, carried for
/// diagnostics; it is zero on programmatically built nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
    pub line: usize,
}

impl XmlNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Leaf data node: text content plus a descriptive `units` attribute
    /// (empty `units` emits no attribute)
    pub fn element(name: &str, value: impl Display, units: &str) -> Self {
        let mut node = Self::new(name);
        if !units.is_empty() {
            node.set_attribute("units", units);
        }
        node.text = Some(value.to_string());
        node
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Display) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn add_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// First child with the given element name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Serialize to a standalone document with declaration and indentation
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_node(&mut writer, self)?;
        let bytes = writer.into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parse the first root element of a document
    pub fn from_xml_str(input: &str) -> Result<XmlNode, XmlError> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<XmlNode> = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let node = node_from_start(&start, line_at(input, &reader))?;
                    stack.push(node);
                }
                Event::Empty(start) => {
                    let node = node_from_start(&start, line_at(input, &reader))?;
                    match stack.last_mut() {
                        Some(parent) => parent.add_child(node),
                        None => return Ok(node),
                    }
                }
                Event::Text(text) => {
                    if let Some(top) = stack.last_mut() {
                        let content = text.unescape().map_err(quick_xml::Error::from)?;
                        if !content.trim().is_empty() {
                            top.text = Some(content.trim().to_string());
                        }
                    }
                }
                Event::End(_) => {
                    let node = stack.pop().ok_or(XmlError::UnexpectedEof)?;
                    match stack.last_mut() {
                        Some(parent) => parent.add_child(node),
                        None => return Ok(node),
                    }
                }
                Event::Eof => {
                    return Err(if stack.is_empty() {
                        XmlError::MissingRoot
                    } else {
                        XmlError::UnexpectedEof
                    });
                }
                // Declarations, comments, processing instructions, CDATA
                _ => {}
            }
        }
    }
}

fn node_from_start(start: &BytesStart, line: usize) -> Result<XmlNode, XmlError> {
    let mut node = XmlNode::new(&String::from_utf8_lossy(start.name().as_ref()));
    node.line = line;
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn line_at(input: &str, reader: &Reader<&[u8]>) -> usize {
    let position = (reader.buffer_position() as usize).min(input.len());
    1 + input[..position].bytes().filter(|b| *b == b'\n').count()
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<(), XmlError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}
