//! Minimal owned XML element tree.
//!
//! Annotation files are small, so they are read into a tree of
//! [`XmlElement`]s, edited in place and written back out. Parsing and writing
//! use `quick-xml` events.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::AttributeError;

/// An XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Character data directly inside the element, `None` when there is none
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Element holding only text.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Value of the attribute `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set the attribute `key`, replacing an existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// First child named `name`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find(name).map(XmlElement::text)
    }

    /// Text content, empty when there is none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Append a new child named `name` and return it.
    pub fn sub_element(&mut self, name: impl Into<String>) -> &mut XmlElement {
        self.children.push(XmlElement::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a child holding only text.
    pub fn push_text_element(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.children.push(XmlElement::with_text(name, text));
    }

    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<Self, AttributeError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| AttributeError::invalid_format("Unexpected closing tag"))?;
                    element.normalize_text();
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e.unescape()?;
                        current.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let data = e.into_inner();
                        current
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(AttributeError::Xml(e)),
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(AttributeError::invalid_format(format!(
                "Unclosed element '{}'",
                open.name
            )));
        }
        root.ok_or_else(|| AttributeError::invalid_format("Document has no root element"))
    }

    /// Serialize as an indented document with an XML declaration.
    pub fn to_xml_document(&self) -> Result<String, AttributeError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| AttributeError::Xml(e.into()))?;
        self.write_to(&mut writer)?;
        into_string(writer)
    }

    /// Serialize as an indented fragment.
    pub fn to_xml_string(&self) -> Result<String, AttributeError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_to(&mut writer)?;
        into_string(writer)
    }

    /// Write this element and its subtree as events.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), AttributeError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() && self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| AttributeError::Xml(e.into()))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| AttributeError::Xml(e.into()))?;
        if let Some(text) = text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| AttributeError::Xml(e.into()))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| AttributeError::Xml(e.into()))?;
        Ok(())
    }

    /// Drop formatting whitespace around children and empty text.
    fn normalize_text(&mut self) {
        let blank = match &self.text {
            Some(text) => text.is_empty() || (!self.children.is_empty() && text.trim().is_empty()),
            None => false,
        };
        if blank {
            self.text = None;
        }
    }
}

/// Whether `name` can be used as an element name.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if name.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml")) {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, AttributeError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), AttributeError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(AttributeError::invalid_format("Multiple root elements"));
    }
    Ok(())
}

fn into_string<W: Into<Vec<u8>>>(writer: Writer<W>) -> Result<String, AttributeError> {
    String::from_utf8(writer.into_inner().into())
        .map_err(|_| AttributeError::invalid_format("Invalid UTF-8 in XML"))
}
