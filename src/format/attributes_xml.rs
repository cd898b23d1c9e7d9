//! Attribute blocks inside annotation XML.
//!
//! The generic layout nests one `<attribute key="...">value</attribute>` per
//! entry inside an `<attributes>` element:
//!
//! ```xml
//! <attributes>
//!   <attribute key="numbers">yes</attribute>
//!   <attribute key="caption">no</attribute>
//! </attributes>
//! ```
//!
//! Writers can also drop either level of wrapping, naming each element after
//! its key instead, to match files produced by other tools. Reading only
//! understands the generic layout.

use super::element::{XmlElement, is_valid_element_name};
use crate::attributes::AttributeMap;

/// Name of the element wrapping all attributes.
pub const ATTRIBUTES_ELEMENT: &str = "attributes";
/// Name of the element holding a single attribute in the generic layout.
pub const ATTRIBUTE_ELEMENT: &str = "attribute";
/// XML attribute carrying the attribute key in the generic layout.
pub const KEY_ATTRIBUTE: &str = "key";

/// How attribute entries are nested when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Collect entries in an `<attributes>` element instead of the parent itself
    pub wrap_in_attributes_element: bool,
    /// Write `<attribute key="k">` elements instead of elements named after the key
    pub wrap_each_in_attribute_element: bool,
}

impl AttributeLayout {
    /// `<attributes><attribute key="k">v</attribute></attributes>`
    pub const GENERIC: Self = Self {
        wrap_in_attributes_element: true,
        wrap_each_in_attribute_element: true,
    };

    /// `<attributes><k>v</k></attributes>`
    pub const NAMED: Self = Self {
        wrap_in_attributes_element: true,
        wrap_each_in_attribute_element: false,
    };
}

impl Default for AttributeLayout {
    fn default() -> Self {
        Self::GENERIC
    }
}

/// Append `attributes` to `parent` using `layout`.
///
/// Nothing is written for a missing or empty map. In the named layouts, keys
/// that are not valid element names are skipped with a warning.
pub fn write_attributes_to_element(
    parent: &mut XmlElement,
    attributes: Option<&AttributeMap>,
    layout: AttributeLayout,
) {
    let Some(attributes) = attributes.filter(|a| !a.is_empty()) else {
        log::info!("No attributes to write for <{}>", parent.name);
        return;
    };

    let container = if layout.wrap_in_attributes_element {
        parent.sub_element(ATTRIBUTES_ELEMENT)
    } else {
        parent
    };

    for (key, value) in attributes {
        if layout.wrap_each_in_attribute_element {
            let element = container.sub_element(ATTRIBUTE_ELEMENT);
            element.set(KEY_ATTRIBUTE, key.as_str());
            element.text = Some(value.clone());
        } else if is_valid_element_name(key) {
            container.push_text_element(key.as_str(), value.as_str());
        } else {
            log::warn!("Skipping attribute '{}': not a valid element name", key);
        }
    }
}

/// Read a generic-layout attribute block of `parent` into `attributes`.
///
/// Best effort: a missing `<attributes>` element leaves the map untouched, and
/// entries without a key are skipped with a warning. Entries without text read
/// as the empty string.
pub fn read_attributes_from_element(parent: &XmlElement, attributes: &mut AttributeMap) {
    let Some(block) = parent.find(ATTRIBUTES_ELEMENT) else {
        return;
    };

    for element in block.find_all(ATTRIBUTE_ELEMENT) {
        match element.get(KEY_ATTRIBUTE) {
            Some(key) => {
                attributes.insert(key.to_string(), element.text().to_string());
            }
            None => log::warn!("Failed to read attribute: <{}> without key", ATTRIBUTE_ELEMENT),
        }
    }
}

/// Parse `xml` as a parent element and read its attribute block.
///
/// Errors are logged and swallowed so that a corrupt block never aborts
/// loading. Returns whether the fragment could be parsed.
pub fn read_attributes_from_xml(xml: &str, attributes: &mut AttributeMap) -> bool {
    match XmlElement::parse(xml) {
        Ok(parent) => {
            read_attributes_from_element(&parent, attributes);
            true
        }
        Err(e) => {
            log::warn!("Failed to read attributes: {}", e);
            false
        }
    }
}
