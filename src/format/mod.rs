//! XML support for attribute blocks and the annotation files that carry them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use label_attributes::format::{AttributeLayout, XmlElement, write_attributes_to_element};
//!
//! let mut object = XmlElement::new("object");
//! write_attributes_to_element(&mut object, Some(&attributes), AttributeLayout::GENERIC);
//! let xml = object.to_xml_string()?;
//! ```

mod attributes_xml;
mod element;
mod voc;

#[cfg(test)]
mod tests;

pub use attributes_xml::{
    ATTRIBUTE_ELEMENT, ATTRIBUTES_ELEMENT, AttributeLayout, KEY_ATTRIBUTE,
    read_attributes_from_element, read_attributes_from_xml, write_attributes_to_element,
};
pub use element::{XmlElement, is_valid_element_name};
pub use voc::{BndBox, ImageSize, VocAnnotation, VocObject};
