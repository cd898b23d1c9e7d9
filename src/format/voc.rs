//! Pascal VOC XML annotation files with per-object attribute blocks.
//!
//! Each `<object>` may carry an `<attributes>` block holding the label
//! attributes edited in the panel. Files written before attributes existed
//! simply have no such block.

use super::attributes_xml::{
    ATTRIBUTES_ELEMENT, AttributeLayout, read_attributes_from_element, write_attributes_to_element,
};
use super::element::XmlElement;
use crate::attributes::AttributeMap;
use crate::error::AttributeError;

/// Image dimensions as recorded in `<size>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of channels, 3 when not recorded
    pub depth: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            depth: 3,
        }
    }
}

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BndBox {
    /// Corners, inclusive
    pub xmin: u32,
    pub ymin: u32,
    pub xmax: u32,
    pub ymax: u32,
}

/// One labeled object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocObject {
    /// Class label
    pub name: String,
    /// Free-form pose, `"Unspecified"` by default
    pub pose: String,
    /// Object extends past the image border
    pub truncated: bool,
    /// Object is hard to recognize
    pub difficult: bool,
    /// Bounding box
    pub bndbox: BndBox,
    /// `None` when the object has no attribute block
    pub attributes: Option<AttributeMap>,
}

impl VocObject {
    /// Object with default pose and flags and no attribute block.
    pub fn new(name: impl Into<String>, bndbox: BndBox) -> Self {
        Self {
            name: name.into(),
            pose: "Unspecified".to_string(),
            truncated: false,
            difficult: false,
            bndbox,
            attributes: None,
        }
    }

    /// Attach an attribute block.
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// A Pascal VOC annotation file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocAnnotation {
    /// Directory of the image
    pub folder: String,
    /// Image file name
    pub filename: String,
    /// Full image path, when recorded
    pub path: Option<String>,
    /// Image dimensions
    pub size: ImageSize,
    /// Whether a segmentation mask exists
    pub segmented: bool,
    /// Labeled objects in document order
    pub objects: Vec<VocObject>,
}

impl VocAnnotation {
    /// Empty annotation for one image.
    pub fn new(folder: impl Into<String>, filename: impl Into<String>, size: ImageSize) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            size,
            ..Self::default()
        }
    }

    /// Build the `<annotation>` element tree.
    pub fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new("annotation");
        root.push_text_element("folder", self.folder.as_str());
        root.push_text_element("filename", self.filename.as_str());
        if let Some(path) = &self.path {
            root.push_text_element("path", path.as_str());
        }
        root.sub_element("source")
            .push_text_element("database", "Unknown");

        let size = root.sub_element("size");
        size.push_text_element("width", self.size.width.to_string());
        size.push_text_element("height", self.size.height.to_string());
        size.push_text_element("depth", self.size.depth.to_string());

        root.push_text_element("segmented", flag(self.segmented));

        for object in &self.objects {
            let element = root.sub_element("object");
            element.push_text_element("name", object.name.as_str());
            element.push_text_element("pose", object.pose.as_str());
            element.push_text_element("truncated", flag(object.truncated));
            element.push_text_element("difficult", flag(object.difficult));

            let bndbox = element.sub_element("bndbox");
            bndbox.push_text_element("xmin", object.bndbox.xmin.to_string());
            bndbox.push_text_element("ymin", object.bndbox.ymin.to_string());
            bndbox.push_text_element("xmax", object.bndbox.xmax.to_string());
            bndbox.push_text_element("ymax", object.bndbox.ymax.to_string());

            write_attributes_to_element(
                element,
                object.attributes.as_ref(),
                AttributeLayout::GENERIC,
            );
        }

        root
    }

    /// Serialize to an XML document.
    pub fn to_xml(&self) -> Result<String, AttributeError> {
        log::info!(
            "Writing VOC annotation for '{}' with {} objects",
            self.filename,
            self.objects.len()
        );
        self.to_element().to_xml_document()
    }

    /// Read an `<annotation>` element tree.
    ///
    /// Missing metadata falls back to defaults. An object without a name or a
    /// complete box is an error; its attribute block never is.
    pub fn from_element(root: &XmlElement) -> Result<Self, AttributeError> {
        if root.name != "annotation" {
            return Err(AttributeError::invalid_format(format!(
                "Expected <annotation> root, found <{}>",
                root.name
            )));
        }

        let mut annotation = VocAnnotation {
            folder: root.child_text("folder").unwrap_or_default().to_string(),
            filename: root.child_text("filename").unwrap_or_default().to_string(),
            path: root.child_text("path").map(str::to_string),
            segmented: root.child_text("segmented").is_some_and(parse_flag),
            ..VocAnnotation::default()
        };

        if let Some(size) = root.find("size") {
            annotation.size = ImageSize {
                width: optional_number(size, "width")?.unwrap_or(0),
                height: optional_number(size, "height")?.unwrap_or(0),
                depth: optional_number(size, "depth")?.unwrap_or(3),
            };
        }

        for element in root.find_all("object") {
            annotation.objects.push(parse_object(element)?);
        }

        Ok(annotation)
    }

    /// Parse an XML document.
    pub fn from_xml(xml: &str) -> Result<Self, AttributeError> {
        let annotation = Self::from_element(&XmlElement::parse(xml)?)?;
        log::info!(
            "Read VOC annotation for '{}' with {} objects",
            annotation.filename,
            annotation.objects.len()
        );
        Ok(annotation)
    }
}

fn parse_object(element: &XmlElement) -> Result<VocObject, AttributeError> {
    let name = element
        .child_text("name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AttributeError::missing_field("object/name"))?;

    let bndbox = element
        .find("bndbox")
        .ok_or_else(|| AttributeError::missing_field("object/bndbox"))?;

    let mut object = VocObject::new(
        name,
        BndBox {
            xmin: required_number(bndbox, "xmin")?,
            ymin: required_number(bndbox, "ymin")?,
            xmax: required_number(bndbox, "xmax")?,
            ymax: required_number(bndbox, "ymax")?,
        },
    );
    if let Some(pose) = element.child_text("pose") {
        object.pose = pose.to_string();
    }
    object.truncated = element.child_text("truncated").is_some_and(parse_flag);
    object.difficult = element.child_text("difficult").is_some_and(parse_flag);

    if element.find(ATTRIBUTES_ELEMENT).is_some() {
        let mut attributes = AttributeMap::new();
        read_attributes_from_element(element, &mut attributes);
        object.attributes = Some(attributes);
    }

    Ok(object)
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn parse_flag(text: &str) -> bool {
    text.trim() == "1"
}

/// Coordinates may be written as floats by other tools; they are rounded.
fn parse_number(field: &str, text: &str) -> Result<u32, AttributeError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| AttributeError::invalid_format(format!("Invalid {field}: '{text}'")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AttributeError::invalid_format(format!(
            "Invalid {field}: '{text}'"
        )));
    }
    let rounded = value.round();
    if rounded > f64::from(u32::MAX) {
        return Err(AttributeError::invalid_format(format!(
            "{field} out of range: '{text}'"
        )));
    }
    Ok(rounded as u32)
}

fn optional_number(parent: &XmlElement, field: &str) -> Result<Option<u32>, AttributeError> {
    parent
        .child_text(field)
        .map(|text| parse_number(field, text))
        .transpose()
}

fn required_number(parent: &XmlElement, field: &str) -> Result<u32, AttributeError> {
    optional_number(parent, field)?.ok_or_else(|| AttributeError::missing_field(field))
}
