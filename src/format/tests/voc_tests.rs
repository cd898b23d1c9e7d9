//! Tests for Pascal VOC files carrying attribute blocks.

use crate::attributes::AttributeMap;
use crate::error::AttributeError;
use crate::format::{BndBox, ImageSize, VocAnnotation, VocObject};

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Create an annotation with one attributed and one plain object.
fn create_annotation() -> VocAnnotation {
    let mut annotation = VocAnnotation::new(
        "figures",
        "page_001.png",
        ImageSize {
            width: 640,
            height: 480,
            depth: 3,
        },
    );
    annotation.path = Some("/data/figures/page_001.png".into());

    annotation.objects.push(
        VocObject::new(
            "diagram",
            BndBox {
                xmin: 10,
                ymin: 20,
                xmax: 300,
                ymax: 200,
            },
        )
        .with_attributes(attrs(&[("numbers", "yes"), ("caption", "no")])),
    );

    let mut table = VocObject::new(
        "table",
        BndBox {
            xmin: 5,
            ymin: 250,
            xmax: 600,
            ymax: 470,
        },
    );
    table.difficult = true;
    annotation.objects.push(table);

    annotation
}

#[test]
fn test_voc_roundtrip() {
    let annotation = create_annotation();
    let xml = annotation.to_xml().unwrap();
    let parsed = VocAnnotation::from_xml(&xml).unwrap();
    assert_eq!(parsed, annotation);
}

#[test]
fn test_voc_attribute_block_written_per_object() {
    let xml = create_annotation().to_xml().unwrap();
    assert_eq!(xml.matches("<attributes>").count(), 1);
    assert!(xml.contains(r#"<attribute key="numbers">yes</attribute>"#));
    assert!(xml.contains("<bndbox>"));
}

#[test]
fn test_voc_file_without_attributes() {
    let xml = r#"<annotation>
  <folder>VOC2012</folder>
  <filename>2007_000027.jpg</filename>
  <size><width>486</width><height>500</height><depth>3</depth></size>
  <segmented>0</segmented>
  <object>
    <name>person</name>
    <pose>Unspecified</pose>
    <truncated>0</truncated>
    <difficult>0</difficult>
    <bndbox><xmin>174</xmin><ymin>101</ymin><xmax>349.6</xmax><ymax>351</ymax></bndbox>
  </object>
</annotation>"#;

    let annotation = VocAnnotation::from_xml(xml).unwrap();
    assert_eq!(annotation.size.width, 486);
    assert_eq!(annotation.objects.len(), 1);
    let person = &annotation.objects[0];
    assert_eq!(person.bndbox.xmax, 350);
    assert_eq!(person.attributes, None);
}

#[test]
fn test_voc_damaged_attribute_block_does_not_fail_load() {
    let xml = r#"<annotation>
  <filename>a.png</filename>
  <object>
    <name>diagram</name>
    <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
    <attributes>
      <attribute>no key here</attribute>
      <attribute key="lines">yes</attribute>
    </attributes>
  </object>
</annotation>"#;

    let annotation = VocAnnotation::from_xml(xml).unwrap();
    assert_eq!(
        annotation.objects[0].attributes,
        Some(attrs(&[("lines", "yes")]))
    );
}

#[test]
fn test_voc_wrong_root() {
    let err = VocAnnotation::from_xml("<dataset/>").unwrap_err();
    assert!(matches!(err, AttributeError::InvalidFormat { .. }));
}

#[test]
fn test_voc_object_requires_box() {
    let xml = "<annotation><object><name>x</name></object></annotation>";
    let err = VocAnnotation::from_xml(xml).unwrap_err();
    assert!(matches!(err, AttributeError::MissingField { .. }));
}

#[test]
fn test_voc_bad_coordinate() {
    let xml = r#"<annotation><object><name>x</name>
        <bndbox><xmin>a</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
    </object></annotation>"#;
    assert!(VocAnnotation::from_xml(xml).is_err());
}

#[test]
fn test_voc_coordinate_out_of_range() {
    let xml = r#"<annotation><object><name>x</name>
        <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>5e12</xmax><ymax>4</ymax></bndbox>
    </object></annotation>"#;
    let err = VocAnnotation::from_xml(xml).unwrap_err();
    assert!(matches!(err, AttributeError::InvalidFormat { .. }));
}

#[test]
fn test_voc_unparsable_document() {
    let err = VocAnnotation::from_xml("<annotation><object>").unwrap_err();
    assert!(matches!(err, AttributeError::InvalidFormat { .. }));
}
