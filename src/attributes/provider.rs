//! Definition providers.
//!
//! A provider hands out the definitions of the three attribute scopes. Only
//! the label scope is populated by the built-in providers; the global and
//! per-image scopes are extension points.

use std::collections::HashSet;

use super::definition::{AttributeDefinition, Definitions, NO, WidgetKind, parse_kind};
use super::message::{AttributeChange, AttributeMessage};
use crate::config::AttributeDefinitionConfig;
use crate::error::AttributeError;

/// Source of attribute definitions for each scope.
pub trait DefinitionProvider {
    /// Attributes attached to the whole dataset.
    fn global_attribute_definitions(&mut self) -> Definitions {
        Definitions::new()
    }

    /// Attributes attached to a single image.
    fn image_attribute_definitions(&mut self) -> Definitions {
        Definitions::new()
    }

    /// Attributes attached to an annotation label.
    fn label_attribute_definitions(&mut self) -> Result<Definitions, AttributeError>;
}

/// Hands out increasing display positions so definitions keep their source order.
#[derive(Debug, Clone, Default)]
pub struct OrderSequence {
    last: u32,
}

impl OrderSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next position, starting at 1.
    pub fn next_index(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}

/// Action used by label widgets: synchronize the key into the selected shape.
pub fn label_action(
    key: &str,
    kind: WidgetKind,
) -> impl Fn(AttributeChange) -> AttributeMessage + 'static {
    let is_button = kind == WidgetKind::Button;
    let key = key.to_string();
    move |_change| {
        if is_button {
            AttributeMessage::ButtonPressed { key: key.clone() }
        } else {
            AttributeMessage::LabelAttributeChanged { key: key.clone() }
        }
    }
}

/// Yes/no questions asked about every labeled figure, in display order.
pub const LABEL_ATTRIBUTES: &[(&str, &str)] = &[
    ("numbers", "Does the image contain numbers?"),
    ("letters", "Does the image contain Latin letters?"),
    (
        "symbols",
        "Does the image contain math symbols (including Greek letters and punctuation marks)?",
    ),
    ("lines", "Does the image contain any lines?"),
    ("arrows", "Does the image contain any arrows?"),
    ("points", "Does the image contain any points?"),
    ("colors", "Does the image contain colors?"),
    (
        "fills",
        "Does the image contain any graytoned, filled or shaded areas?",
    ),
    ("caption", "Is the image captioned (with or without a caption text)?"),
];

/// Built-in label attributes: one checkbox per [`LABEL_ATTRIBUTES`] entry, default "no".
#[derive(Debug, Default)]
pub struct LabelAttributeDefinitions {
    sequence: OrderSequence,
}

impl LabelAttributeDefinitions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DefinitionProvider for LabelAttributeDefinitions {
    fn label_attribute_definitions(&mut self) -> Result<Definitions, AttributeError> {
        let definitions = LABEL_ATTRIBUTES
            .iter()
            .map(|(key, tooltip)| {
                let definition = AttributeDefinition::checkbox()
                    .with_order(self.sequence.next_index())
                    .with_tooltip(*tooltip)
                    .with_default(NO)
                    .on_change(label_action(key, WidgetKind::Checkbox));
                (key.to_string(), definition)
            })
            .collect();
        Ok(definitions)
    }
}

/// Label attributes declared in a configuration file.
#[derive(Debug, Default)]
pub struct ConfiguredDefinitions {
    label_attributes: Vec<AttributeDefinitionConfig>,
    sequence: OrderSequence,
}

impl ConfiguredDefinitions {
    pub fn new(label_attributes: Vec<AttributeDefinitionConfig>) -> Self {
        Self {
            label_attributes,
            sequence: OrderSequence::new(),
        }
    }
}

impl DefinitionProvider for ConfiguredDefinitions {
    fn label_attribute_definitions(&mut self) -> Result<Definitions, AttributeError> {
        let mut seen = HashSet::new();
        let mut definitions = Definitions::new();

        for entry in &self.label_attributes {
            if !seen.insert(entry.key.as_str()) {
                return Err(AttributeError::invalid_definition(
                    &entry.key,
                    "declared more than once",
                ));
            }

            let kind = parse_kind(&entry.key, &entry.kind)?;
            let order = match entry.order {
                Some(order) => order,
                None => self.sequence.next_index(),
            };

            let mut definition = AttributeDefinition::new(kind)
                .with_order(order)
                .on_change(label_action(&entry.key, kind));
            definition.tooltip = entry.tooltip.clone();
            definition.default = entry.default.clone();
            definition.choices = entry.choices.clone();

            definitions.insert(entry.key.clone(), definition);
        }

        Ok(definitions)
    }
}
