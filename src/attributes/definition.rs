//! Declarative attribute definitions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use super::callback::Callback;
use super::message::{AttributeChange, AttributeMessage};
use crate::error::AttributeError;

/// Attribute values of one shape, keyed by attribute name.
///
/// Absent keys mean "unset", not "default". Booleans are stored as `"yes"`/`"no"`.
pub type AttributeMap = BTreeMap<String, String>;

/// Definitions keyed by attribute name. Display order comes from
/// [`AttributeDefinition::order`], not from the map.
pub type Definitions = HashMap<String, AttributeDefinition>;

/// Action invoked when the widget built from a definition fires.
pub type AttributeAction = Callback<AttributeChange, AttributeMessage>;

/// String encoding of a checked state.
pub const YES: &str = "yes";
/// String encoding of an unchecked state.
pub const NO: &str = "no";

/// Encode a boolean as an attribute value.
pub fn yes_no(checked: bool) -> &'static str {
    if checked { YES } else { NO }
}

/// The kind of control an attribute is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetKind {
    /// Single-line editable text field
    #[default]
    Text,
    /// Push button labeled with the key
    Button,
    /// Radio button labeled with the key
    Radio,
    /// Checkbox labeled with the key
    Checkbox,
    /// Drop-down list of choices
    Combo,
}

impl WidgetKind {
    /// Identifier used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Button => "button",
            WidgetKind::Radio => "radio",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Combo => "combo",
        }
    }

    /// All widget kinds.
    pub fn all() -> &'static [WidgetKind] {
        &[
            WidgetKind::Text,
            WidgetKind::Button,
            WidgetKind::Radio,
            WidgetKind::Checkbox,
            WidgetKind::Combo,
        ]
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown widget kind '{s}'"))
    }
}

/// Parse a widget kind from configuration, attributing failures to `key`.
pub fn parse_kind(key: &str, kind: &str) -> Result<WidgetKind, AttributeError> {
    kind.parse()
        .map_err(|message: String| AttributeError::invalid_definition(key, message))
}

/// Declarative description of one attribute's widget and default.
#[derive(Debug, Clone, Default)]
pub struct AttributeDefinition {
    /// Display position; definitions without one sort after all ordered ones, by key
    pub order: Option<u32>,
    /// Tooltip attached verbatim to the control
    pub tooltip: Option<String>,
    /// Control kind
    pub kind: WidgetKind,
    /// `"yes"`/`"no"` for boolean kinds, any string otherwise
    pub default: Option<String>,
    /// Choices of a combo box, in display order
    pub choices: Vec<String>,
    /// Handler invoked when the control fires
    pub action: AttributeAction,
}

impl AttributeDefinition {
    /// Create a definition for the given control kind.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Text field definition.
    pub fn text() -> Self {
        Self::new(WidgetKind::Text)
    }

    /// Push button definition.
    pub fn button() -> Self {
        Self::new(WidgetKind::Button)
    }

    /// Radio button definition.
    pub fn radio() -> Self {
        Self::new(WidgetKind::Radio)
    }

    /// Checkbox definition.
    pub fn checkbox() -> Self {
        Self::new(WidgetKind::Checkbox)
    }

    /// Create a combo box definition with its choices.
    pub fn combo<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ..Self::new(WidgetKind::Combo)
        }
    }

    /// Set the display position.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the tooltip text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Set the initial value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach the handler invoked when the control fires.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(AttributeChange) -> AttributeMessage + 'static,
    {
        self.action = Callback::new(f);
        self
    }
}

/// Sort definitions for display: explicit orders ascending, then the rest by key.
pub fn sorted_definitions(definitions: &Definitions) -> Vec<(&str, &AttributeDefinition)> {
    let mut sorted: Vec<_> = definitions
        .iter()
        .map(|(key, definition)| (key.as_str(), definition))
        .collect();
    sorted.sort_by(|(a_key, a), (b_key, b)| {
        (a.order.is_none(), a.order, *a_key).cmp(&(b.order.is_none(), b.order, *b_key))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("checkbox".parse::<WidgetKind>(), Ok(WidgetKind::Checkbox));
        assert_eq!("combo".parse::<WidgetKind>(), Ok(WidgetKind::Combo));
        assert!("slider".parse::<WidgetKind>().is_err());
    }

    #[test]
    fn test_parse_kind_reports_key() {
        let err = parse_kind("caption", "slider").unwrap_err();
        match err {
            AttributeError::InvalidDefinition { key, .. } => assert_eq!(key, "caption"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }

    #[test]
    fn test_sorted_by_order_then_key() {
        let mut defs = Definitions::new();
        defs.insert("zeta".into(), AttributeDefinition::text().with_order(1));
        defs.insert("alpha".into(), AttributeDefinition::text().with_order(3));
        defs.insert("mid".into(), AttributeDefinition::text().with_order(2));
        defs.insert("b_free".into(), AttributeDefinition::text());
        defs.insert("a_free".into(), AttributeDefinition::text());

        let keys: Vec<_> = sorted_definitions(&defs).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "mid", "alpha", "a_free", "b_free"]);
    }

    #[test]
    fn test_combo_builder() {
        let def = AttributeDefinition::combo(["low", "high"]).with_default("high");
        assert_eq!(def.kind, WidgetKind::Combo);
        assert_eq!(def.choices, vec!["low".to_string(), "high".to_string()]);
        assert_eq!(def.default.as_deref(), Some("high"));
        assert!(def.action.is_none());
    }
}
