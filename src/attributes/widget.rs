//! Attribute widget instances.
//!
//! Each definition becomes one [`AttributeWidget`] whose kind-specific state
//! lives in the closed [`WidgetState`] enum. Reading and writing values is a
//! match over that enum, so every kind a widget can have is handled.

use super::definition::{AttributeAction, AttributeDefinition, WidgetKind, YES, yes_no};
use super::message::{WidgetEvent, WidgetInput};

/// Single-line editable text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    /// Current contents
    pub text: String,
}

/// Push button. Holds no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushButton {
    /// Caption, the attribute key
    pub label: String,
}

/// Two-state control shared by checkboxes and radio buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toggle {
    /// Caption, the attribute key
    pub label: String,
    /// Whether the control is checked
    pub checked: bool,
}

/// Drop-down list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboBox {
    /// Entries in display order
    pub choices: Vec<String>,
    /// Index of the displayed choice; `None` shows an empty box
    pub current: Option<usize>,
    /// Value stored into a shape that has no value for this attribute yet
    pub default_value: String,
}

impl ComboBox {
    /// Text of the displayed choice, empty when nothing is shown.
    pub fn current_text(&self) -> &str {
        self.current
            .and_then(|i| self.choices.get(i))
            .map_or("", String::as_str)
    }

    /// Show the choice matching `text`, or nothing if no choice matches.
    pub fn select_text(&mut self, text: &str) {
        self.current = self.choices.iter().position(|c| c == text);
    }
}

/// Kind-specific state of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState {
    /// Text field
    Text(TextField),
    /// Push button
    Button(PushButton),
    /// Radio button, exclusive with the panel's other radio buttons
    Radio(Toggle),
    /// Checkbox
    Checkbox(Toggle),
    /// Combo box
    Combo(ComboBox),
}

/// A live control bound to one attribute key.
#[derive(Debug, Clone)]
pub struct AttributeWidget {
    /// Kind-specific state
    pub state: WidgetState,
    /// Tooltip copied from the definition
    pub tooltip: Option<String>,
    /// Handler copied from the definition
    pub action: AttributeAction,
}

/// Construct the control described by `definition`.
///
/// Checkboxes start checked when the default is `"yes"`. Combo boxes record
/// their default (empty if none is declared) for later materialization.
pub fn build_widget(key: &str, definition: &AttributeDefinition) -> AttributeWidget {
    let state = match definition.kind {
        WidgetKind::Text => WidgetState::Text(TextField::default()),
        WidgetKind::Button => WidgetState::Button(PushButton {
            label: key.to_string(),
        }),
        WidgetKind::Radio => WidgetState::Radio(Toggle {
            label: key.to_string(),
            checked: false,
        }),
        WidgetKind::Checkbox => WidgetState::Checkbox(Toggle {
            label: key.to_string(),
            checked: definition.default.as_deref() == Some(YES),
        }),
        WidgetKind::Combo => WidgetState::Combo(ComboBox {
            current: if definition.choices.is_empty() {
                None
            } else {
                Some(0)
            },
            choices: definition.choices.clone(),
            default_value: definition.default.clone().unwrap_or_default(),
        }),
    };

    log::debug!("Built {} widget for attribute '{}'", definition.kind, key);

    AttributeWidget {
        state,
        tooltip: definition.tooltip.clone(),
        action: definition.action.clone(),
    }
}

impl AttributeWidget {
    /// The kind of control this is.
    pub fn kind(&self) -> WidgetKind {
        match self.state {
            WidgetState::Text(_) => WidgetKind::Text,
            WidgetState::Button(_) => WidgetKind::Button,
            WidgetState::Radio(_) => WidgetKind::Radio,
            WidgetState::Checkbox(_) => WidgetKind::Checkbox,
            WidgetState::Combo(_) => WidgetKind::Combo,
        }
    }

    /// Label shown next to the control, for kinds that have one.
    pub fn label(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Button(b) => Some(&b.label),
            WidgetState::Radio(t) | WidgetState::Checkbox(t) => Some(&t.label),
            WidgetState::Text(_) | WidgetState::Combo(_) => None,
        }
    }

    /// Default recorded on the control, only combo boxes carry one.
    pub fn default_value(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Combo(c) => Some(&c.default_value),
            _ => None,
        }
    }

    /// Read the current UI state as an attribute value.
    ///
    /// Buttons hold no value and return `None`.
    pub fn value(&self) -> Option<String> {
        match &self.state {
            WidgetState::Text(t) => Some(t.text.clone()),
            WidgetState::Button(_) => None,
            WidgetState::Radio(t) | WidgetState::Checkbox(t) => Some(yes_no(t.checked).to_string()),
            WidgetState::Combo(c) => Some(c.current_text().to_string()),
        }
    }

    /// Show a stored value. `None` empties or unchecks the control.
    pub fn set_value(&mut self, value: Option<&str>) {
        match &mut self.state {
            WidgetState::Text(t) => t.text = value.unwrap_or_default().to_string(),
            WidgetState::Button(_) => {}
            WidgetState::Radio(t) | WidgetState::Checkbox(t) => t.checked = value == Some(YES),
            WidgetState::Combo(c) => match value {
                Some(text) => c.select_text(text),
                None => c.current = None,
            },
        }
    }

    /// Apply user input, returning the event the control fires, if any.
    ///
    /// Text fires on every edit, toggles only on an actual state change, combo
    /// boxes on every activation of a valid index. Input that does not fit the
    /// control is ignored.
    pub fn apply(&mut self, input: WidgetInput) -> Option<WidgetEvent> {
        let kind = self.kind();
        match (&mut self.state, input) {
            (WidgetState::Text(t), WidgetInput::EditText(text)) => {
                t.text = text.clone();
                Some(WidgetEvent::Edited(text))
            }
            (WidgetState::Button(_), WidgetInput::Press) => Some(WidgetEvent::Pressed),
            (
                WidgetState::Radio(t) | WidgetState::Checkbox(t),
                WidgetInput::SetChecked(checked),
            ) => {
                if t.checked == checked {
                    return None;
                }
                t.checked = checked;
                Some(WidgetEvent::Toggled(checked))
            }
            (WidgetState::Combo(c), WidgetInput::Activate(index)) if index < c.choices.len() => {
                c.current = Some(index);
                Some(WidgetEvent::Activated(index))
            }
            (_, input) => {
                log::debug!("Ignoring {:?} on {} widget", input, kind);
                None
            }
        }
    }
}
