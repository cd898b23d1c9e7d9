//! Event and message types flowing between attribute widgets and the host.
//!
//! Widgets emit [`WidgetEvent`]s when the user interacts with them; the
//! definition's action turns those into [`AttributeMessage`]s which the host
//! feeds back into the panel, Elm style.

/// Raw user input applied to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetInput {
    /// Replace the contents of a text field
    EditText(String),
    /// Press a push button
    Press,
    /// Set the checked state of a checkbox or radio button
    SetChecked(bool),
    /// Pick an entry of a combo box by index
    Activate(usize),
}

/// Signal emitted by a widget after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Text field edited, carrying the new text
    Edited(String),
    /// Push button pressed
    Pressed,
    /// Checkbox or radio button changed checked state
    Toggled(bool),
    /// Combo box entry activated, carrying its index
    Activated(usize),
}

/// A widget event tagged with the attribute key it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// Attribute key of the widget that fired
    pub key: String,
    /// What happened
    pub event: WidgetEvent,
}

/// Messages handled by [`AttributePanel::update`](super::AttributePanel::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMessage {
    /// Copy one label widget's value into the selected shape
    LabelAttributeChanged {
        /// Attribute key to synchronize
        key: String,
    },
    /// Copy every label widget's value into the selected shape
    LabelAttributesChanged,
    /// A push button was pressed; buttons carry no value
    ButtonPressed {
        /// Key of the pressed button
        key: String,
    },
}
