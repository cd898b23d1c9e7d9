//! Label attribute definitions, widgets and the panel that hosts them.

mod callback;
mod definition;
mod message;
mod panel;
mod provider;
mod sync;
mod widget;

pub use callback::Callback;
pub use definition::{
    AttributeAction, AttributeDefinition, AttributeMap, Definitions, NO, WidgetKind, YES,
    parse_kind, sorted_definitions, yes_no,
};
pub use message::{AttributeChange, AttributeMessage, WidgetEvent, WidgetInput};
pub use panel::{
    AttributeHost, AttributePanel, DockArea, DockWidget, FormLayout, LABEL_DOCK_NAME,
    LABEL_DOCK_TITLE, build_widgets,
};
pub use provider::{
    ConfiguredDefinitions, DefinitionProvider, LABEL_ATTRIBUTES, LabelAttributeDefinitions,
    OrderSequence, label_action,
};
pub use sync::{WidgetMap, load_attributes, maybe_update_attribute, reset_widgets};
pub use widget::{
    AttributeWidget, ComboBox, PushButton, TextField, Toggle, WidgetState, build_widget,
};
