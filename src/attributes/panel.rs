//! The dockable label-attribute panel.
//!
//! The panel is installed once: it asks its provider for label definitions,
//! builds one widget per definition into a form layout and hands the dock to
//! the host. Afterwards only the shape it reflects changes, and that binding is
//! owned by the host.

use serde::{Deserialize, Serialize};

use super::definition::{AttributeMap, Definitions, sorted_definitions};
use super::message::{AttributeChange, AttributeMessage, WidgetInput};
use super::provider::DefinitionProvider;
use super::sync::{WidgetMap, load_attributes, maybe_update_attribute, reset_widgets};
use super::widget::{AttributeWidget, WidgetState, build_widget};
use crate::config::PanelConfig;
use crate::error::AttributeError;

/// Title of the label attribute dock.
pub const LABEL_DOCK_TITLE: &str = "Label Attributes";
/// Object name of the label attribute dock, used by hosts to persist layout.
pub const LABEL_DOCK_NAME: &str = "LabelAttributes";

/// Edge of the host window a dock attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockArea {
    /// Left edge
    Left,
    /// Right edge
    #[default]
    Right,
    /// Above the canvas
    Top,
    /// Below the canvas
    Bottom,
}

/// Vertical form holding one row per attribute, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormLayout {
    rows: Vec<String>,
}

impl FormLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the widget for `key` as a new row.
    pub fn add_row(&mut self, key: impl Into<String>) {
        self.rows.push(key.into());
    }

    /// Attribute keys in row order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A titled dock hosting a form of attribute widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockWidget {
    /// Window title of the dock
    pub title: String,
    /// Stable identifier hosts use to save and restore dock placement
    pub object_name: String,
    /// Attribute rows
    pub layout: FormLayout,
}

/// What the panel needs from the window it lives in.
pub trait AttributeHost {
    /// Flag the open document as having unsaved changes.
    fn set_dirty(&mut self);

    /// Attribute slot of the selected shape, `None` when nothing is selected.
    ///
    /// The inner `Option` is the shape's own map, which may not exist yet.
    fn selected_attributes(&mut self) -> Option<&mut Option<AttributeMap>>;

    /// Attach a dock to the window.
    fn add_dock_widget(&mut self, area: DockArea, dock: &DockWidget) {
        log::debug!("Dock '{}' attached to {:?} area", dock.object_name, area);
    }
}

/// Build one widget per definition, adding rows to `layout` in display order.
pub fn build_widgets(layout: &mut FormLayout, definitions: &Definitions) -> WidgetMap {
    let mut widgets = WidgetMap::with_capacity(definitions.len());
    for (key, definition) in sorted_definitions(definitions) {
        let widget = build_widget(key, definition);
        layout.add_row(key);
        widgets.insert(key.to_string(), widget);
    }
    widgets
}

/// Label attribute panel docked in the host window.
#[derive(Debug)]
pub struct AttributePanel {
    dock: DockWidget,
    area: DockArea,
    label_widgets: WidgetMap,
}

impl AttributePanel {
    /// Build the label attribute dock and attach it to `host`.
    ///
    /// Fails only when the provider yields a definition that cannot be built.
    pub fn install<H, P>(
        host: &mut H,
        area: DockArea,
        provider: &mut P,
    ) -> Result<Self, AttributeError>
    where
        H: AttributeHost + ?Sized,
        P: DefinitionProvider + ?Sized,
    {
        Self::install_with(host, &PanelConfig::with_area(area), provider)
    }

    /// Like [`install`](Self::install), with dock title and name taken from `config`.
    pub fn install_with<H, P>(
        host: &mut H,
        config: &PanelConfig,
        provider: &mut P,
    ) -> Result<Self, AttributeError>
    where
        H: AttributeHost + ?Sized,
        P: DefinitionProvider + ?Sized,
    {
        let definitions = provider.label_attribute_definitions()?;

        let mut layout = FormLayout::new();
        let label_widgets = build_widgets(&mut layout, &definitions);
        let dock = DockWidget {
            title: config.title.clone(),
            object_name: config.object_name.clone(),
            layout,
        };

        host.add_dock_widget(config.dock_area, &dock);
        log::info!(
            "Installed '{}' panel with {} attributes",
            dock.title,
            label_widgets.len()
        );

        Ok(Self {
            dock,
            area: config.dock_area,
            label_widgets,
        })
    }

    pub fn dock(&self) -> &DockWidget {
        &self.dock
    }

    pub fn area(&self) -> DockArea {
        self.area
    }

    /// Label widgets keyed by attribute name.
    pub fn label_widgets(&self) -> &WidgetMap {
        &self.label_widgets
    }

    pub fn label_widget(&self, key: &str) -> Option<&AttributeWidget> {
        self.label_widgets.get(key)
    }

    /// Label widgets in display order.
    pub fn ordered_label_widgets(&self) -> impl Iterator<Item = (&str, &AttributeWidget)> {
        self.dock.layout.rows().iter().filter_map(|key| {
            self.label_widgets
                .get(key)
                .map(|widget| (key.as_str(), widget))
        })
    }

    /// Clear every widget. Used while no shape is selected.
    pub fn reset_state(&mut self) {
        reset_widgets(&mut self.label_widgets);
    }

    /// Show `attributes` in the label widgets.
    ///
    /// Missing combo values are filled with the widget default and written
    /// into the map. Returns the keys that were filled this way.
    pub fn load_label_attributes(&mut self, attributes: Option<&mut AttributeMap>) -> Vec<String> {
        load_attributes(attributes, &mut self.label_widgets)
    }

    /// Show the selected shape's attributes, or reset when nothing is selected.
    ///
    /// Marks the host dirty once per default written into the shape.
    pub fn load_selected_label_attributes<H>(&mut self, host: &mut H)
    where
        H: AttributeHost + ?Sized,
    {
        let materialized = match host.selected_attributes() {
            Some(slot) => self.load_label_attributes(slot.as_mut()),
            None => {
                self.reset_state();
                Vec::new()
            }
        };
        for _ in &materialized {
            host.set_dirty();
        }
    }

    /// Copy the value of the widget for `key` into the selected shape.
    pub fn update_label_attribute<H>(&mut self, key: &str, host: &mut H)
    where
        H: AttributeHost + ?Sized,
    {
        let Some(value) = self.label_widgets.get(key).and_then(AttributeWidget::value) else {
            return;
        };
        let Some(slot) = host.selected_attributes() else {
            return;
        };
        let attributes = slot.get_or_insert_with(AttributeMap::new);
        if maybe_update_attribute(key, attributes, &value) {
            host.set_dirty();
        }
    }

    /// Copy every label widget's value into the selected shape.
    pub fn update_label_attributes<H>(&mut self, host: &mut H)
    where
        H: AttributeHost + ?Sized,
    {
        let Some(slot) = host.selected_attributes() else {
            return;
        };
        let attributes = slot.get_or_insert_with(AttributeMap::new);

        let mut changed = false;
        for (key, widget) in &self.label_widgets {
            if let Some(value) = widget.value() {
                changed |= maybe_update_attribute(key, attributes, &value);
            }
        }
        if changed {
            host.set_dirty();
        }
    }

    /// Apply user input to the widget for `key`.
    ///
    /// Returns the messages produced by the actions of every widget that
    /// fired. Checking a radio button unchecks the other radio buttons of the
    /// panel, which fire as well. A radio button cannot be unchecked directly.
    pub fn interact(&mut self, key: &str, input: WidgetInput) -> Vec<AttributeMessage> {
        let checks_radio = matches!(input, WidgetInput::SetChecked(true));

        let Some(widget) = self.label_widgets.get_mut(key) else {
            log::warn!("Input for unknown attribute '{}'", key);
            return Vec::new();
        };
        let is_radio = matches!(widget.state, WidgetState::Radio(_));
        if is_radio && matches!(input, WidgetInput::SetChecked(false)) {
            return Vec::new();
        }

        let mut messages = Vec::new();
        if let Some(event) = widget.apply(input) {
            messages.extend(widget.action.call(AttributeChange {
                key: key.to_string(),
                event,
            }));
        } else {
            return messages;
        }

        if is_radio && checks_radio {
            for other in self.dock.layout.rows() {
                if other == key {
                    continue;
                }
                let Some(widget) = self.label_widgets.get_mut(other) else {
                    continue;
                };
                if !matches!(widget.state, WidgetState::Radio(_)) {
                    continue;
                }
                if let Some(event) = widget.apply(WidgetInput::SetChecked(false)) {
                    messages.extend(widget.action.call(AttributeChange {
                        key: other.clone(),
                        event,
                    }));
                }
            }
        }

        messages
    }

    /// Handle a message produced by a widget action.
    pub fn update<H>(&mut self, message: AttributeMessage, host: &mut H)
    where
        H: AttributeHost + ?Sized,
    {
        match message {
            AttributeMessage::LabelAttributeChanged { key } => {
                self.update_label_attribute(&key, host);
            }
            AttributeMessage::LabelAttributesChanged => {
                self.update_label_attributes(host);
            }
            AttributeMessage::ButtonPressed { key } => {
                log::debug!("Attribute button '{}' pressed", key);
            }
        }
    }
}
