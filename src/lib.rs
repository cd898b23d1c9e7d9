//! Label attributes for image annotation tools.
//!
//! Declares yes/no and free-form attributes attached to annotation labels,
//! builds the widgets that edit them in a dockable panel, keeps those widgets
//! in sync with the selected shape and stores the values as attribute blocks
//! in Pascal VOC XML files.
//!
//! ```rust,ignore
//! use label_attributes::attributes::{
//!     AttributePanel, DockArea, LabelAttributeDefinitions, WidgetInput,
//! };
//!
//! let mut provider = LabelAttributeDefinitions::new();
//! let mut panel = AttributePanel::install(&mut host, DockArea::Right, &mut provider)?;
//! panel.load_selected_label_attributes(&mut host);
//! for message in panel.interact("numbers", WidgetInput::SetChecked(true)) {
//!     panel.update(message, &mut host);
//! }
//! ```

pub mod attributes;
pub mod config;
mod error;
pub mod format;

pub use attributes::{AttributeHost, AttributeMap, AttributePanel};
pub use config::AttributesConfig;
pub use error::AttributeError;
