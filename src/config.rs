//! Configuration file support.
//!
//! The configuration declares the panel's dock placement, the log level and,
//! optionally, the label attributes to show instead of the built-in set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attributes::{
    AttributeHost, AttributePanel, ConfiguredDefinitions, DockArea, LABEL_DOCK_NAME,
    LABEL_DOCK_TITLE, LabelAttributeDefinitions, WidgetKind,
};
use crate::error::AttributeError;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Panel configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level the host should apply
    #[serde(default)]
    pub log_level: LogLevel,

    /// Dock placement and naming
    #[serde(default)]
    pub panel: PanelConfig,

    /// Label attributes; the built-in set is used when empty
    #[serde(default)]
    pub label_attributes: Vec<AttributeDefinitionConfig>,
}

/// Dock placement and naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_object_name")]
    pub object_name: String,

    #[serde(default)]
    pub dock_area: DockArea,
}

fn default_title() -> String {
    LABEL_DOCK_TITLE.to_string()
}

fn default_object_name() -> String {
    LABEL_DOCK_NAME.to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            object_name: default_object_name(),
            dock_area: DockArea::default(),
        }
    }
}

impl PanelConfig {
    /// Default title and name, docked at `area`.
    pub fn with_area(dock_area: DockArea) -> Self {
        Self {
            dock_area,
            ..Self::default()
        }
    }
}

/// One attribute as declared in the configuration file.
///
/// `kind` stays a plain string here so that an unknown kind surfaces as an
/// [`AttributeError::InvalidDefinition`] when the panel is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinitionConfig {
    /// Attribute name, also the widget label
    pub key: String,

    /// Widget kind name, `"text"` when omitted
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Display position; entries without one are numbered in file order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,

    /// Tooltip shown on the control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,

    /// `"yes"`/`"no"` for boolean kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Combo box choices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

fn default_kind() -> String {
    WidgetKind::default().name().to_string()
}

impl Default for AttributeDefinitionConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            kind: default_kind(),
            order: None,
            tooltip: None,
            default: None,
            choices: Vec::new(),
        }
    }
}

impl AttributesConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            panel: PanelConfig::default(),
            label_attributes: Vec::new(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, AttributeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, AttributeError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(AttributeError::UnsupportedVersion {
                expected: CONFIG_VERSION,
                found: config.version,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the configuration.
    pub fn default_filename() -> &'static str {
        "label-attributes.json"
    }

    /// Default location in the user's config directory, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("label-attributes").join(Self::default_filename()))
    }

    /// Read configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, AttributeError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AttributeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Install the panel this configuration describes.
    ///
    /// An attribute with an unknown kind or a repeated key aborts installation.
    pub fn install_panel<H>(&self, host: &mut H) -> Result<AttributePanel, AttributeError>
    where
        H: AttributeHost + ?Sized,
    {
        if self.label_attributes.is_empty() {
            AttributePanel::install_with(host, &self.panel, &mut LabelAttributeDefinitions::new())
        } else {
            let mut provider = ConfiguredDefinitions::new(self.label_attributes.clone());
            AttributePanel::install_with(host, &self.panel, &mut provider)
        }
    }
}

impl Default for AttributesConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeMap, DockWidget};

    struct NullHost;

    impl AttributeHost for NullHost {
        fn set_dirty(&mut self) {}

        fn selected_attributes(&mut self) -> Option<&mut Option<AttributeMap>> {
            None
        }

        fn add_dock_widget(&mut self, _area: DockArea, _dock: &DockWidget) {}
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = AttributesConfig::from_json(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.panel, PanelConfig::default());
        assert!(config.label_attributes.is_empty());
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = AttributesConfig::from_json(r#"{ "version": 99 }"#).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_attribute_entries_parse() {
        let json = r#"{
            "version": 1,
            "log_level": "debug",
            "panel": { "dock_area": "left" },
            "label_attributes": [
                { "key": "note" },
                { "key": "quality", "kind": "combo", "choices": ["low", "high"], "default": "low" }
            ]
        }"#;
        let config = AttributesConfig::from_json(json).unwrap();
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
        assert_eq!(config.panel.dock_area, DockArea::Left);
        assert_eq!(config.panel.title, LABEL_DOCK_TITLE);
        assert_eq!(config.label_attributes[0].kind, "text");
        assert_eq!(config.label_attributes[1].choices.len(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(AttributesConfig::default_filename());

        let mut config = AttributesConfig::new();
        config.panel.dock_area = DockArea::Bottom;
        config.label_attributes.push(AttributeDefinitionConfig {
            key: "note".into(),
            kind: "text".into(),
            tooltip: Some("Free-form remark".into()),
            ..AttributeDefinitionConfig::default()
        });
        config.save(&path).unwrap();

        let loaded = AttributesConfig::load(&path).unwrap();
        assert_eq!(loaded.panel.dock_area, DockArea::Bottom);
        assert_eq!(loaded.label_attributes, config.label_attributes);
    }

    #[test]
    fn test_install_builtin_panel() {
        let panel = AttributesConfig::new().install_panel(&mut NullHost).unwrap();
        assert_eq!(panel.label_widgets().len(), 9);
        assert_eq!(
            panel.label_widget("numbers").map(|w| w.kind()),
            Some(WidgetKind::Checkbox)
        );
    }

    #[test]
    fn test_defaulted_entry_is_text_field() {
        let entry = AttributeDefinitionConfig {
            key: "note".into(),
            ..AttributeDefinitionConfig::default()
        };
        let parsed: AttributeDefinitionConfig =
            serde_json::from_str(r#"{ "key": "note" }"#).unwrap();
        assert_eq!(entry, parsed);

        let mut config = AttributesConfig::new();
        config.label_attributes.push(entry);
        let panel = config.install_panel(&mut NullHost).unwrap();
        assert_eq!(
            panel.label_widget("note").map(|w| w.kind()),
            Some(WidgetKind::Text)
        );
    }

    #[test]
    fn test_install_rejects_unknown_kind() {
        let mut config = AttributesConfig::new();
        config.label_attributes.push(AttributeDefinitionConfig {
            key: "depth".into(),
            kind: "slider".into(),
            ..AttributeDefinitionConfig::default()
        });
        let err = config.install_panel(&mut NullHost).unwrap_err();
        assert!(matches!(err, AttributeError::InvalidDefinition { .. }));
    }
}
