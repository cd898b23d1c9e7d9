//! Value transfer between widgets and attribute maps.

use std::collections::HashMap;

use super::definition::AttributeMap;
use super::widget::AttributeWidget;

/// Live widgets keyed by attribute name.
pub type WidgetMap = HashMap<String, AttributeWidget>;

/// Store `new_value` under `key` if it differs from what is stored.
///
/// A missing entry counts as different from any value. Returns `true` when the
/// map was changed, in which case the caller must mark the document dirty.
pub fn maybe_update_attribute(key: &str, attributes: &mut AttributeMap, new_value: &str) -> bool {
    let existing = attributes.get(key).map(String::as_str);
    if existing == Some(new_value) {
        return false;
    }

    log::debug!(
        "Updated attribute: key=[{}], new-value=[{}], old-value=[{:?}]",
        key,
        new_value,
        existing
    );
    attributes.insert(key.to_string(), new_value.to_string());
    true
}

/// Push stored values into widgets.
///
/// With no map every widget is reset. A missing key shows the widget's
/// recorded default (combo boxes only), which is also written into the map.
/// Returns the keys whose default was materialized; each of those needs one
/// dirty signal.
pub fn load_attributes(
    mut attributes: Option<&mut AttributeMap>,
    widgets: &mut WidgetMap,
) -> Vec<String> {
    let mut materialized = Vec::new();

    for (key, widget) in widgets.iter_mut() {
        let value = match attributes.as_deref_mut() {
            None => None,
            Some(attributes) => match attributes.get(key) {
                Some(value) => Some(value.clone()),
                None => match widget.default_value() {
                    Some(default) => {
                        let default = default.to_string();
                        log::info!(
                            "Assigned default attribute value: key=[{}], value=[{}]",
                            key,
                            default
                        );
                        attributes.insert(key.clone(), default.clone());
                        materialized.push(key.clone());
                        Some(default)
                    }
                    None => None,
                },
            },
        };
        widget.set_value(value.as_deref());
    }

    materialized.sort();
    materialized
}

/// Clear every widget to its empty representation.
pub fn reset_widgets(widgets: &mut WidgetMap) {
    for widget in widgets.values_mut() {
        widget.set_value(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::definition::AttributeDefinition;
    use crate::attributes::widget::build_widget;

    fn widgets(defs: &[(&str, AttributeDefinition)]) -> WidgetMap {
        defs.iter()
            .map(|(key, def)| (key.to_string(), build_widget(key, def)))
            .collect()
    }

    fn checkbox_widgets() -> WidgetMap {
        widgets(&[
            ("numbers", AttributeDefinition::checkbox().with_default("no")),
            ("caption", AttributeDefinition::checkbox().with_default("no")),
        ])
    }

    #[test]
    fn test_maybe_update_detects_change() {
        let mut attrs = AttributeMap::new();
        assert!(maybe_update_attribute("numbers", &mut attrs, "yes"));
        assert_eq!(attrs.get("numbers").map(String::as_str), Some("yes"));
        assert!(!maybe_update_attribute("numbers", &mut attrs, "yes"));
        assert!(maybe_update_attribute("numbers", &mut attrs, "no"));
    }

    #[test]
    fn test_maybe_update_absent_to_empty_is_change() {
        let mut attrs = AttributeMap::new();
        assert!(maybe_update_attribute("note", &mut attrs, ""));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_load_none_resets() {
        let mut widgets = checkbox_widgets();
        for w in widgets.values_mut() {
            w.set_value(Some("yes"));
        }

        let materialized = load_attributes(None, &mut widgets);
        assert!(materialized.is_empty());
        for w in widgets.values() {
            assert_eq!(w.value().as_deref(), Some("no"));
        }
    }

    #[test]
    fn test_load_checkboxes_without_materializing() {
        let mut widgets = checkbox_widgets();
        let mut attrs = AttributeMap::from([("numbers".to_string(), "yes".to_string())]);

        let materialized = load_attributes(Some(&mut attrs), &mut widgets);

        assert!(materialized.is_empty());
        assert_eq!(widgets["numbers"].value().as_deref(), Some("yes"));
        assert_eq!(widgets["caption"].value().as_deref(), Some("no"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_load_materializes_combo_default_once() {
        let mut widgets = widgets(&[(
            "quality",
            AttributeDefinition::combo(["low", "high"]).with_default("high"),
        )]);
        let mut attrs = AttributeMap::new();

        let materialized = load_attributes(Some(&mut attrs), &mut widgets);
        assert_eq!(materialized, vec!["quality".to_string()]);
        assert_eq!(attrs.get("quality").map(String::as_str), Some("high"));
        assert_eq!(widgets["quality"].value().as_deref(), Some("high"));

        let materialized = load_attributes(Some(&mut attrs), &mut widgets);
        assert!(materialized.is_empty());
    }

    #[test]
    fn test_load_materializes_empty_combo_default() {
        let mut widgets = widgets(&[("quality", AttributeDefinition::combo(["low", "high"]))]);
        let mut attrs = AttributeMap::new();

        let materialized = load_attributes(Some(&mut attrs), &mut widgets);
        assert_eq!(materialized.len(), 1);
        assert_eq!(attrs.get("quality").map(String::as_str), Some(""));
        assert_eq!(widgets["quality"].value().as_deref(), Some(""));
    }

    #[test]
    fn test_reset_widgets() {
        let mut widgets = widgets(&[
            ("note", AttributeDefinition::text()),
            ("quality", AttributeDefinition::combo(["low"])),
        ]);
        widgets.get_mut("note").unwrap().set_value(Some("x"));

        reset_widgets(&mut widgets);
        assert_eq!(widgets["note"].value().as_deref(), Some(""));
        assert_eq!(widgets["quality"].value().as_deref(), Some(""));
    }
}
