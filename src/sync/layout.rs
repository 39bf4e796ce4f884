//! Layout presets.
//!
//! A layout is an opaque JSON object consumed by the renderer. The session
//! only knows how to repair a loaded layout against the default template.

use serde_json::{json, Value};

/// Display layout passed to the renderer.
pub type LayoutConfig = Value;

/// Known-good layout used for the "Default" preset and for repairs.
pub fn default_layout() -> LayoutConfig {
    json!({
        "showCraft": true,
        "showSticks": true,
        "showTime": true,
        "showLegend": true,
        "graphSmoothing": 0,
        "sticks": {
            "size": 0.2,
            "trails": false
        },
        "craft": {
            "size": 0.25,
            "propColors": ["#fa0", "#0af", "#f0a", "#af0"]
        }
    })
}

/// Fill keys missing from `layout` with the template's values.
///
/// Nested objects are repaired recursively. A layout that is not an object at
/// all is replaced by the template.
pub fn fix_up(layout: &mut LayoutConfig, template: &LayoutConfig) {
    let Some(template_map) = template.as_object() else {
        return;
    };

    if !layout.is_object() {
        *layout = template.clone();
        return;
    }

    if let Some(map) = layout.as_object_mut() {
        for (key, default) in template_map {
            match map.get_mut(key) {
                Some(existing) if existing.is_object() && default.is_object() => {
                    fix_up(existing, default);
                }
                Some(_) => {}
                None => {
                    map.insert(key.clone(), default.clone());
                }
            }
        }
    }
}
