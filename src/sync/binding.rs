//! Propagation of preset changes into the live configuration.
//!
//! Both preset sets publish over channels; the binding drains them and
//! applies each event:
//!
//! - graph preset activated: re-adapt the graph configuration to the
//!   selected log's fields and hand it to the renderer
//! - layout preset activated: hand the layout to the renderer
//! - any change: persist the full set under its storage key

use std::sync::mpsc::Receiver;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::sync::collaborators::{PresetStorage, Renderer};
use crate::sync::graph_config::{GraphConfig, GraphPreset};
use crate::sync::layout::LayoutConfig;
use crate::sync::presets::{PresetEvent, PresetSet};

/// Storage key of the graph preset set.
pub const GRAPH_PRESETS_KEY: &str = "graphPresets";
/// Storage key of the layout preset set.
pub const LAYOUT_PRESETS_KEY: &str = "layoutPresets";

/// State the binding writes to while applying events.
pub struct BindingTargets<'a> {
    pub graph_presets: &'a PresetSet<GraphPreset>,
    pub layout_presets: &'a PresetSet<LayoutConfig>,
    pub graph_config: &'a mut GraphConfig,
    /// Fields of the selected log, empty when none is loaded
    pub field_names: &'a [String],
    pub renderer: &'a mut dyn Renderer,
}

pub struct PresetBinding {
    graph_events: Receiver<PresetEvent>,
    layout_events: Receiver<PresetEvent>,
    storage: Box<dyn PresetStorage>,
}

impl PresetBinding {
    /// Subscribe to both sets.
    pub fn attach(
        graph_presets: &mut PresetSet<GraphPreset>,
        layout_presets: &mut PresetSet<LayoutConfig>,
        storage: Box<dyn PresetStorage>,
    ) -> Self {
        Self {
            graph_events: graph_presets.subscribe(),
            layout_events: layout_presets.subscribe(),
            storage,
        }
    }

    /// Apply all pending events. Returns `true` when the display changed and
    /// needs another tick.
    pub fn process(&mut self, targets: BindingTargets<'_>) -> bool {
        let mut needs_redraw = false;

        let graph_events: Vec<_> = self.graph_events.try_iter().collect();
        for event in graph_events {
            match event {
                PresetEvent::ActivePresetChanged(index) => {
                    debug!(index, "graph preset activated");
                    apply_graph_preset(
                        targets.graph_presets,
                        &mut *targets.graph_config,
                        targets.field_names,
                        &mut *targets.renderer,
                    );
                    needs_redraw = true;
                }
                PresetEvent::Changed => {
                    self.persist(GRAPH_PRESETS_KEY, targets.graph_presets);
                }
            }
        }

        let layout_events: Vec<_> = self.layout_events.try_iter().collect();
        for event in layout_events {
            match event {
                PresetEvent::ActivePresetChanged(index) => {
                    debug!(index, "layout preset activated");
                    if let Some(layout) = targets.layout_presets.active() {
                        targets.renderer.set_display_config(&layout.content);
                    }
                    needs_redraw = true;
                }
                PresetEvent::Changed => {
                    self.persist(LAYOUT_PRESETS_KEY, targets.layout_presets);
                }
            }
        }

        needs_redraw
    }

    /// Read a previously persisted set, if any. Storage or format problems
    /// are logged and treated as "nothing stored".
    pub fn restore<T>(storage: &dyn PresetStorage, key: &str, set: &mut PresetSet<T>)
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        match storage.load(key) {
            Ok(Some(blob)) => {
                if let Err(e) = set.load(blob) {
                    warn!(key, error = %e, "ignoring unreadable stored presets");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "failed to read stored presets"),
        }
    }

    fn persist<T>(&mut self, key: &str, set: &PresetSet<T>)
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        let blob = match set.save(false) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize presets");
                return;
            }
        };
        if let Err(e) = self.storage.persist(key, &blob) {
            warn!(key, error = %e, "failed to persist presets");
        }
    }
}

/// Adapt the active graph preset to `field_names` and push it to the renderer.
pub fn apply_graph_preset(
    presets: &PresetSet<GraphPreset>,
    graph_config: &mut GraphConfig,
    field_names: &[String],
    renderer: &mut dyn Renderer,
) {
    let graphs = presets
        .active()
        .map(|preset| preset.content.graphs.as_slice())
        .unwrap_or(&[]);
    graph_config.adapt_graphs(field_names, graphs);
    renderer.set_graph_config(graph_config);
}
