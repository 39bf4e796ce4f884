//! Graph presets and their adaptation to a concrete log.
//!
//! A preset names fields generically (`motor[all]`); the live configuration
//! only contains fields the selected log actually has.

use serde::{Deserialize, Serialize};

/// One graph: a label and the fields plotted in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub label: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl GraphDefinition {
    pub fn new(label: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            label: label.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Content of a graph preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPreset {
    #[serde(default)]
    pub graphs: Vec<GraphDefinition>,
}

impl GraphPreset {
    /// Graphs of the built-in "Default" preset.
    pub fn example() -> Self {
        Self {
            graphs: vec![
                GraphDefinition::new("Motors", &["motor[all]"]),
                GraphDefinition::new("Gyros", &["gyroADC[all]"]),
                GraphDefinition::new("Gyro + PID roll", &["axisP[0]", "axisI[0]", "axisD[0]", "gyroADC[0]"]),
                GraphDefinition::new("Gyro + PID pitch", &["axisP[1]", "axisI[1]", "axisD[1]", "gyroADC[1]"]),
                GraphDefinition::new("Gyro + PID yaw", &["axisP[2]", "axisI[2]", "axisD[2]", "gyroADC[2]"]),
            ],
        }
    }
}

/// Graph configuration in use, adapted to the selected log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphConfig {
    graphs: Vec<GraphDefinition>,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graphs(&self) -> &[GraphDefinition] {
        &self.graphs
    }

    /// Replace the configuration with `graphs` restricted to `available`
    /// fields.
    ///
    /// `name[all]` expands to every `name[i]` field of the log. Graphs left
    /// without any field are dropped.
    pub fn adapt_graphs(&mut self, available: &[String], graphs: &[GraphDefinition]) {
        self.graphs = graphs
            .iter()
            .filter_map(|graph| {
                let fields: Vec<String> = graph
                    .fields
                    .iter()
                    .flat_map(|pattern| expand_field(pattern, available))
                    .collect();

                if fields.is_empty() {
                    None
                } else {
                    Some(GraphDefinition {
                        label: graph.label.clone(),
                        fields,
                    })
                }
            })
            .collect();
    }
}

fn expand_field(pattern: &str, available: &[String]) -> Vec<String> {
    if let Some(base) = pattern.strip_suffix("[all]") {
        available
            .iter()
            .filter(|name| {
                name.strip_prefix(base)
                    .is_some_and(|rest| rest.starts_with('[') && rest.ends_with(']'))
            })
            .cloned()
            .collect()
    } else if available.iter().any(|name| name == pattern) {
        vec![pattern.to_string()]
    } else {
        Vec::new()
    }
}
