//! Named, persisted configuration blobs with one active member per set.
//!
//! Interested parties subscribe and receive [`PresetEvent`]s over a channel;
//! the set does not know who listens or how events are dispatched.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named configuration blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset<T> {
    pub name: String,
    pub content: T,
}

impl<T> Preset<T> {
    pub fn new(name: impl Into<String>, content: T) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// Notification published by a [`PresetSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetEvent {
    /// A different preset became active, or the active preset's content changed.
    ActivePresetChanged(usize),
    /// Anything in the set changed.
    Changed,
}

/// Serialized form of a preset set.
#[derive(Debug, Serialize, Deserialize)]
struct SavedPresets<T> {
    #[serde(default)]
    active: Option<usize>,
    presets: Vec<Preset<T>>,
}

type Validator<T> = Box<dyn Fn(&mut Preset<T>)>;

/// Ordered collection of presets with a designated active entry.
pub struct PresetSet<T> {
    presets: Vec<Preset<T>>,
    active: Option<usize>,
    validator: Option<Validator<T>>,
    subscribers: Vec<Sender<PresetEvent>>,
}

impl<T> Default for PresetSet<T> {
    fn default() -> Self {
        Self {
            presets: Vec::new(),
            active: None,
            validator: None,
            subscribers: Vec::new(),
        }
    }
}

impl<T> PresetSet<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a hook that repairs every preset before it is accepted.
    pub fn set_validator(&mut self, validator: impl Fn(&mut Preset<T>) + 'static) {
        self.validator = Some(Box::new(validator));
    }

    /// Receive every event published from now on.
    pub fn subscribe(&mut self) -> Receiver<PresetEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn presets(&self) -> &[Preset<T>] {
        &self.presets
    }

    pub fn get(&self, index: usize) -> Option<&Preset<T>> {
        self.presets.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Preset<T>> {
        self.active.and_then(|i| self.presets.get(i))
    }

    /// Append a preset, optionally making it active. Returns its index.
    pub fn add(&mut self, mut preset: Preset<T>, make_active: bool) -> usize {
        self.validate(&mut preset);
        self.presets.push(preset);
        let index = self.presets.len() - 1;

        if make_active || self.active.is_none() {
            self.active = Some(index);
            self.publish(PresetEvent::ActivePresetChanged(index));
        }
        self.publish(PresetEvent::Changed);
        index
    }

    /// Remove a preset. When the active one is removed, the first remaining
    /// preset becomes active.
    pub fn remove(&mut self, index: usize) -> Option<Preset<T>> {
        if index >= self.presets.len() {
            return None;
        }
        let removed = self.presets.remove(index);

        match self.active {
            Some(active) if active == index => {
                self.active = if self.presets.is_empty() { None } else { Some(0) };
                if let Some(new_active) = self.active {
                    self.publish(PresetEvent::ActivePresetChanged(new_active));
                }
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }

        self.publish(PresetEvent::Changed);
        Some(removed)
    }

    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> bool {
        let Some(preset) = self.presets.get_mut(index) else {
            return false;
        };
        preset.name = name.into();
        self.publish(PresetEvent::Changed);
        true
    }

    /// Replace a preset's content. The content goes through the validator
    /// like any other preset entering the set.
    pub fn update_content(&mut self, index: usize, content: T) -> bool {
        let Some(name) = self.presets.get(index).map(|p| p.name.clone()) else {
            return false;
        };
        let mut updated = Preset::new(name, content);
        self.validate(&mut updated);
        self.presets[index] = updated;

        if self.active == Some(index) {
            self.publish(PresetEvent::ActivePresetChanged(index));
        }
        self.publish(PresetEvent::Changed);
        true
    }

    /// Make `index` the active preset. Selecting the already active preset is
    /// a no-op.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.presets.len() {
            return false;
        }
        if self.active == Some(index) {
            return true;
        }

        self.active = Some(index);
        self.publish(PresetEvent::ActivePresetChanged(index));
        self.publish(PresetEvent::Changed);
        true
    }

    /// Activate the next (or previous, for negative `step`) preset, wrapping.
    pub fn cycle_active(&mut self, step: isize) -> Option<usize> {
        if self.presets.is_empty() {
            return None;
        }
        let len = self.presets.len() as isize;
        let current = self.active.unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.set_active(next);
        Some(next)
    }

    /// Serialize the set. With `active_only` only the active preset is kept.
    pub fn save(&self, active_only: bool) -> serde_json::Result<Value> {
        let saved = if active_only {
            SavedPresets {
                active: self.active.map(|_| 0),
                presets: self.active().cloned().into_iter().collect(),
            }
        } else {
            SavedPresets {
                active: self.active,
                presets: self.presets.clone(),
            }
        };
        serde_json::to_value(saved)
    }

    /// Replace the collection with a previously saved one.
    ///
    /// An empty saved collection leaves the set untouched. Each loaded preset
    /// goes through the validator.
    pub fn load(&mut self, blob: Value) -> serde_json::Result<()> {
        let saved: SavedPresets<T> = serde_json::from_value(blob)?;
        if saved.presets.is_empty() {
            return Ok(());
        }

        let mut presets = saved.presets;
        for preset in &mut presets {
            self.validate(preset);
        }

        let active = saved.active.filter(|&i| i < presets.len()).unwrap_or(0);
        self.presets = presets;
        self.active = Some(active);

        self.publish(PresetEvent::ActivePresetChanged(active));
        self.publish(PresetEvent::Changed);
        Ok(())
    }

    fn validate(&self, preset: &mut Preset<T>) {
        if let Some(validator) = &self.validator {
            validator(preset);
        }
    }

    fn publish(&mut self, event: PresetEvent) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
