use crate::viewer::presets::{CustomPresets, CustomSlot, Preset};
use crate::viewer::rotation::{Axis, RotationVector, clamp_degrees};
use crate::viewer::storage::{PreferenceStore, StorageError, load_json, save_json};
use crate::viewer::{CUSTOM_PRESETS_KEY, PANEL_ROTATIONS_KEY};
use bevy::prelude::{Res, ResMut, Resource};
use bevy_pkv::PkvStore;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlTab {
    #[default]
    Main,
    Panels,
}

impl ControlTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Main Controls",
            Self::Panels => "Solar Panel Controls",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderTarget {
    Model,
    Panel(String),
}

/// Desired orientation state for the model and its panels. Every user
/// action is one method here; the adapter reads the result back.
#[derive(Resource, Debug, Clone)]
pub struct ViewerState {
    pub model_rotation: RotationVector,
    pub panel_rotations: BTreeMap<String, RotationVector>,
    pub custom_presets: CustomPresets,
    pub active_preset: Preset,
    pub panel_names: Vec<String>,
    pub selected_panel: Option<String>,
    pub active_tab: ControlTab,
    pub dirty: bool,
    pub status: String,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            model_rotation: RotationVector::ZERO,
            panel_rotations: BTreeMap::new(),
            custom_presets: CustomPresets::default(),
            active_preset: Preset::Front,
            panel_names: Vec::new(),
            selected_panel: None,
            active_tab: ControlTab::Main,
            dirty: true,
            status: "Ready".to_string(),
        }
    }
}

impl ViewerState {
    pub fn set_axis_rotation(&mut self, target: &SliderTarget, axis: Axis, degrees: f32) {
        let degrees = clamp_degrees(degrees);
        match target {
            SliderTarget::Model => {
                self.model_rotation.set(axis, degrees);
                self.active_preset = Preset::Manual;
            }
            SliderTarget::Panel(name) => {
                self.panel_rotations
                    .entry(name.clone())
                    .or_default()
                    .set(axis, degrees);
            }
        }
        self.dirty = true;
    }

    pub fn rotation_for(&self, target: &SliderTarget) -> RotationVector {
        match target {
            SliderTarget::Model => self.model_rotation,
            SliderTarget::Panel(name) => self
                .panel_rotations
                .get(name)
                .copied()
                .unwrap_or_default(),
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        if let Some(rotation) = preset.rotation(&self.custom_presets) {
            self.model_rotation = rotation;
        }
        self.active_preset = preset;
        self.dirty = true;
        tracing::debug!("Applied preset {}", preset.label());
    }

    /// Copies the model rotation into `slot` and writes both custom slots
    /// to the store. The in-memory state is updated even if the write fails.
    pub fn save_current_as_custom(
        &mut self,
        slot: CustomSlot,
        store: &mut impl PreferenceStore,
    ) -> Result<(), StorageError> {
        self.custom_presets.set(slot, self.model_rotation);
        self.active_preset = slot.into();
        self.dirty = true;
        save_json(store, CUSTOM_PRESETS_KEY, &self.custom_presets)
    }

    pub fn on_panels_discovered(&mut self, names: Vec<String>) {
        for name in &names {
            self.panel_rotations.entry(name.clone()).or_default();
        }

        let selection_valid = self
            .selected_panel
            .as_ref()
            .is_some_and(|selected| names.contains(selected));
        if !selection_valid {
            self.selected_panel = names.first().cloned();
        }

        self.panel_names = names;
        self.dirty = true;
    }

    pub fn reset_all_panels(&mut self) {
        for rotation in self.panel_rotations.values_mut() {
            *rotation = RotationVector::ZERO;
        }
        self.dirty = true;
    }

    pub fn persist_panel_rotations(
        &self,
        store: &mut impl PreferenceStore,
    ) -> Result<(), StorageError> {
        save_json(store, PANEL_ROTATIONS_KEY, &self.panel_rotations)
    }

    pub fn select_panel(&mut self, name: &str) {
        if self.panel_names.iter().any(|known| known == name) {
            self.selected_panel = Some(name.to_string());
        }
    }

    /// What the X/Y/Z sliders currently drive.
    pub fn slider_target(&self) -> Option<SliderTarget> {
        match self.active_tab {
            ControlTab::Main => Some(SliderTarget::Model),
            ControlTab::Panels => self.selected_panel.clone().map(SliderTarget::Panel),
        }
    }

    /// Overwrites defaults with whatever valid data the store holds.
    /// Unreadable entries are logged and skipped.
    pub fn load_persisted(&mut self, store: &impl PreferenceStore) {
        match load_json::<CustomPresets>(store, CUSTOM_PRESETS_KEY) {
            Ok(Some(custom)) => self.custom_presets = custom,
            Ok(None) => {}
            Err(err) => tracing::warn!("Ignoring saved custom presets: {err}"),
        }

        match load_json::<BTreeMap<String, RotationVector>>(store, PANEL_ROTATIONS_KEY) {
            Ok(Some(rotations)) => {
                for (name, rotation) in rotations {
                    self.panel_rotations.insert(name, rotation);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("Ignoring saved panel rotations: {err}"),
        }

        self.dirty = true;
    }
}

pub fn load_persisted_state(store: Res<PkvStore>, mut state: ResMut<ViewerState>) {
    state.load_persisted(&*store);
}
