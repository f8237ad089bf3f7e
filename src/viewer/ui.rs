use crate::viewer::ROTATION_LIMIT_DEG;
use crate::viewer::adapter::ModelAdapter;
use crate::viewer::camera::UiInteractionState;
use crate::viewer::presets::{CustomSlot, Preset};
use crate::viewer::rotation::Axis;
use crate::viewer::state::{ControlTab, SliderTarget, ViewerState};
use bevy::prelude::ResMut;
use bevy_egui::{EguiContexts, egui};
use bevy_pkv::PkvStore;

pub fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<ViewerState>,
    mut adapter: ResMut<ModelAdapter>,
    mut store: ResMut<PkvStore>,
    mut ui_state: ResMut<UiInteractionState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let top_bar_response = egui::TopBottomPanel::top("solar_viewer_top_bar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.heading("Solar Viewer");
            ui.separator();
            if adapter.ready {
                ui.label(format!("Status: {}", state.status));
            } else {
                ui.spinner();
                ui.label("Loading model...");
            }
            ui.separator();
            ui.small("Viewport controls: LMB rotate, RMB pan, wheel zoom.");
        });
    });

    let side_panel_response = egui::SidePanel::left("solar_viewer_controls")
        .resizable(true)
        .default_width(340.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in [ControlTab::Main, ControlTab::Panels] {
                    ui.selectable_value(&mut state.active_tab, tab, tab.label());
                }
            });
            ui.separator();

            let active_tab = state.active_tab;
            match active_tab {
                ControlTab::Main => draw_main_controls(ui, &mut state, &mut store),
                ControlTab::Panels => {
                    draw_panel_controls(ui, &mut state, &mut adapter, &mut store)
                }
            }
        });

    ui_state.wants_pointer_input = ctx.wants_pointer_input();
    ui_state.side_panel_width = side_panel_response.response.rect.width();
    ui_state.top_bar_height = top_bar_response.response.rect.height();
}

fn draw_main_controls(ui: &mut egui::Ui, state: &mut ViewerState, store: &mut PkvStore) {
    ui.heading("View Presets");
    ui.horizontal_wrapped(|ui| {
        for preset in Preset::BUTTONS {
            let active = state.active_preset == preset;
            if ui
                .add(egui::Button::new(preset.label()).selected(active))
                .clicked()
            {
                state.apply_preset(preset);
                state.status = format!("Preset '{}' applied", preset.label());
            }
        }
    });

    ui.horizontal(|ui| {
        for (slot, label) in CustomSlot::ALL
            .into_iter()
            .zip(["Save as Custom 1", "Save as Custom 2"])
        {
            if ui.button(label).clicked() {
                state.status = match state.save_current_as_custom(slot, store) {
                    Ok(()) => format!("Saved current view as {}", Preset::from(slot).label()),
                    Err(err) => {
                        tracing::warn!("Failed to save custom preset: {err}");
                        format!("Save failed: {err}")
                    }
                };
            }
        }
    });

    ui.separator();
    ui.heading("Model Rotation");
    draw_rotation_sliders(ui, state, &SliderTarget::Model);
    ui.small(format!("Active preset: {}", state.active_preset.label()));
}

fn draw_panel_controls(
    ui: &mut egui::Ui,
    state: &mut ViewerState,
    adapter: &mut ModelAdapter,
    store: &mut PkvStore,
) {
    if !adapter.ready {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Waiting for model...");
        });
        return;
    }

    if state.panel_names.is_empty() {
        ui.label("No panels found in this model.");
    } else {
        let mut selected = state.selected_panel.clone();
        egui::ComboBox::from_label("Panel")
            .selected_text(selected.clone().unwrap_or_default())
            .show_ui(ui, |ui| {
                for name in &state.panel_names {
                    ui.selectable_value(&mut selected, Some(name.clone()), name.as_str());
                }
            });
        if selected != state.selected_panel {
            if let Some(name) = selected {
                state.select_panel(&name);
            }
        }

        if adapter.used_fallback {
            ui.small("No named panels found; every mesh is listed.");
        }

        if let Some(target) = state.slider_target() {
            ui.separator();
            draw_rotation_sliders(ui, state, &target);
        }
    }

    ui.separator();
    ui.horizontal_wrapped(|ui| {
        if ui.button("Reset All Panels").clicked() {
            state.reset_all_panels();
            state.status = "All panels reset".to_string();
        }

        if ui.button("Save Panel Positions").clicked() {
            state.status = match state.persist_panel_rotations(store) {
                Ok(()) => "Panel positions saved".to_string(),
                Err(err) => {
                    tracing::warn!("Failed to save panel positions: {err}");
                    format!("Save failed: {err}")
                }
            };
        }

        if ui.button("Rediscover Panels").clicked() {
            adapter.rediscover_requested = true;
        }
    });
}

fn draw_rotation_sliders(ui: &mut egui::Ui, state: &mut ViewerState, target: &SliderTarget) {
    let current = state.rotation_for(target);
    for axis in Axis::ALL {
        let mut value = current.get(axis);
        let response = ui.add(
            egui::Slider::new(&mut value, -ROTATION_LIMIT_DEG..=ROTATION_LIMIT_DEG)
                .step_by(1.0)
                .suffix("°")
                .text(format!("{} Rotation", axis.label())),
        );
        if response.changed() {
            state.set_axis_rotation(target, axis, value);
        }
    }
}
