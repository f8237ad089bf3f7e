use crate::viewer::config::{OrbitConfig, ViewerConfig};
use crate::viewer::scene::ViewerCamera;
use bevy::camera::Viewport;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, Window};

const PITCH_LIMIT: f32 = 1.5;

#[derive(Resource, Debug, Clone)]
pub struct OrbitCameraState {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub settings: OrbitConfig,
}

impl OrbitCameraState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        let target = Vec3::from_array(config.model_center);
        let offset = Vec3::from_array(config.camera.position) - target;
        let settings = config.orbit.clone();
        let distance = offset
            .length()
            .clamp(settings.min_distance, settings.max_distance);
        let direction = offset.normalize_or(Vec3::Z);

        Self {
            target,
            distance,
            yaw: direction.x.atan2(direction.z),
            pitch: direction.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            settings,
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        self.target + orbit_offset(self.yaw, self.pitch) * self.distance
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.settings.rotate_sensitivity;
        self.pitch = (self.pitch + delta.y * self.settings.rotate_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn pan(&mut self, delta: Vec2) {
        let back = orbit_offset(self.yaw, self.pitch);
        let mut right = Vec3::Y.cross(back);
        if right.length_squared() < 1e-6 {
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = back.cross(right).normalize_or_zero();

        let pan_scale = self.distance * self.settings.pan_sensitivity;
        self.target += (-delta.x * right + delta.y * up) * pan_scale;
    }

    pub fn zoom(&mut self, scroll: f32) {
        let zoom_factor = (1.0 - scroll * self.settings.zoom_step).clamp(0.2, 5.0);
        self.distance = (self.distance * zoom_factor)
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }
}

#[derive(Resource, Default)]
pub struct UiInteractionState {
    pub wants_pointer_input: bool,
    /// Logical pixels covered by egui on the left and along the top.
    pub side_panel_width: f32,
    pub top_bar_height: f32,
}

/// The part of a window of `window_size` physical pixels that egui leaves
/// uncovered. Panel extents are logical pixels. Always at least 1x1.
pub fn model_viewport(window_size: UVec2, scale_factor: f32, ui: &UiInteractionState) -> Viewport {
    let to_physical = |logical: f32| (logical.max(0.0) * scale_factor) as u32;
    let covered = UVec2::new(
        to_physical(ui.side_panel_width),
        to_physical(ui.top_bar_height),
    )
    .min(window_size.saturating_sub(UVec2::ONE));

    Viewport {
        physical_position: covered,
        physical_size: window_size.saturating_sub(covered).max(UVec2::ONE),
        depth: 0.0..1.0,
    }
}

pub fn update_camera_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_state: Res<UiInteractionState>,
    mut cameras: Query<&mut Camera, With<ViewerCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = window.physical_size();
    if window_size.cmpeq(UVec2::ZERO).any() {
        return;
    }

    let viewport = model_viewport(window_size, window.scale_factor(), &ui_state);
    for mut camera in &mut cameras {
        let unchanged = camera.viewport.as_ref().is_some_and(|current| {
            current.physical_position == viewport.physical_position
                && current.physical_size == viewport.physical_size
        });
        if !unchanged {
            camera.viewport = Some(viewport.clone());
        }
    }
}

pub fn orbit_camera_system(
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_state: Res<UiInteractionState>,
    mut orbit: ResMut<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
) {
    let mouse_delta = Vec2::new(mouse_motion.delta.x, -mouse_motion.delta.y);
    let scroll_delta = mouse_scroll.delta.y;

    let pointer_in_window = windows
        .single()
        .ok()
        .and_then(|w| w.cursor_position())
        .is_some();

    if pointer_in_window && !ui_state.wants_pointer_input {
        if mouse_buttons.pressed(MouseButton::Left) && mouse_delta.length_squared() > 0.0 {
            orbit.rotate(mouse_delta);
        }
        if mouse_buttons.pressed(MouseButton::Right) && mouse_delta.length_squared() > 0.0 {
            orbit.pan(mouse_delta);
        }
        if scroll_delta.abs() > f32::EPSILON {
            orbit.zoom(scroll_delta);
        }
    }

    let camera_position = orbit.camera_position();
    for mut transform in &mut camera_query {
        *transform = Transform::from_translation(camera_position).looking_at(orbit.target, Vec3::Y);
    }
}

fn orbit_offset(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        yaw.cos() * pitch.cos(),
    )
    .normalize_or_zero()
}
