use crate::viewer::adapter::{ModelAdapter, apply_rotations, rediscover_panels, spawn_model};
use crate::viewer::camera::{
    OrbitCameraState, UiInteractionState, orbit_camera_system, update_camera_viewport,
};
use crate::viewer::config::load_viewer_config;
use crate::viewer::scene::{ambient_light, setup_viewer_scene};
use crate::viewer::state::{ViewerState, load_persisted_state};
use crate::viewer::ui::ui_system;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use bevy_pkv::PkvStore;

pub fn run() {
    let config = load_viewer_config();
    let store = PkvStore::new(&config.storage.organization, &config.storage.application);

    App::new()
        .insert_resource(store)
        .insert_resource(ambient_light(&config))
        .insert_resource(OrbitCameraState::from_config(&config))
        .insert_resource(ModelAdapter::from_config(&config))
        .insert_resource(ViewerState::default())
        .insert_resource(UiInteractionState::default())
        .insert_resource(config)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Solar Viewer".to_string(),
                resolution: (1400, 900).into(),
                present_mode: PresentMode::AutoVsync,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_systems(
            Startup,
            (load_persisted_state, setup_viewer_scene, spawn_model).chain(),
        )
        .add_systems(Update, (rediscover_panels, apply_rotations).chain())
        .add_systems(Update, update_camera_viewport)
        .add_systems(Update, orbit_camera_system)
        .add_systems(EguiPrimaryContextPass, ui_system)
        .run();
}
