use crate::viewer::camera::OrbitCameraState;
use crate::viewer::config::ViewerConfig;
use bevy::camera::ClearColorConfig;
use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;
use bevy_egui::PrimaryEguiContext;

#[derive(Component)]
pub struct ViewerCamera;

pub fn ambient_light(config: &ViewerConfig) -> GlobalAmbientLight {
    GlobalAmbientLight {
        color: Color::WHITE,
        brightness: config.lighting.ambient_brightness,
        affects_lightmapped_meshes: true,
    }
}

pub fn setup_viewer_scene(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    orbit: Res<OrbitCameraState>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_deg.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..default()
        }),
        Transform::from_translation(orbit.camera_position()).looking_at(orbit.target, Vec3::Y),
        ViewerCamera,
    ));
    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        RenderLayers::layer(31),
        PrimaryEguiContext,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: config.lighting.directional_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(config.lighting.directional_position))
            .looking_at(Vec3::from_array(config.model_center), Vec3::Y),
    ));
}
