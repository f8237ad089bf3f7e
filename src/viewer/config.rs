use crate::viewer::VIEWER_CONFIG_PATH;
use anyhow::Context;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: String,
    pub model_scale: f32,
    pub model_center: [f32; 3],
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub orbit: OrbitConfig,
    pub storage: StorageConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: "models/satellite.glb".to_string(),
            model_scale: 1.0,
            model_center: [0.0, 0.0, 0.0],
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            orbit: OrbitConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub position: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            position: [0.0, 2.0, 8.0],
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub directional_illuminance: f32,
    pub directional_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 500.0,
            directional_illuminance: 12_000.0,
            directional_position: [10.0, 10.0, 5.0],
        }
    }
}

/// Pointer sensitivities for the orbit rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub rotate_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.006,
            pan_sensitivity: 0.0018,
            zoom_step: 0.10,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub organization: String,
    pub application: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            organization: "solar-viewer".to_string(),
            application: "SolarViewer".to_string(),
        }
    }
}

pub fn load_viewer_config_from(path: &Path) -> anyhow::Result<ViewerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_viewer_config(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_viewer_config(text: &str) -> anyhow::Result<ViewerConfig> {
    let config = ron::de::from_str::<ViewerConfig>(text)?;
    anyhow::ensure!(
        !config.model_path.trim().is_empty(),
        "model_path must not be empty"
    );
    anyhow::ensure!(config.model_scale > 0.0, "model_scale must be > 0");
    Ok(config)
}

pub fn load_viewer_config() -> ViewerConfig {
    load_viewer_config_from(Path::new(VIEWER_CONFIG_PATH)).unwrap_or_else(|err| {
        tracing::warn!("Falling back to built-in viewer config: {err:#}");
        ViewerConfig::default()
    })
}
