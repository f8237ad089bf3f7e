pub mod adapter;
pub mod app;
pub mod camera;
pub mod config;
pub mod discovery;
pub mod presets;
pub mod rotation;
pub mod scene;
pub mod state;
pub mod storage;
pub mod ui;

pub const VIEWER_CONFIG_PATH: &str = "config/viewer.ron";
pub const CUSTOM_PRESETS_KEY: &str = "customPresets";
pub const PANEL_ROTATIONS_KEY: &str = "panelRotations";
pub const ROTATION_LIMIT_DEG: f32 = 180.0;
