use crate::viewer::config::ViewerConfig;
use crate::viewer::discovery::{
    DiscoveryOutcome, SceneNodeQuery, collect_scene_nodes, discover_panels,
};
use crate::viewer::rotation::{RotationVector, compose_panel_rotation, euler_angles, model_rotation};
use crate::viewer::state::ViewerState;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelBinding {
    pub name: String,
    pub entity: Entity,
}

/// Mutable access to node transforms in the live scene graph.
pub trait NodeTransforms {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform>;
}

impl NodeTransforms for Query<'_, '_, &mut Transform> {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.get_mut(entity).ok().map(Mut::into_inner)
    }
}

impl NodeTransforms for HashMap<Entity, Transform> {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.get_mut(&entity)
    }
}

/// Owns the link between discovered panel names and the asset's entities,
/// and is the only writer of their transforms.
#[derive(Resource, Debug)]
pub struct ModelAdapter {
    pub root: Option<Entity>,
    pub ready: bool,
    pub bindings: Vec<PanelBinding>,
    pub used_fallback: bool,
    pub rediscover_requested: bool,
    scale: f32,
    center: Vec3,
    original_poses: HashMap<Entity, Vec3>,
}

impl ModelAdapter {
    pub fn new(scale: f32, center: Vec3) -> Self {
        Self {
            root: None,
            ready: false,
            bindings: Vec::new(),
            used_fallback: false,
            rediscover_requested: false,
            scale,
            center,
            original_poses: HashMap::new(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.model_scale, Vec3::from_array(config.model_center))
    }

    /// Starts tracking a freshly spawned asset instance. Anything learned
    /// about a previous instance is dropped.
    pub fn attach(&mut self, root: Entity) {
        self.root = Some(root);
        self.ready = false;
        self.bindings.clear();
        self.used_fallback = false;
        self.original_poses.clear();
    }

    pub fn bind_panels(&mut self, entities: &[Entity], outcome: &DiscoveryOutcome) -> Vec<String> {
        self.bindings = outcome
            .panels
            .iter()
            .filter_map(|panel| {
                entities.get(panel.node_index).map(|entity| PanelBinding {
                    name: panel.name.clone(),
                    entity: *entity,
                })
            })
            .collect();
        self.used_fallback = outcome.used_fallback;
        self.ready = true;
        self.bindings.iter().map(|binding| binding.name.clone()).collect()
    }

    #[cfg(test)]
    pub fn original_pose(&self, entity: Entity) -> Option<Vec3> {
        self.original_poses.get(&entity).copied()
    }

    /// Writes the requested orientation state into the scene graph.
    pub fn apply(
        &mut self,
        model: RotationVector,
        panels: &BTreeMap<String, RotationVector>,
        transforms: &mut impl NodeTransforms,
    ) {
        if let Some(root) = self.root {
            if let Some(transform) = transforms.transform_mut(root) {
                *transform = Transform {
                    translation: self.center,
                    rotation: model_rotation(model),
                    scale: Vec3::splat(self.scale),
                };
            }
        }

        for binding in &self.bindings {
            let Some(transform) = transforms.transform_mut(binding.entity) else {
                continue;
            };
            let request = panels.get(&binding.name).copied().unwrap_or_default();

            if request.is_identity() {
                if let Some(original) = self.original_poses.get(&binding.entity) {
                    transform.rotation = compose_panel_rotation(*original, request);
                }
                continue;
            }

            let original = *self
                .original_poses
                .entry(binding.entity)
                .or_insert_with(|| euler_angles(transform.rotation));
            transform.rotation = compose_panel_rotation(original, request);
        }
    }
}

pub fn spawn_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    mut adapter: ResMut<ModelAdapter>,
) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.model_path.clone()));
    let root = commands
        .spawn((
            SceneRoot(scene),
            Transform::from_translation(Vec3::from_array(config.model_center))
                .with_scale(Vec3::splat(config.model_scale)),
        ))
        .observe(on_model_ready)
        .id();
    adapter.attach(root);
    info!("Loading model from {}", config.model_path);
}

pub fn on_model_ready(
    _ready: On<SceneInstanceReady>,
    mut adapter: ResMut<ModelAdapter>,
    mut state: ResMut<ViewerState>,
    children: Query<&Children>,
    scene_nodes: SceneNodeQuery,
) {
    run_discovery(&mut adapter, &mut state, &children, &scene_nodes);
}

pub fn rediscover_panels(
    mut adapter: ResMut<ModelAdapter>,
    mut state: ResMut<ViewerState>,
    children: Query<&Children>,
    scene_nodes: SceneNodeQuery,
) {
    if !adapter.rediscover_requested {
        return;
    }
    adapter.rediscover_requested = false;
    if !adapter.ready {
        return;
    }
    run_discovery(&mut adapter, &mut state, &children, &scene_nodes);
}

/// Scans the asset once and reports the panel names to the controller.
pub fn run_discovery(
    adapter: &mut ModelAdapter,
    state: &mut ViewerState,
    children: &Query<&Children>,
    scene_nodes: &SceneNodeQuery,
) {
    let Some(root) = adapter.root else {
        return;
    };

    let (entities, nodes) = collect_scene_nodes(root, children, scene_nodes);
    let outcome = discover_panels(&nodes);
    let panel_names = adapter.bind_panels(&entities, &outcome);

    if outcome.used_fallback {
        warn!(
            "No named panels in model; using {} meshes as panels",
            panel_names.len()
        );
    } else {
        info!("Discovered {} panels: {:?}", panel_names.len(), panel_names);
    }

    state.on_panels_discovered(panel_names);
}

pub fn apply_rotations(
    mut state: ResMut<ViewerState>,
    mut adapter: ResMut<ModelAdapter>,
    mut transforms: Query<&mut Transform>,
) {
    if !state.dirty {
        return;
    }
    adapter.apply(state.model_rotation, &state.panel_rotations, &mut transforms);
    state.dirty = false;
}
