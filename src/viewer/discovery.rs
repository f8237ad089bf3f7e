use bevy::ecs::query::Has;
use bevy::gltf::GltfMeshName;
use bevy::prelude::*;

/// Case-insensitive substrings that mark a node as a panel.
pub const PANEL_NAME_KEYWORDS: [&str; 4] = ["panel", "solar", "array", "wing"];
/// Name prefix for meshes promoted to panels when nothing matched by name.
pub const FALLBACK_PANEL_PREFIX: &str = "Panel_";

/// Per-entity data read while walking the asset hierarchy.
pub type SceneNodeQuery<'w, 's> = Query<
    'w,
    's,
    (
        Option<&'static Name>,
        Has<Mesh3d>,
        Has<GltfMeshName>,
    ),
>;

/// Flat, traversal-ordered view of one node in the loaded asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub is_mesh: bool,
    /// A glTF mesh primitive. Its name is `<mesh>.<material>`, so it is
    /// never a name candidate; only the fallback pass considers it.
    pub is_primitive: bool,
}

impl SceneNode {
    fn panel_name(&self) -> Option<&str> {
        if self.is_primitive {
            return None;
        }
        self.name.as_deref().filter(|name| is_panel_name(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPanel {
    pub name: String,
    pub node_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    pub panels: Vec<DiscoveredPanel>,
    pub used_fallback: bool,
}

impl DiscoveryOutcome {
    pub fn names(&self) -> Vec<String> {
        self.panels.iter().map(|panel| panel.name.clone()).collect()
    }
}

pub fn is_panel_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    PANEL_NAME_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

fn fallback_required(matched: &[DiscoveredPanel]) -> bool {
    matched.is_empty()
}

/// Picks panels by name; if none match, every mesh becomes `Panel_<n>`.
/// Results keep traversal order.
pub fn discover_panels(nodes: &[SceneNode]) -> DiscoveryOutcome {
    let matched: Vec<DiscoveredPanel> = nodes
        .iter()
        .enumerate()
        .filter_map(|(node_index, node)| {
            node.panel_name().map(|name| DiscoveredPanel {
                name: name.to_string(),
                node_index,
            })
        })
        .collect();

    if !fallback_required(&matched) {
        return DiscoveryOutcome {
            panels: matched,
            used_fallback: false,
        };
    }

    let panels = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_mesh)
        .enumerate()
        .map(|(sequence, (node_index, _))| DiscoveredPanel {
            name: format!("{FALLBACK_PANEL_PREFIX}{sequence}"),
            node_index,
        })
        .collect();

    DiscoveryOutcome {
        panels,
        used_fallback: true,
    }
}

/// Walks `root` and its descendants depth-first (pre-order). The returned
/// entities line up index-for-index with the returned nodes.
pub fn collect_scene_nodes(
    root: Entity,
    children: &Query<&Children>,
    scene_nodes: &SceneNodeQuery,
) -> (Vec<Entity>, Vec<SceneNode>) {
    let mut entities = Vec::new();
    let mut nodes = Vec::new();
    visit_node(root, children, scene_nodes, &mut entities, &mut nodes);
    (entities, nodes)
}

fn visit_node(
    entity: Entity,
    children: &Query<&Children>,
    scene_nodes: &SceneNodeQuery,
    entities: &mut Vec<Entity>,
    nodes: &mut Vec<SceneNode>,
) {
    let node = match scene_nodes.get(entity) {
        Ok((name, is_mesh, is_primitive)) => SceneNode {
            name: name.map(|name| name.as_str().to_string()),
            is_mesh,
            is_primitive,
        },
        Err(_) => SceneNode {
            name: None,
            is_mesh: false,
            is_primitive: false,
        },
    };
    entities.push(entity);
    nodes.push(node);

    if let Ok(node_children) = children.get(entity) {
        for &child in &**node_children {
            visit_node(child, children, scene_nodes, entities, nodes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn named(name: &str) -> SceneNode {
        SceneNode {
            name: Some(name.to_string()),
            is_mesh: false,
            is_primitive: false,
        }
    }

    fn primitive(name: Option<&str>) -> SceneNode {
        SceneNode {
            name: name.map(str::to_string),
            is_mesh: true,
            is_primitive: true,
        }
    }

    #[rstest]
    #[case("SolarWingLeft", true)]
    #[case("PANEL_03", true)]
    #[case("antenna_array", true)]
    #[case("Wingtip", true)]
    #[case("Body", false)]
    #[case("Camera", false)]
    #[case("", false)]
    fn panel_names_match_case_insensitively(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_panel_name(name), expected);
    }

    #[test]
    fn named_panels_keep_traversal_order() {
        let nodes = vec![
            named("Body"),
            named("SolarWingLeft"),
            named("SolarWingRight"),
            named("Camera"),
        ];

        let outcome = discover_panels(&nodes);

        assert!(!outcome.used_fallback);
        assert_eq!(
            outcome.panels,
            vec![
                DiscoveredPanel {
                    name: "SolarWingLeft".to_string(),
                    node_index: 1,
                },
                DiscoveredPanel {
                    name: "SolarWingRight".to_string(),
                    node_index: 2,
                },
            ]
        );
    }

    #[test]
    fn order_is_not_alphabetical() {
        let nodes = vec![named("Wing_Z"), named("Array_A"), named("panel_m")];
        assert_eq!(
            discover_panels(&nodes).names(),
            vec!["Wing_Z", "Array_A", "panel_m"]
        );
    }

    #[test]
    fn fallback_names_every_mesh() {
        let nodes = vec![
            named("Root"),
            primitive(Some("Hull.Paint")),
            named("Group"),
            primitive(None),
            primitive(Some("Dish")),
        ];

        let outcome = discover_panels(&nodes);

        assert!(outcome.used_fallback);
        assert_eq!(outcome.names(), vec!["Panel_0", "Panel_1", "Panel_2"]);
        let indices: Vec<usize> = outcome.panels.iter().map(|p| p.node_index).collect();
        assert_eq!(indices, vec![1, 3, 4]);
    }

    #[test]
    fn mesh_material_primitive_names_are_not_panels() {
        let nodes = vec![
            named("Body"),
            primitive(Some("Body.SolarCell")),
            named("SolarWingLeft"),
            primitive(Some("SolarWingLeft.Metal")),
            named("SolarWingRight"),
            primitive(Some("WingMesh.Metal")),
            named("Camera"),
        ];

        let outcome = discover_panels(&nodes);

        assert!(!outcome.used_fallback);
        assert_eq!(
            outcome.panels,
            vec![
                DiscoveredPanel {
                    name: "SolarWingLeft".to_string(),
                    node_index: 2,
                },
                DiscoveredPanel {
                    name: "SolarWingRight".to_string(),
                    node_index: 4,
                },
            ]
        );
    }

    #[test]
    fn primitive_names_alone_trigger_fallback() {
        let nodes = vec![
            named("Body"),
            primitive(Some("Body.SolarCell")),
            named("Dish"),
            primitive(Some("Dish.PanelPaint")),
        ];

        let outcome = discover_panels(&nodes);

        assert!(outcome.used_fallback);
        assert_eq!(outcome.names(), vec!["Panel_0", "Panel_1"]);
    }

    #[test]
    fn no_matches_and_no_meshes_yields_nothing() {
        let outcome = discover_panels(&[named("Root"), named("Empty")]);
        assert!(outcome.used_fallback);
        assert!(outcome.panels.is_empty());
    }

    #[test]
    fn named_plain_mesh_suppresses_fallback() {
        let solar = SceneNode {
            name: Some("Solar".to_string()),
            is_mesh: true,
            is_primitive: false,
        };
        let nodes = vec![primitive(Some("Hull.Paint")), solar, primitive(None)];
        let outcome = discover_panels(&nodes);
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.names(), vec!["Solar"]);
    }

    #[test]
    fn collects_root_then_descendants_depth_first() {
        let mut world = World::new();
        let leaf = world
            .spawn((
                Name::new("SolarWingLeft.Metal"),
                Mesh3d::default(),
                GltfMeshName("SolarWingLeft".to_string()),
            ))
            .id();
        let arm = world.spawn(Name::new("SolarWingLeft")).add_child(leaf).id();
        let body = world.spawn(Name::new("Body")).id();
        let root = world.spawn_empty().add_children(&[arm, body]).id();

        let mut state =
            SystemState::<(Query<&Children>, SceneNodeQuery)>::new(&mut world);
        let (children, scene_nodes) = state.get(&world);

        let (entities, nodes) = collect_scene_nodes(root, &children, &scene_nodes);

        assert_eq!(entities, vec![root, arm, leaf, body]);
        assert_eq!(
            nodes,
            vec![
                SceneNode {
                    name: None,
                    is_mesh: false,
                    is_primitive: false,
                },
                named("SolarWingLeft"),
                primitive(Some("SolarWingLeft.Metal")),
                named("Body"),
            ]
        );
    }

    proptest! {
        #[test]
        fn fallback_yields_one_name_per_mesh(flags in proptest::collection::vec(any::<bool>(), 0..40)) {
            let nodes: Vec<SceneNode> = flags
                .iter()
                .map(|&is_mesh| SceneNode {
                    name: Some("Part".to_string()),
                    is_mesh,
                    is_primitive: is_mesh,
                })
                .collect();
            let mesh_count = flags.iter().filter(|&&is_mesh| is_mesh).count();

            let names = discover_panels(&nodes).names();

            let expected: Vec<String> = (0..mesh_count).map(|i| format!("Panel_{i}")).collect();
            prop_assert_eq!(names, expected);
        }
    }
}
