use std::path::PathBuf;
use wordtree_core::geom::project;
use wordtree_core::{LayoutConfig, Tree, load};
use wordtree_render::model::LayoutPoint;
use wordtree_render::{LayoutOptions, layout_radial};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn teak_tree() -> Tree {
    let path = workspace_root().join("fixtures").join("teak.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    load(&text).expect("load ok").expect("non-empty fixture")
}

#[test]
fn every_node_is_placed_inside_the_angular_budget() {
    let tree = teak_tree();
    for angle in [90.0, 180.0, 270.0, 360.0] {
        let cfg = LayoutConfig {
            angle,
            ..Default::default()
        };
        let layout = layout_radial(Some(&tree), &cfg, &LayoutOptions::default()).expect("layout");
        assert_eq!(layout.nodes.len(), tree.len());
        for node in &layout.nodes {
            assert!(
                node.x >= 0.0 && node.x <= angle,
                "{} at {} outside [0, {angle}]",
                node.id,
                node.x
            );
        }
    }
}

#[test]
fn radius_grows_by_one_step_per_level() {
    let tree = teak_tree();
    let cfg = LayoutConfig {
        radius: 100.0,
        ..Default::default()
    };
    let layout = layout_radial(Some(&tree), &cfg, &LayoutOptions::default()).expect("layout");
    assert_eq!(layout.max_depth, 3);
    for node in &layout.nodes {
        assert!((node.y - node.depth as f64 * 100.0).abs() < 1e-9, "{}", node.id);
    }
}

#[test]
fn positions_are_the_projected_polar_coordinates() {
    let tree = teak_tree();
    let layout = layout_radial(Some(&tree), &LayoutConfig::default(), &LayoutOptions::default())
        .expect("layout");

    let root = &layout.nodes[0];
    assert_eq!(root.id, "TEA");
    assert_eq!(root.position, LayoutPoint { x: 0.0, y: 0.0 });
    for node in &layout.nodes {
        assert_eq!(node.position, LayoutPoint::from(project(node.x, node.y)));
    }
}

#[test]
fn siblings_keep_input_order_around_the_circle() {
    let tree = teak_tree();
    let layout = layout_radial(Some(&tree), &LayoutConfig::default(), &LayoutOptions::default())
        .expect("layout");
    let x_of = |id: &str| layout.find(id).expect(id).x;
    assert!(x_of("TEA.TEAK") < x_of("TEA.TEAL"));
    assert!(x_of("TEA.TEAL") < x_of("TEA.TEAM"));
    assert!(x_of("TEA.TEAK.STEAK") < x_of("TEA.TEAK.TWEAK"));
}

#[test]
fn layout_is_deterministic() {
    let tree = teak_tree();
    let a = layout_radial(Some(&tree), &LayoutConfig::default(), &LayoutOptions::default())
        .expect("layout");
    let b = layout_radial(Some(&tree), &LayoutConfig::default(), &LayoutOptions::default())
        .expect("layout");
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).expect("json"),
        serde_json::to_string(&b).expect("json")
    );
}

#[test]
fn empty_input_lays_out_as_an_empty_scene() {
    let layout =
        layout_radial(None, &LayoutConfig::default(), &LayoutOptions::default()).expect("layout");
    assert!(layout.is_empty());
    assert!(layout.links.is_empty());
    assert!(layout.bounds.is_none());
}
