use crate::{Error, Result};
use crate::model::{
    Bounds, LayoutLink, LayoutNode, LayoutPoint, LinkPath, NodeLabel, RadialLayout, TextAnchor,
};
use crate::radial::tidy_tree;
use crate::text::{TextMeasurer, TextStyle};
use wordtree_core::geom::{along, project};
use wordtree_core::{LabelMode, LayoutConfig, Tree, TreeNode};

pub const NODE_RADIUS: f64 = 2.5;
pub const LABEL_OFFSET: f64 = 6.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;

/// Label text for `node` in `mode`. The root always shows its word.
pub fn label_text<'a>(node: &'a TreeNode, mode: LabelMode) -> &'a str {
    match mode {
        LabelMode::Steals if node.parent.is_some() => node.record.shortsteal.as_str(),
        _ => node.word(),
    }
}

/// The `steal` annotation carried by every label: the root's word, otherwise its short steal.
pub fn steal_text(node: &TreeNode) -> &str {
    if node.parent.is_none() {
        node.word()
    } else {
        node.record.shortsteal.as_str()
    }
}

pub fn link_stroke_width(prob: f64, playability: bool) -> f64 {
    if playability {
        prob.log2().max(1.0)
    } else {
        DEFAULT_STROKE_WIDTH
    }
}

/// Link from the child at `(cx, cy)` back to its parent at `(px, py)` (polar coordinates).
pub fn link_path(cx: f64, cy: f64, px: f64, py: f64) -> LinkPath {
    let mid = (cy + py) / 2.0;
    LinkPath {
        start: project(cx, cy).into(),
        control1: project(cx, mid).into(),
        control2: project(px, mid).into(),
        end: project(px, py).into(),
    }
}

fn node_label(
    node: &TreeNode,
    x: f64,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> NodeLabel {
    let text = unescape_label(label_text(node, config.label_mode));
    let outward = (x < 180.0) == node.is_leaf();
    let (anchor, offset) = if outward {
        (TextAnchor::Start, LABEL_OFFSET)
    } else {
        (TextAnchor::End, -LABEL_OFFSET)
    };
    let rotate = if x < 180.0 { x - 90.0 } else { x + 90.0 };
    let tooltip_angle = if node.is_leaf() { x } else { x + 180.0 };
    let width = measurer
        .measure(&text, &TextStyle::sans_serif(config.font_size))
        .width;

    NodeLabel {
        text,
        anchor,
        x: offset,
        rotate,
        tooltip_angle,
        width,
        font_size: config.font_size,
    }
}

fn unescape_label(text: &str) -> String {
    htmlize::unescape(text).into_owned()
}

/// Extremes of a node's circle and its rotated label.
fn node_extents(node: &LayoutNode) -> [(f64, f64); 6] {
    let p = node.position;
    let label = &node.label;
    let (near, far) = match label.anchor {
        TextAnchor::Start => (label.x, label.x + label.width),
        TextAnchor::End => (label.x - label.width, label.x),
    };
    let half = label.font_size / 2.0;
    let a = along(label.rotate, near);
    let b = along(label.rotate, far);
    let n = along(label.rotate + 90.0, half);
    [
        (p.x - NODE_RADIUS, p.y - NODE_RADIUS),
        (p.x + NODE_RADIUS, p.y + NODE_RADIUS),
        (p.x + a.x + n.x, p.y + a.y + n.y),
        (p.x + a.x - n.x, p.y + a.y - n.y),
        (p.x + b.x + n.x, p.y + b.y + n.y),
        (p.x + b.x - n.x, p.y + b.y - n.y),
    ]
}

/// Lays `tree` out radially: angular budget `config.angle`, one `config.radius` per level.
pub fn layout_tree(
    tree: &Tree,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<RadialLayout> {
    config.validate()?;
    if tree.is_empty() {
        return Ok(RadialLayout::empty(config.clone()));
    }

    let max_depth = tree.max_depth();
    let positions = tidy_tree(tree, config.angle, config.radius * max_depth as f64);
    if let Some(bad) = positions.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(Error::InvalidLayout {
            message: format!("non-finite position for node {}", tree.node(bad).id),
        });
    }

    let nodes: Vec<LayoutNode> = tree
        .nodes()
        .iter()
        .zip(&positions)
        .map(|(node, pos)| LayoutNode {
            id: node.id.clone(),
            word: node.word().to_string(),
            steal: steal_text(node).to_string(),
            def: node.record.def.clone(),
            prob: node.record.prob,
            depth: node.depth,
            parent: node.parent,
            is_leaf: node.is_leaf(),
            x: pos.x,
            y: pos.y,
            position: LayoutPoint::from(project(pos.x, pos.y)),
            label: node_label(node, pos.x, config, measurer),
        })
        .collect();

    let links: Vec<LayoutLink> = nodes
        .iter()
        .enumerate()
        .filter_map(|(target, child)| {
            let source = child.parent?;
            let parent = &nodes[source];
            Some(LayoutLink {
                source,
                target,
                target_id: child.id.clone(),
                path: link_path(child.x, child.y, parent.x, parent.y),
                stroke_width: link_stroke_width(child.prob, config.playability),
            })
        })
        .collect();

    let bounds = Bounds::from_points(nodes.iter().flat_map(node_extents));

    tracing::debug!(
        nodes = nodes.len(),
        links = links.len(),
        max_depth,
        "radial layout"
    );

    Ok(RadialLayout {
        config: config.clone(),
        max_depth,
        nodes,
        links,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use wordtree_core::{Record, stratify};

    fn record(id: &str, prob: f64, shortsteal: &str) -> Record {
        Record {
            prob,
            shortsteal: shortsteal.to_string(),
            ..Record::new(id)
        }
    }

    fn sample() -> Tree {
        stratify(&[
            record("TEA", 0.0, ""),
            record("TEA.TEAK", 8.0, "+K"),
            record("TEA.TEAK.STEAK", 0.5, "+S"),
            record("TEA.TEAL", 2.0, "+L"),
        ])
        .unwrap()
        .unwrap()
    }

    #[test]
    fn stroke_width_follows_playability() {
        assert_eq!(link_stroke_width(8.0, true), 3.0);
        assert_eq!(link_stroke_width(1.5, true), 1.0);
        assert_eq!(link_stroke_width(0.0, true), 1.0);
        assert_eq!(link_stroke_width(8.0, false), 1.5);
    }

    #[test]
    fn labels_face_outward_for_leaves_on_the_right() {
        let tree = sample();
        let layout = layout_tree(
            &tree,
            &LayoutConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
        .unwrap();

        for node in &layout.nodes {
            let start = (node.x < 180.0) == node.is_leaf;
            assert_eq!(node.label.anchor == TextAnchor::Start, start, "{}", node.id);
            assert_eq!(node.label.x, if start { 6.0 } else { -6.0 });
            let rotate = if node.x < 180.0 {
                node.x - 90.0
            } else {
                node.x + 90.0
            };
            assert_eq!(node.label.rotate, rotate);
            let tooltip = if node.is_leaf { node.x } else { node.x + 180.0 };
            assert_eq!(node.label.tooltip_angle, tooltip);
        }
    }

    #[test]
    fn steals_mode_keeps_the_root_word() {
        let tree = sample();
        let cfg = LayoutConfig {
            label_mode: LabelMode::Steals,
            ..Default::default()
        };
        let layout = layout_tree(&tree, &cfg, &DeterministicTextMeasurer::default()).unwrap();
        let texts: Vec<&str> = layout.nodes.iter().map(|n| n.label.text.as_str()).collect();
        assert_eq!(texts, ["TEA", "+K", "+S", "+L"]);
        assert_eq!(layout.nodes[0].steal, "TEA");
        assert_eq!(layout.nodes[1].steal, "+K");
    }

    #[test]
    fn links_run_from_child_to_parent() {
        let tree = sample();
        let layout = layout_tree(
            &tree,
            &LayoutConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
        .unwrap();
        assert_eq!(layout.links.len(), layout.nodes.len() - 1);
        for link in &layout.links {
            let child = &layout.nodes[link.target];
            let parent = &layout.nodes[link.source];
            assert_eq!(child.parent, Some(link.source));
            assert_eq!(link.path.start, child.position);
            assert_eq!(link.path.end, parent.position);
            let mid = (child.y + parent.y) / 2.0;
            assert_eq!(link.path.control1, LayoutPoint::from(project(child.x, mid)));
            assert_eq!(link.path.control2, LayoutPoint::from(project(parent.x, mid)));
        }
    }

    #[test]
    fn bounds_cover_every_node() {
        let tree = sample();
        let layout = layout_tree(
            &tree,
            &LayoutConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
        .unwrap();
        let b = layout.bounds.unwrap();
        for n in &layout.nodes {
            assert!(n.position.x >= b.min_x && n.position.x <= b.max_x);
            assert!(n.position.y >= b.min_y && n.position.y <= b.max_y);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = LayoutConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(layout_tree(&sample(), &cfg, &DeterministicTextMeasurer::default()).is_err());
    }
}
