//! Walks a [`RadialLayout`] and draws it on a [`RenderSurface`].

use crate::layout::NODE_RADIUS;
use crate::model::{LayoutPoint, RadialLayout};
use crate::surface::{RenderSurface, SurfaceMeasurer, TextElement, TextLines, Transform};
use crate::tooltip::{definition_text, tooltip_for_node};
use crate::{Error, Result};

pub const LABEL_DY: &str = ".31em";

/// Draws links under nodes, then the tooltip for `tooltip_for` (if any) on top.
pub fn draw_tree<S: RenderSurface + ?Sized>(
    surface: &mut S,
    layout: &RadialLayout,
    tooltip_for: Option<&str>,
) -> Result<()> {
    surface.set_view_transform(layout.config.zoom.clamped());

    surface.begin_group("links", &[]);
    for link in &layout.links {
        surface.path("link", &link.path, link.stroke_width);
    }
    surface.end_group();

    surface.begin_group("nodes", &[]);
    for node in &layout.nodes {
        let class = if node.is_leaf {
            "node node--leaf"
        } else {
            "node node--internal"
        };
        surface.begin_group(
            class,
            &[Transform::Translate(node.position.x, node.position.y)],
        );
        surface.circle(LayoutPoint { x: 0.0, y: 0.0 }, NODE_RADIUS);

        let def = definition_text(node);
        let data = [
            ("word", node.word.as_str()),
            ("steal", node.steal.as_str()),
            ("def", def.as_str()),
        ];
        surface.text(&TextElement {
            class: "node-label",
            lines: TextLines::Single(&node.label.text),
            x: node.label.x,
            dy: Some(LABEL_DY),
            anchor: Some(node.label.anchor),
            font_size: node.label.font_size,
            transform: &[Transform::Rotate(node.label.rotate)],
            data: &data,
            title: Some(&def),
        });
        surface.end_group();
    }
    surface.end_group();

    if let Some(id) = tooltip_for {
        let node = layout
            .find(id)
            .ok_or_else(|| Error::UnknownNode { id: id.to_string() })?;
        let tip = tooltip_for_node(layout, node, &SurfaceMeasurer(&*surface));
        surface.rect("background", tip.background);
        surface.text(&TextElement {
            class: "tooltip",
            lines: TextLines::Wrapped(&tip.lines),
            x: 0.0,
            dy: None,
            anchor: None,
            font_size: tip.font_size,
            transform: &[Transform::Translate(tip.origin.x, tip.origin.y)],
            data: &[],
            title: None,
        });
    }

    Ok(())
}
