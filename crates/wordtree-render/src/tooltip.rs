//! Definition tooltip placed next to a node's label.

use crate::model::{LayoutNode, LayoutPoint, LayoutRect, RadialLayout};
use crate::text::{TextMeasurer, TextStyle, WrappedLine, wrap_words};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use wordtree_core::geom::project;

pub const MISSING_DEFINITION: &str = "Definition not available";

/// Horizontal and vertical slack added around the tooltip text.
const BACKGROUND_PAD_X: f64 = 3.0;
const BACKGROUND_EXTRA_WIDTH: f64 = 5.0;
const BACKGROUND_EXTRA_HEIGHT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub node_id: String,
    pub lines: Vec<WrappedLine>,
    pub line_height: f64,
    pub font_size: f64,
    /// Baseline origin of the first line.
    pub origin: LayoutPoint,
    pub width: f64,
    pub height: f64,
    pub background: LayoutRect,
}

/// The node's definition with HTML entities decoded, or the placeholder when it is blank.
pub fn definition_text(node: &LayoutNode) -> String {
    let def = htmlize::unescape(node.def.as_str());
    if def.trim().is_empty() {
        MISSING_DEFINITION.to_string()
    } else {
        def.into_owned()
    }
}

/// Lays out the tooltip for the node with `id`.
pub fn layout_tooltip(
    layout: &RadialLayout,
    id: &str,
    measurer: &dyn TextMeasurer,
) -> Result<Tooltip> {
    let node = layout.find(id).ok_or_else(|| Error::UnknownNode { id: id.to_string() })?;
    Ok(tooltip_for_node(layout, node, measurer))
}

pub fn tooltip_for_node(
    layout: &RadialLayout,
    node: &LayoutNode,
    measurer: &dyn TextMeasurer,
) -> Tooltip {
    let font_size = layout.config.font_size;
    let line_height = font_size;
    let style = TextStyle::sans_serif(font_size);
    let text = definition_text(node);
    let lines = wrap_words(
        &text,
        measurer,
        &style,
        layout.config.tooltip_width,
        line_height,
    );

    let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
    let joined = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let height = measurer.measure(&joined, &style).height;

    let push = project(node.label.tooltip_angle, node.label.width / 2.0);
    let base = LayoutPoint {
        x: node.position.x + push.x,
        y: node.position.y + push.y,
    };

    Tooltip {
        node_id: node.id.clone(),
        lines,
        line_height,
        font_size,
        origin: LayoutPoint {
            x: base.x - width / 2.0,
            y: base.y,
        },
        width,
        height,
        background: LayoutRect {
            x: base.x - (width / 2.0 + BACKGROUND_PAD_X),
            y: base.y - line_height,
            width: width + BACKGROUND_EXTRA_WIDTH,
            height: height + BACKGROUND_EXTRA_HEIGHT,
        },
    }
}
