use serde::{Deserialize, Serialize};
use wordtree_core::LayoutConfig;
use wordtree_core::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for LayoutPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Placement of a node's text relative to the node's own translated origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLabel {
    pub text: String,
    pub anchor: TextAnchor,
    /// Offset along the rotated baseline (`+6` or `-6`).
    pub x: f64,
    /// Rotation in degrees applied to the text element.
    pub rotate: f64,
    /// Direction in which the tooltip is pushed away from the node.
    pub tooltip_angle: f64,
    pub width: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub word: String,
    pub steal: String,
    pub def: String,
    pub prob: f64,
    pub depth: usize,
    pub parent: Option<usize>,
    pub is_leaf: bool,
    /// Angular position in degrees, within `[0, angle]`.
    pub x: f64,
    /// Distance from the center.
    pub y: f64,
    pub position: LayoutPoint,
    pub label: NodeLabel,
}

/// Cubic Bézier from the child (`start`) back to its parent (`end`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkPath {
    pub start: LayoutPoint,
    pub control1: LayoutPoint,
    pub control2: LayoutPoint,
    pub end: LayoutPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLink {
    pub source: usize,
    pub target: usize,
    pub target_id: String,
    pub path: LinkPath,
    pub stroke_width: f64,
}

/// A laid out word tree. Node indices match the stratified tree (pre-order, root first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialLayout {
    pub config: LayoutConfig,
    pub max_depth: usize,
    pub nodes: Vec<LayoutNode>,
    pub links: Vec<LayoutLink>,
    pub bounds: Option<Bounds>,
}

impl RadialLayout {
    /// The scene for an empty dataset.
    pub fn empty(config: LayoutConfig) -> Self {
        Self {
            config,
            max_depth: 0,
            nodes: Vec::new(),
            links: Vec::new(),
            bounds: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
