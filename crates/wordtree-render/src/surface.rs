//! Drawing capability the scene renderer targets.
//!
//! The scene only speaks in groups, paths, circles, rects and text; a surface decides how those
//! become output (an SVG string, a recording for tests, ...).

use crate::model::{LayoutPoint, LayoutRect, LinkPath, TextAnchor};
use crate::text::{TextMeasurer, TextMetrics, TextStyle, WrappedLine};
use wordtree_core::ZoomTransform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64),
}

#[derive(Debug, Clone, Copy)]
pub enum TextLines<'a> {
    Single(&'a str),
    /// Each line is positioned at the element origin and pushed down by its `dy`.
    Wrapped(&'a [WrappedLine]),
}

#[derive(Debug, Clone, Copy)]
pub struct TextElement<'a> {
    pub class: &'a str,
    pub lines: TextLines<'a>,
    pub x: f64,
    /// Baseline shift, e.g. `.31em` to center a single line on its anchor.
    pub dy: Option<&'a str>,
    pub anchor: Option<TextAnchor>,
    pub font_size: f64,
    pub transform: &'a [Transform],
    /// `(name, value)` annotations kept alongside the element.
    pub data: &'a [(&'a str, &'a str)],
    pub title: Option<&'a str>,
}

pub trait RenderSurface {
    /// Pan/zoom applied to everything drawn on the surface.
    fn set_view_transform(&mut self, zoom: ZoomTransform);
    fn begin_group(&mut self, class: &str, transform: &[Transform]);
    fn end_group(&mut self);
    fn path(&mut self, class: &str, path: &LinkPath, stroke_width: f64);
    fn circle(&mut self, center: LayoutPoint, r: f64);
    fn rect(&mut self, class: &str, rect: LayoutRect);
    fn text(&mut self, text: &TextElement<'_>);
    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Lets text layout helpers measure through a surface.
pub struct SurfaceMeasurer<'s, S: ?Sized>(pub &'s S);

impl<S: RenderSurface + ?Sized> TextMeasurer for SurfaceMeasurer<'_, S> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.0.measure_text(text, style)
    }
}
