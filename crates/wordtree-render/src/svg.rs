use crate::Result;
use crate::model::{Bounds, LayoutRect, RadialLayout};
use crate::scene::draw_tree;
use crate::text::TextMeasurer;

mod style;
mod surface;
pub(crate) mod util;

pub use style::StyleMode;
pub use surface::SvgSurface;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`; the stylesheet is scoped to it.
    pub diagram_id: Option<String>,
    /// Extra space around the content bounds in the viewBox.
    pub viewbox_padding: f64,
    /// Clamp range for the output width and height when no image size is configured.
    pub min_size: f64,
    pub max_size: f64,
    /// Node id whose definition tooltip is drawn on top of the tree.
    pub tooltip_for: Option<String>,
    pub style_mode: StyleMode,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            viewbox_padding: 50.0,
            min_size: 500.0,
            max_size: 1000.0,
            tooltip_for: None,
            style_mode: StyleMode::Stylesheet,
        }
    }
}

/// Output size and visible region of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub view_box: LayoutRect,
}

/// Fits the document to the content bounds of `layout`.
///
/// Width and height follow the content size clamped to `[min_size, max_size]`. A configured
/// image size replaces the width and keeps the aspect ratio.
pub fn fit_viewport(layout: &RadialLayout, options: &SvgRenderOptions) -> Viewport {
    let content = layout.bounds.unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    });
    let padded = content.padded(options.viewbox_padding);

    let mut width = content.width().clamp(options.min_size, options.max_size);
    let mut height = content.height().clamp(options.min_size, options.max_size);
    if let Some(size) = layout.config.image_size {
        let aspect = height / width;
        width = size;
        height = size * aspect;
    }

    Viewport {
        width,
        height,
        view_box: LayoutRect {
            x: padded.min_x,
            y: padded.min_y,
            width: padded.width(),
            height: padded.height(),
        },
    }
}

/// Renders `layout` as a standalone SVG document.
pub fn render_radial_svg(
    layout: &RadialLayout,
    measurer: &dyn TextMeasurer,
    options: &SvgRenderOptions,
) -> Result<String> {
    let viewport = fit_viewport(layout, options);
    let id = util::sanitize_id(options.diagram_id.as_deref().unwrap_or("wordtree"));

    let mut surface = SvgSurface::new(measurer, options.style_mode);
    draw_tree(&mut surface, layout, options.tooltip_for.as_deref())?;
    Ok(surface.finish(&id, &viewport))
}
