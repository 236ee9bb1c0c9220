use super::style::{StyleMode, inline_declarations, stylesheet};
use super::util::{Num, escape_xml, escape_xml_into, fmt_path_into};
use super::Viewport;
use crate::model::{LayoutPoint, LayoutRect, LinkPath};
use crate::surface::{RenderSurface, TextElement, TextLines, Transform};
use crate::text::{TextMeasurer, TextMetrics, TextStyle};
use std::fmt::Write as _;
use wordtree_core::ZoomTransform;

/// Writes the scene as SVG markup.
pub struct SvgSurface<'m> {
    measurer: &'m dyn TextMeasurer,
    style_mode: StyleMode,
    view: ZoomTransform,
    groups: Vec<String>,
    body: String,
}

fn transform_attr(out: &mut String, transforms: &[Transform]) {
    if transforms.is_empty() {
        return;
    }
    out.push_str(r#" transform=""#);
    for (i, t) in transforms.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = match *t {
            Transform::Translate(x, y) => write!(out, "translate({},{})", Num(x), Num(y)),
            Transform::Rotate(a) => write!(out, "rotate({})", Num(a)),
            Transform::Scale(s) => write!(out, "scale({})", Num(s)),
        };
    }
    out.push('"');
}

fn path_data(out: &mut String, path: &LinkPath) {
    fn pt(out: &mut String, p: LayoutPoint) {
        fmt_path_into(out, p.x);
        out.push(',');
        fmt_path_into(out, p.y);
    }

    out.push('M');
    pt(out, path.start);
    out.push('C');
    pt(out, path.control1);
    out.push(' ');
    pt(out, path.control2);
    out.push(' ');
    pt(out, path.end);
}

impl<'m> SvgSurface<'m> {
    pub fn new(measurer: &'m dyn TextMeasurer, style_mode: StyleMode) -> Self {
        Self {
            measurer,
            style_mode,
            view: ZoomTransform::default(),
            groups: Vec::new(),
            body: String::new(),
        }
    }

    pub fn style_mode(&self) -> StyleMode {
        self.style_mode
    }

    fn style_attr(&mut self, element: &str, classes: &str, extra: &str) {
        let mut decls = String::new();
        if self.style_mode == StyleMode::Inline {
            let ancestors: Vec<&str> = self.groups.iter().map(String::as_str).collect();
            decls = inline_declarations(element, classes, &ancestors);
        }
        decls.push_str(extra);
        if decls.is_empty() {
            return;
        }
        self.body.push_str(r#" style=""#);
        escape_xml_into(&mut self.body, &decls);
        self.body.push('"');
    }

    /// Closes any open groups and wraps the body in the document root.
    pub fn finish(mut self, diagram_id: &str, viewport: &Viewport) -> String {
        while !self.groups.is_empty() {
            self.end_group();
        }

        let id = escape_xml(diagram_id);
        let mut out = String::with_capacity(self.body.len() + 512);
        let _ = write!(
            &mut out,
            r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" class="wordtree" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            Num(viewport.width),
            Num(viewport.height),
            Num(viewport.view_box.x),
            Num(viewport.view_box.y),
            Num(viewport.view_box.width),
            Num(viewport.view_box.height),
        );
        if self.style_mode == StyleMode::Stylesheet {
            out.push_str("<style>");
            out.push_str(&stylesheet(&id));
            out.push_str("</style>");
        }

        out.push_str(r#"<g class="viewport""#);
        if !self.view.is_identity() {
            transform_attr(
                &mut out,
                &[
                    Transform::Translate(self.view.translate[0], self.view.translate[1]),
                    Transform::Scale(self.view.scale),
                ],
            );
        }
        out.push('>');
        out.push_str(&self.body);
        out.push_str("</g></svg>");
        out
    }
}

impl RenderSurface for SvgSurface<'_> {
    fn set_view_transform(&mut self, zoom: ZoomTransform) {
        self.view = zoom;
    }

    fn begin_group(&mut self, class: &str, transform: &[Transform]) {
        self.body.push_str("<g class=\"");
        escape_xml_into(&mut self.body, class);
        self.body.push('"');
        transform_attr(&mut self.body, transform);
        self.style_attr("g", class, "");
        self.body.push('>');
        self.groups.push(class.to_string());
    }

    fn end_group(&mut self) {
        if self.groups.pop().is_some() {
            self.body.push_str("</g>");
        }
    }

    fn path(&mut self, class: &str, path: &LinkPath, stroke_width: f64) {
        self.body.push_str("<path class=\"");
        escape_xml_into(&mut self.body, class);
        self.body.push_str("\" d=\"");
        path_data(&mut self.body, path);
        let _ = write!(&mut self.body, r#"" stroke-width="{}""#, Num(stroke_width));
        self.style_attr("path", class, "");
        self.body.push_str("/>");
    }

    fn circle(&mut self, center: LayoutPoint, r: f64) {
        let _ = write!(
            &mut self.body,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            Num(center.x),
            Num(center.y),
            Num(r)
        );
        self.style_attr("circle", "", "");
        self.body.push_str("/>");
    }

    fn rect(&mut self, class: &str, rect: LayoutRect) {
        self.body.push_str("<rect class=\"");
        escape_xml_into(&mut self.body, class);
        let _ = write!(
            &mut self.body,
            r#"" x="{}" y="{}" width="{}" height="{}""#,
            Num(rect.x),
            Num(rect.y),
            Num(rect.width),
            Num(rect.height)
        );
        self.style_attr("rect", class, "");
        self.body.push_str("/>");
    }

    fn text(&mut self, text: &TextElement<'_>) {
        self.body.push_str("<text class=\"");
        escape_xml_into(&mut self.body, text.class);
        self.body.push('"');
        if let TextLines::Single(_) = text.lines {
            let _ = write!(&mut self.body, r#" x="{}""#, Num(text.x));
        }
        if let Some(dy) = text.dy {
            self.body.push_str(" dy=\"");
            escape_xml_into(&mut self.body, dy);
            self.body.push('"');
        }
        if let Some(anchor) = text.anchor {
            let _ = write!(&mut self.body, r#" text-anchor="{}""#, anchor.as_str());
        }
        transform_attr(&mut self.body, text.transform);
        for (name, value) in text.data {
            let _ = write!(&mut self.body, " data-{name}=\"");
            escape_xml_into(&mut self.body, value);
            self.body.push('"');
        }
        let font = format!("font-size:{}px;", Num(text.font_size));
        self.style_attr("text", text.class, &font);
        self.body.push('>');

        match text.lines {
            TextLines::Single(s) => escape_xml_into(&mut self.body, s),
            TextLines::Wrapped(lines) => {
                for line in lines {
                    let _ = write!(
                        &mut self.body,
                        r#"<tspan x="{}" y="0" dy="{}">"#,
                        Num(text.x),
                        Num(line.dy)
                    );
                    escape_xml_into(&mut self.body, &line.text);
                    self.body.push_str("</tspan>");
                }
            }
        }
        if let Some(title) = text.title {
            self.body.push_str("<title>");
            escape_xml_into(&mut self.body, title);
            self.body.push_str("</title>");
        }
        self.body.push_str("</text>");
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.measurer.measure(text, style)
    }
}
