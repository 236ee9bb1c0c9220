// Presentation rules per element class. Emitted either as a scoped stylesheet or inlined on
// every element (raster backends ignore `<style>`).

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleMode {
    /// One `<style>` block scoped to the diagram id; elements only carry classes.
    #[default]
    Stylesheet,
    /// Every element carries its resolved declarations in a `style` attribute.
    Inline,
}

pub(crate) struct ClassRule {
    pub class: &'static str,
    pub selector: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

pub(crate) const RULES: &[ClassRule] = &[
    ClassRule {
        class: "link",
        selector: ".link",
        declarations: &[("fill", "none"), ("stroke", "#555"), ("stroke-opacity", "0.4")],
    },
    ClassRule {
        class: "node--internal",
        selector: ".node--internal circle",
        declarations: &[("fill", "#555")],
    },
    ClassRule {
        class: "node--leaf",
        selector: ".node--leaf circle",
        declarations: &[("fill", "#999")],
    },
    ClassRule {
        class: "node-label",
        selector: ".node-label",
        declarations: &[("font-family", "sans-serif"), ("fill", "#000")],
    },
    ClassRule {
        class: "background",
        selector: ".background",
        declarations: &[("fill", "yellow"), ("stroke", "black"), ("opacity", "0.9")],
    },
    ClassRule {
        class: "tooltip",
        selector: ".tooltip",
        declarations: &[("font-family", "sans-serif"), ("fill", "#000"), ("opacity", "0.9")],
    },
];

/// The scoped stylesheet for a diagram rendered with `id`.
pub(crate) fn stylesheet(id: &str) -> String {
    let mut out = String::new();
    for rule in RULES {
        let _ = write!(&mut out, "#{id} {}{{", rule.selector);
        for (k, v) in rule.declarations {
            let _ = write!(&mut out, "{k}:{v};");
        }
        out.push('}');
    }
    out
}

/// Declarations an element of `element` kind with `classes` resolves to.
///
/// Descendant rules (`.node--leaf circle`) are honored by passing the ancestor group classes in
/// `ancestors`.
pub(crate) fn inline_declarations(element: &str, classes: &str, ancestors: &[&str]) -> String {
    let mut out = String::new();
    for rule in RULES {
        let applies = match rule.selector.split_once(' ') {
            Some((_, tag)) => tag == element && ancestors.iter().any(|a| has_class(a, rule.class)),
            None => has_class(classes, rule.class),
        };
        if !applies {
            continue;
        }
        for (k, v) in rule.declarations {
            let _ = write!(&mut out, "{k}:{v};");
        }
    }
    out
}

fn has_class(classes: &str, class: &str) -> bool {
    classes.split_whitespace().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_is_scoped_to_the_diagram() {
        let css = stylesheet("tree-1");
        assert!(css.starts_with("#tree-1 .link{fill:none;"));
        assert!(css.contains("#tree-1 .node--leaf circle{fill:#999;}"));
    }

    #[test]
    fn inline_rules_follow_ancestor_classes() {
        assert_eq!(
            inline_declarations("circle", "", &["node node--leaf"]),
            "fill:#999;"
        );
        assert_eq!(inline_declarations("circle", "", &["node"]), "");
        assert_eq!(
            inline_declarations("path", "link", &[]),
            "fill:none;stroke:#555;stroke-opacity:0.4;"
        );
    }
}
