use std::path::PathBuf;
use wordtree::render::{
    HeadlessError, LayoutOptions, StyleMode, SvgRenderOptions, TreeView, render_svg,
};
use wordtree::{LabelMode, LayoutConfig, StructureError};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(workspace_root().join("fixtures").join(name)).expect("fixture")
}

#[test]
fn render_svg_produces_a_parseable_document() {
    let svg = render_svg(
        &fixture("teak.json"),
        &LayoutConfig::default(),
        &LayoutOptions::default(),
        &SvgRenderOptions::default(),
    )
    .expect("render ok")
    .expect("non-empty input");

    let doc = roxmltree::Document::parse(&svg).expect("svg parses as xml");
    assert_eq!(doc.root_element().tag_name().name(), "svg");
    let texts = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .count();
    assert_eq!(texts, 11);
}

#[test]
fn empty_input_renders_nothing() {
    let out = render_svg(
        &fixture("empty.json"),
        &LayoutConfig::default(),
        &LayoutOptions::default(),
        &SvgRenderOptions::default(),
    )
    .expect("render ok");
    assert!(out.is_none());

    let view = TreeView::from_json("[]", LayoutConfig::default()).expect("view");
    assert!(view.is_empty());
    assert!(view.word_list().is_empty());
    let svg = view.to_svg().expect("svg");
    assert!(!svg.contains("<path"));
}

#[test]
fn structural_errors_surface_through_the_facade() {
    let err = render_svg(
        &fixture("missing_parent.json"),
        &LayoutConfig::default(),
        &LayoutOptions::default(),
        &SvgRenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Load(wordtree::Error::Structure(
            StructureError::MissingParent { .. }
        ))
    ));
}

#[test]
fn changing_the_config_rebuilds_the_layout() {
    let mut view = TreeView::from_json(&fixture("teak.json"), LayoutConfig::default())
        .expect("view");
    let before = view.layout().clone();

    view.set_config(LayoutConfig {
        radius: 100.0,
        label_mode: LabelMode::Steals,
        ..Default::default()
    })
    .expect("relayout");
    assert_eq!(view.layout().nodes.len(), before.nodes.len());
    let streak = view.layout().find("TEA.TEAK.STEAK.STREAK").expect("node");
    assert_eq!(streak.y, 300.0);
    assert_eq!(streak.label.text, "R");

    let rejected = view.set_config(LayoutConfig {
        angle: 400.0,
        ..Default::default()
    });
    assert!(rejected.is_err());
    assert_eq!(view.config().radius, 100.0);
}

#[test]
fn inline_styles_guard_restores_the_mode() {
    let mut view = TreeView::from_json(&fixture("teak.json"), LayoutConfig::default())
        .expect("view");
    {
        let inline = view.inline_styles();
        assert_eq!(inline.style_mode(), StyleMode::Inline);
        let svg = inline.to_svg().expect("svg");
        assert!(!svg.contains("<style>"));
        assert!(svg.contains("style=\"fill:none;"));
    }
    assert_eq!(view.style_mode(), StyleMode::Stylesheet);
    assert!(view.to_svg().expect("svg").contains("<style>"));
}

#[test]
fn word_list_and_summary_follow_the_tree() {
    let view = TreeView::from_json(&fixture("teak.json"), LayoutConfig::default())
        .expect("view");
    assert_eq!(
        view.word_list(),
        vec![
            "TEAK", "  STEAK", "    STREAK", "  TWEAK", "TEAL", "  STEAL", "  TESLA", "TEAM",
            "  STEAM", "  MEATS",
        ]
    );
    let summary: Vec<(usize, usize)> = view.length_summary().into_iter().collect();
    assert_eq!(summary, vec![(4, 3), (5, 6), (6, 1)]);

    let tip = view.tooltip("TEA.TEAM.MEATS").expect("tooltip");
    assert_eq!(tip.lines.len(), 1);
    assert_eq!(tip.lines[0].text, "plural of meat");
}
