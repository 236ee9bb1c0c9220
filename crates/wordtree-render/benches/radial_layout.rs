use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wordtree_core::{LayoutConfig, Record, Tree, stratify};
use wordtree_render::svg::{SvgRenderOptions, render_radial_svg};
use wordtree_render::text::DeterministicTextMeasurer;
use wordtree_render::{LayoutOptions, layout_radial};

/// Complete tree with `branching` children per node, `levels` levels below the root.
fn balanced_tree(branching: usize, levels: usize) -> Tree {
    let mut records = vec![Record::new("ROOT")];
    let mut frontier = vec!["ROOT".to_string()];
    for _ in 0..levels {
        let mut next = Vec::with_capacity(frontier.len() * branching);
        for parent in &frontier {
            for i in 0..branching {
                let id = format!("{parent}.W{i}");
                records.push(Record::new(id.clone()));
                next.push(id);
            }
        }
        frontier = next;
    }
    stratify(&records).expect("stratify").expect("non-empty")
}

fn bench_radial_layout(c: &mut Criterion) {
    let tree = balanced_tree(4, 5);
    let config = LayoutConfig::default();
    let options = LayoutOptions::default();

    let mut group = c.benchmark_group("radial_layout");
    group.sample_size(50);

    group.bench_function("balanced_4x5_layout", |b| {
        b.iter(|| {
            let layout = layout_radial(Some(black_box(&tree)), &config, &options).expect("layout");
            black_box(layout.nodes.len() ^ layout.links.len());
        });
    });

    let layout = layout_radial(Some(&tree), &config, &options).expect("layout");
    let measurer = DeterministicTextMeasurer::default();
    let svg_options = SvgRenderOptions::default();
    group.bench_function("balanced_4x5_svg", |b| {
        b.iter(|| {
            let svg = render_radial_svg(black_box(&layout), &measurer, &svg_options).expect("svg");
            black_box(svg.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_radial_layout);
criterion_main!(benches);
