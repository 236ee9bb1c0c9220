#![forbid(unsafe_code)]

//! `wordtree` renders radial "word trees" headlessly.
//!
//! Input is a flat JSON array of records with dotted ids (`"TEA.TEAK.STEAK"`); the ids alone
//! encode the hierarchy. Output is an SVG document, or PNG/JPEG bytes with the `raster` feature.
//!
//! # Features
//!
//! - `render` (default): radial layout + SVG rendering (`wordtree::render`)
//! - `raster`: PNG/JPEG export via pure-Rust SVG rasterization

pub use wordtree_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use wordtree_render::model::{
        Bounds, LayoutLink, LayoutNode, LayoutPoint, LayoutRect, LinkPath, NodeLabel,
        RadialLayout, TextAnchor,
    };
    pub use wordtree_render::svg::{
        StyleMode, SvgRenderOptions, SvgSurface, Viewport, fit_viewport, render_radial_svg,
    };
    pub use wordtree_render::text::{
        DeterministicTextMeasurer, TextMeasurer, TextStyle, WrappedLine, wrap_words,
    };
    pub use wordtree_render::tooltip::{Tooltip, layout_tooltip};
    pub use wordtree_render::{LayoutOptions, layout_radial};

    #[cfg(feature = "raster")]
    pub mod raster;

    use std::collections::BTreeMap;
    use wordtree_core::{LayoutConfig, Tree};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Load(#[from] wordtree_core::Error),
        #[error(transparent)]
        Render(#[from] wordtree_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Decodes, stratifies and lays out `json`. Returns `Ok(None)` for an empty record list.
    pub fn layout_json(
        json: &str,
        config: &LayoutConfig,
        layout_options: &LayoutOptions,
    ) -> Result<Option<RadialLayout>> {
        let Some(tree) = wordtree_core::load(json)? else {
            return Ok(None);
        };
        Ok(Some(layout_radial(Some(&tree), config, layout_options)?))
    }

    /// One-call JSON to SVG. Returns `Ok(None)` for an empty record list.
    pub fn render_svg(
        json: &str,
        config: &LayoutConfig,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<Option<String>> {
        let Some(layout) = layout_json(json, config, layout_options)? else {
            return Ok(None);
        };
        let svg = render_radial_svg(&layout, layout_options.text_measurer.as_ref(), svg_options)?;
        Ok(Some(svg))
    }

    /// A loaded dataset with its current layout and render settings.
    ///
    /// Changing the configuration rebuilds the layout from the stratified tree; records are only
    /// decoded once.
    #[derive(Clone)]
    pub struct TreeView {
        tree: Option<Tree>,
        layout: RadialLayout,
        layout_options: LayoutOptions,
        svg: SvgRenderOptions,
    }

    impl TreeView {
        pub fn from_json(json: &str, config: LayoutConfig) -> Result<Self> {
            Self::from_json_with(json, config, LayoutOptions::default())
        }

        pub fn from_json_with(
            json: &str,
            config: LayoutConfig,
            layout_options: LayoutOptions,
        ) -> Result<Self> {
            let tree = wordtree_core::load(json)?;
            let layout = layout_radial(tree.as_ref(), &config, &layout_options)?;
            Ok(Self {
                tree,
                layout,
                layout_options,
                svg: SvgRenderOptions::default(),
            })
        }

        pub fn is_empty(&self) -> bool {
            self.tree.is_none()
        }

        pub fn tree(&self) -> Option<&Tree> {
            self.tree.as_ref()
        }

        pub fn layout(&self) -> &RadialLayout {
            &self.layout
        }

        pub fn config(&self) -> &LayoutConfig {
            &self.layout.config
        }

        /// Re-lays the tree out under `config`. On error the previous layout is kept.
        pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
            self.layout = layout_radial(self.tree.as_ref(), &config, &self.layout_options)?;
            Ok(())
        }

        pub fn svg_options(&self) -> &SvgRenderOptions {
            &self.svg
        }

        pub fn svg_options_mut(&mut self) -> &mut SvgRenderOptions {
            &mut self.svg
        }

        pub fn style_mode(&self) -> StyleMode {
            self.svg.style_mode
        }

        pub fn to_svg(&self) -> Result<String> {
            Ok(render_radial_svg(
                &self.layout,
                self.layout_options.text_measurer.as_ref(),
                &self.svg,
            )?)
        }

        pub fn tooltip(&self, id: &str) -> Result<Tooltip> {
            Ok(layout_tooltip(
                &self.layout,
                id,
                self.layout_options.text_measurer.as_ref(),
            )?)
        }

        pub fn word_list(&self) -> Vec<String> {
            self.tree.as_ref().map(Tree::word_list).unwrap_or_default()
        }

        pub fn length_summary(&self) -> BTreeMap<usize, usize> {
            self.tree
                .as_ref()
                .map(Tree::length_summary)
                .unwrap_or_default()
        }

        /// Switches the view to inline styles until the returned guard is dropped.
        pub fn inline_styles(&mut self) -> InlineStyles<'_> {
            let previous = std::mem::replace(&mut self.svg.style_mode, StyleMode::Inline);
            InlineStyles {
                view: self,
                previous,
            }
        }
    }

    /// Restores the previous style mode on drop, whether or not the work in between succeeded.
    pub struct InlineStyles<'a> {
        view: &'a mut TreeView,
        previous: StyleMode,
    }

    impl std::ops::Deref for InlineStyles<'_> {
        type Target = TreeView;

        fn deref(&self) -> &TreeView {
            self.view
        }
    }

    impl Drop for InlineStyles<'_> {
        fn drop(&mut self) {
            self.view.svg.style_mode = self.previous;
        }
    }
}
