#![forbid(unsafe_code)]

pub mod layout;
pub mod model;
pub mod radial;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod text;
pub mod tooltip;

use crate::model::RadialLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use wordtree_core::{LayoutConfig, Tree};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wordtree_core::Error),
    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },
    #[error("unknown node: {id}")]
    UnknownNode { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Lays out an optional tree; `None` (empty input) yields an empty scene.
pub fn layout_radial(
    tree: Option<&Tree>,
    config: &LayoutConfig,
    options: &LayoutOptions,
) -> Result<RadialLayout> {
    match tree {
        Some(tree) => layout::layout_tree(tree, config, options.text_measurer.as_ref()),
        None => {
            config.validate()?;
            Ok(RadialLayout::empty(config.clone()))
        }
    }
}
